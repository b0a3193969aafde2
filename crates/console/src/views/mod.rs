pub mod actions;
pub mod contacts;
pub mod history;
pub mod modal;
pub mod toast;
