//! Domain types and pure logic shared across botdesk crates.

pub mod files;
pub mod identity;
pub mod search;
pub mod types;
