mod client;
mod error;
mod retry;

pub use client::ApiClient;
pub use error::ClientError;
pub use retry::{retry_form_post, RetryConfig};
