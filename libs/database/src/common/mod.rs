//! Utilities shared by the store helpers

pub mod error;
pub mod retry;

pub use error::DatabaseError;
pub use retry::{retry, retry_with_backoff, RetryConfig};
