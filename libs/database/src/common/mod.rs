//! Utilities shared by every store implementation

pub mod error;
pub mod retry;
pub mod timeout;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry, retry_with_backoff};
pub use timeout::{DEFAULT_OPERATION_TIMEOUT, with_timeout};
