use std::future::IntoFuture;
use std::time::Duration;

use super::DatabaseError;

/// Deadline applied to a single store operation unless configured otherwise.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Run `operation` with a deadline.
///
/// The outer `Result` reports the deadline, the inner one is the operation's own
/// result, so callers map each separately. Driver actions such as
/// `find_one` can be passed without awaiting them first:
///
/// ```ignore
/// let count = with_timeout(timeout, collection.count_documents(filter))
///     .await?   // DatabaseError::Timeout
///     .map_err(ProductError::from)?;
/// ```
pub async fn with_timeout<F, T>(duration: Duration, operation: F) -> Result<T, DatabaseError>
where
    F: IntoFuture<Output = T>,
{
    match tokio::time::timeout(duration, operation).await {
        Ok(output) => Ok(output),
        Err(_) => {
            tracing::warn!(timeout_ms = duration.as_millis() as u64, "Store operation timed out");
            Err(DatabaseError::Timeout(duration))
        }
    }
}
