//! Retry with exponential backoff for transient upstream failures.
//!
//! Only failures that may clear up on their own are retried: transport errors
//! and the statuses a busy or restarting upstream returns. Everything else is
//! propagated on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::SubscriptionsError;

const RETRIABLE_STATUSES: [u16; 4] = [429, 502, 503, 504];

/// Retriable errors:
/// - [`SubscriptionsError::Http`]: connection reset, timeout, DNS failure.
/// - [`SubscriptionsError::UpstreamStatus`] with 429, 502, 503 or 504.
fn is_retriable(err: &SubscriptionsError) -> bool {
    match err {
        SubscriptionsError::Http(_) => true,
        SubscriptionsError::UpstreamStatus { status, .. } => RETRIABLE_STATUSES.contains(status),
        SubscriptionsError::InvalidBody { .. } | SubscriptionsError::InvalidTimestamp(_) => false,
    }
}

/// Executes `operation`, retrying transient errors up to `max_retries` extra
/// times. The wait before retry `n` (zero-based) is `backoff_base_secs * 2^n`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, SubscriptionsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SubscriptionsError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient upstream error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
