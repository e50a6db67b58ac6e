use crate::error::{Result, VisionError};
use recyclens_core::RetryConfig;
use std::future::Future;
use std::time::Duration;

/// Run one provider call with bounded retries and exponential backoff. Only
/// transient and quota failures are retried; everything else surfaces to the
/// fallback chain immediately.
pub async fn retry_with_backoff<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = config.max_attempts.max(1);
    let mut delay = Duration::from_millis(config.initial_delay_ms);
    let mut last_err: Option<VisionError> = None;

    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < attempts => {
                tracing::debug!("retry {}/{} after {:?}: {}", attempt, attempts, delay, e);
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err.unwrap_or_else(|| VisionError::Transient("retries exhausted".to_string())))
}
