/*!
 * Bounded retry for transient transport failures.
 *
 * A retry wraps one full transport exchange; HTTP-level failures (bad
 * status, malformed body) are never re-run here, they surface immediately.
 */

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::errors::AdapterError;

/// Retries an async attempt on transient failures with a fixed pause
/// between attempts - no backoff, no jitter.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum additional attempts after the first
    retry_count: u32,
    /// Fixed pause between attempts
    retry_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy allowing `retry_count` additional attempts
    pub fn new(retry_count: u32, retry_delay: Duration) -> Self {
        Self {
            retry_count,
            retry_delay,
        }
    }

    /// Run the attempt until it succeeds, fails fatally, or the retry
    /// budget is exhausted.
    ///
    /// Attempts are strictly sequential: one attempt completes before the
    /// next starts, with a full `retry_delay` sleep in between. When the
    /// budget runs out the last transient error is returned unchanged.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T, AdapterError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AdapterError>>,
    {
        let mut failures = 0u32;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && failures < self.retry_count => {
                    failures += 1;
                    warn!(
                        "transient failure, retry {}/{} in {}ms: {}",
                        failures,
                        self.retry_count,
                        self.retry_delay.as_millis(),
                        error
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
