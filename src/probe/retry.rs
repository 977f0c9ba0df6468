use std::future::Future;
use std::num::NonZeroU32;

use tokio::time::Instant;
use tracing::debug;

use crate::error::ProbeError;

use super::context::RunContext;

/// Result of a retried operation together with the wall-clock duration of
/// its final attempt. The duration is recorded whether or not that attempt
/// succeeded.
#[derive(Debug)]
pub struct RetryOutcome<T> {
    pub duration_ms: u64,
    pub result: Result<T, ProbeError>,
}

/// Runs `operation` up to `retries` times, stopping at the first success.
///
/// The context is checked immediately before each attempt, so a run that is
/// already over reports its stop cause without starting another attempt. An
/// in-flight attempt is raced against the context and abandoned at its next
/// await point once the run is over; a cancellation cause is never retried.
/// When every attempt fails, the last error wins. There is no delay between
/// attempts.
pub async fn with_retry<T, F, Fut>(
    context: &RunContext,
    retries: NonZeroU32,
    mut operation: F,
) -> RetryOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProbeError>>,
{
    let mut duration_ms = 0;
    let mut attempt: u32 = 0;

    loop {
        if let Err(cause) = context.check() {
            return RetryOutcome {
                duration_ms,
                result: Err(cause),
            };
        }

        let started = Instant::now();
        let result = tokio::select! {
            cause = context.done() => Err(cause),
            result = operation() => result,
        };
        duration_ms = elapsed_ms(started);

        match result {
            Ok(value) => {
                return RetryOutcome {
                    duration_ms,
                    result: Ok(value),
                };
            }
            Err(error) => {
                if error.is_cancellation() {
                    return RetryOutcome {
                        duration_ms,
                        result: Err(error),
                    };
                }
                attempt = attempt.saturating_add(1);
                if attempt >= retries.get() {
                    return RetryOutcome {
                        duration_ms,
                        result: Err(error),
                    };
                }
                debug!("Attempt {} of {} failed: {}", attempt, retries, error);
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
