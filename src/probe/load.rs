use std::sync::Arc;

use futures_util::future::join_all;
use reqwest::Client;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, warn};

use crate::error::ProbeError;

use super::context::RunContext;
use super::retry::with_retry;
use super::stats::LoadStats;
use super::types::ProbeConfig;

/// Issues `config.requests` GET requests against the target with at most
/// `config.concurrency` in flight, each request retried like a probe.
///
/// A semaphore permit is acquired before each worker is spawned, so the
/// in-flight cap holds at admission rather than inside the workers. The
/// context is checked before every dispatch; once the run is over no new
/// workers start, but workers already in flight finish and their results
/// still count. Returns only after every launched worker has completed.
pub async fn run_load_test(
    context: &RunContext,
    config: &ProbeConfig,
    client: &Client,
) -> LoadStats {
    let total = config.requests.get();
    let permits = Arc::new(Semaphore::new(config.concurrency.get()));
    let stats = Arc::new(Mutex::new(LoadStats::new(total)));
    let url = config.target.as_str().to_owned();

    let mut workers = Vec::with_capacity(usize::try_from(total).unwrap_or_default());
    for _ in 0..total {
        if let Err(cause) = context.check() {
            debug!("Load dispatch stopped early: {}", cause);
            break;
        }

        let permit = match Arc::clone(&permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };

        let context = context.clone();
        let client = client.clone();
        let url = url.clone();
        let stats = Arc::clone(&stats);
        let retries = config.retries;

        workers.push(tokio::spawn(async move {
            let outcome = with_retry(&context, retries, || {
                let client = client.clone();
                let url = url.clone();
                async move {
                    let response = client.get(&url).send().await.map_err(ProbeError::from)?;
                    drop(response);
                    Ok(())
                }
            })
            .await;

            let mut guard = stats.lock().await;
            guard.record(outcome.duration_ms, outcome.result.is_ok());
            drop(guard);
            drop(permit);
        }));
    }

    let launched = workers.len();
    for result in join_all(workers).await {
        if let Err(err) = result {
            warn!("A load worker failed to complete: {}", err);
        }
    }
    debug!("Load test joined {} of {} workers", launched, total);

    match Arc::try_unwrap(stats) {
        Ok(mutex) => mutex.into_inner(),
        Err(shared) => shared.lock().await.clone(),
    }
}
