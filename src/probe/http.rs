use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::ProbeError;

use super::context::RunContext;
use super::retry::with_retry;
use super::types::{Layer, LayerReport, ProbeConfig};

/// Issues a GET request against the full target URL. Any response counts as
/// a success and its status line becomes the report note; only transport
/// failures are errors.
pub async fn probe_http(
    context: &RunContext,
    config: &ProbeConfig,
    client: &Client,
) -> LayerReport {
    let url = config.target.as_str().to_owned();

    let outcome = with_retry(context, config.retries, || {
        let client = client.clone();
        let url = url.clone();
        async move {
            let response = client.get(&url).send().await.map_err(ProbeError::from)?;
            Ok(status_note(response.status()))
        }
    })
    .await;

    debug!("HTTP request to {} finished in {}ms", url, outcome.duration_ms);
    let (note, error) = match outcome.result {
        Ok(note) => (Some(note), None),
        Err(err) => (None, Some(err)),
    };
    LayerReport {
        layer: Layer::Http,
        duration_ms: outcome.duration_ms,
        error,
        note,
    }
}

/// Renders a status the way a status line reads, `200 OK`, falling back to
/// the bare code for statuses without a canonical reason.
pub(super) fn status_note(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(
        || status.as_str().to_owned(),
        |reason| format!("{} {}", status.as_str(), reason),
    )
}
