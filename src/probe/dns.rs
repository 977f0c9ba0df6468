use tokio::net::lookup_host;
use tracing::debug;

use crate::error::ProbeError;

use super::context::RunContext;
use super::retry::with_retry;
use super::types::{Layer, LayerReport, ProbeConfig};

/// Resolves the target host through the system resolver and times the
/// lookup. A host that resolves to an empty address set counts as a failure.
pub async fn probe_dns(context: &RunContext, config: &ProbeConfig) -> LayerReport {
    let host = config.target.host();
    let port = config.target.port();

    let outcome = with_retry(context, config.retries, || {
        let host = host.clone();
        async move {
            // The resolved set borrows `host`; let it go before reporting.
            let resolved = lookup_host((host.as_str(), port))
                .await
                .map_err(|err| ProbeError::Resolve {
                    host: host.clone(),
                    source: err,
                })?
                .next()
                .is_some();
            if !resolved {
                return Err(ProbeError::NoAddresses { host });
            }
            Ok(())
        }
    })
    .await;

    debug!("DNS lookup for {} finished in {}ms", host, outcome.duration_ms);
    LayerReport {
        layer: Layer::Dns,
        duration_ms: outcome.duration_ms,
        error: outcome.result.err(),
        note: None,
    }
}
