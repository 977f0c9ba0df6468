use tokio::net::TcpStream;
use tracing::debug;

use crate::error::ProbeError;

use super::context::RunContext;
use super::retry::with_retry;
use super::types::{Layer, LayerReport, ProbeConfig};

/// Opens a TCP connection to the target authority and closes it again. The
/// connect resolves the host itself, so this measures resolution plus the
/// handshake, the same thing a plain socket dial would.
pub async fn probe_tcp(context: &RunContext, config: &ProbeConfig) -> LayerReport {
    let authority = config.target.authority();

    let outcome = with_retry(context, config.retries, || {
        let authority = authority.clone();
        async move {
            let stream =
                TcpStream::connect(authority.as_str())
                    .await
                    .map_err(|err| ProbeError::Connect {
                        authority,
                        source: err,
                    })?;
            drop(stream);
            Ok(())
        }
    })
    .await;

    debug!(
        "TCP connect to {} finished in {}ms",
        authority, outcome.duration_ms
    );
    LayerReport {
        layer: Layer::Tcp,
        duration_ms: outcome.duration_ms,
        error: outcome.result.err(),
        note: None,
    }
}
