use tokio::net::TcpStream;
use tracing::debug;

use crate::error::ProbeError;

use super::context::RunContext;
use super::retry::with_retry;
use super::types::{Layer, LayerReport, ProbeConfig};

/// Note attached when the target scheme carries no TLS.
const SKIPPED_NOTE: &str = "skipped (http)";

/// Completes a TLS handshake with the target, certificate verification
/// included. Plain `http` targets are skipped with a zero duration and a
/// note instead of an error.
pub async fn probe_tls(context: &RunContext, config: &ProbeConfig) -> LayerReport {
    if !config.target.is_tls() {
        return LayerReport {
            layer: Layer::Tls,
            duration_ms: 0,
            error: None,
            note: Some(SKIPPED_NOTE.to_owned()),
        };
    }

    let host = config.target.host();
    let authority = config.target.authority();

    let outcome = with_retry(context, config.retries, || {
        let host = host.clone();
        let authority = authority.clone();
        async move { handshake(&host, &authority).await }
    })
    .await;

    debug!(
        "TLS handshake with {} finished in {}ms",
        host, outcome.duration_ms
    );
    LayerReport {
        layer: Layer::Tls,
        duration_ms: outcome.duration_ms,
        error: outcome.result.err(),
        note: None,
    }
}

async fn handshake(host: &str, authority: &str) -> Result<(), ProbeError> {
    let connector = native_tls::TlsConnector::new().map_err(|err| ProbeError::Handshake {
        host: host.to_owned(),
        source: err,
    })?;
    let connector = tokio_native_tls::TlsConnector::from(connector);

    let stream = TcpStream::connect(authority)
        .await
        .map_err(|err| ProbeError::Connect {
            authority: authority.to_owned(),
            source: err,
        })?;
    let tls_stream = connector
        .connect(host, stream)
        .await
        .map_err(|err| ProbeError::Handshake {
            host: host.to_owned(),
            source: err,
        })?;
    drop(tls_stream);
    Ok(())
}
