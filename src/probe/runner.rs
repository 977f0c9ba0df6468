use reqwest::Client;
use tokio::task::{JoinError, JoinHandle};
use tracing::warn;

use crate::error::ProbeError;

use super::context::RunContext;
use super::dns::probe_dns;
use super::http::probe_http;
use super::tcp::probe_tcp;
use super::tls::probe_tls;
use super::types::{Layer, LayerReport, ProbeConfig};

/// Runs all four layer probes concurrently and returns their reports sorted
/// by layer order. A failed layer never aborts the others, and a lost probe
/// task is reported as a failure of its layer, so there is always one report
/// per layer.
pub async fn run_layer_probes(
    context: &RunContext,
    config: &ProbeConfig,
    client: &Client,
) -> Vec<LayerReport> {
    let dns = spawn_probe(context, config, |context, config| async move {
        probe_dns(&context, &config).await
    });
    let tcp = spawn_probe(context, config, |context, config| async move {
        probe_tcp(&context, &config).await
    });
    let tls = spawn_probe(context, config, |context, config| async move {
        probe_tls(&context, &config).await
    });
    let http = {
        let context = context.clone();
        let config = config.clone();
        let client = client.clone();
        tokio::spawn(async move { probe_http(&context, &config, &client).await })
    };

    let handles = [
        (Layer::Dns, dns),
        (Layer::Tcp, tcp),
        (Layer::Tls, tls),
        (Layer::Http, http),
    ];
    let mut reports = Vec::with_capacity(handles.len());
    for (layer, handle) in handles {
        reports.push(recovered_report(layer, handle.await));
    }
    reports.sort_by_key(|report| report.layer.order());
    reports
}

pub(super) fn recovered_report(
    layer: Layer,
    joined: Result<LayerReport, JoinError>,
) -> LayerReport {
    joined.unwrap_or_else(|err| {
        warn!("The {} probe task was lost: {}", layer.label(), err);
        LayerReport {
            layer,
            duration_ms: 0,
            error: Some(ProbeError::Task { source: err }),
            note: None,
        }
    })
}

fn spawn_probe<F, Fut>(
    context: &RunContext,
    config: &ProbeConfig,
    probe: F,
) -> JoinHandle<LayerReport>
where
    F: FnOnce(RunContext, ProbeConfig) -> Fut,
    Fut: std::future::Future<Output = LayerReport> + Send + 'static,
{
    let context = context.clone();
    let config = config.clone();
    tokio::spawn(probe(context, config))
}
