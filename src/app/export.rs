use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::probe::{LayerReport, LoadStats, ProbeConfig};

/// Machine-readable form of a completed run.
#[derive(Debug, Serialize)]
pub(crate) struct RunExport<'a> {
    target: &'a str,
    layers: Vec<LayerExport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    load: Option<LoadExport>,
}

#[derive(Debug, Serialize)]
struct LayerExport<'a> {
    layer: &'static str,
    ok: bool,
    duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LoadExport {
    requests: u64,
    concurrency: usize,
    success: u64,
    errors: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    avg_latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    p95_latency_ms: Option<u64>,
}

pub(crate) fn run_export<'a>(
    config: &'a ProbeConfig,
    reports: &'a [LayerReport],
    load: Option<&LoadStats>,
) -> RunExport<'a> {
    let layers = reports
        .iter()
        .map(|report| LayerExport {
            layer: report.layer.label(),
            ok: report.is_ok(),
            duration_ms: report.duration_ms,
            error: report.error.as_ref().map(ToString::to_string),
            note: report.note.as_deref(),
        })
        .collect();

    let load = load.map(|stats| {
        let summary = stats.latency_summary();
        LoadExport {
            requests: stats.total,
            concurrency: config.concurrency.get(),
            success: stats.success,
            errors: stats.errors,
            avg_latency_ms: summary.map(|summary| summary.avg_ms),
            p95_latency_ms: summary.map(|summary| summary.p95_ms),
        }
    });

    RunExport {
        target: config.target.as_str(),
        layers,
        load,
    }
}

/// # Errors
///
/// Returns an error when serialisation fails.
pub(crate) fn to_json(export: &RunExport<'_>) -> AppResult<String> {
    serde_json::to_string_pretty(export).map_err(AppError::from)
}
