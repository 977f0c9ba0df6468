use crate::probe::{LatencySummary, Layer, LayerReport, LoadStats};

/// Everything the dashboard needs to draw one frame. Cloned out of the
/// update channel on every redraw, so it stays plain data.
#[derive(Debug, Clone)]
pub struct UiState {
    pub target: String,
    pub layers: Vec<LayerRow>,
    pub load: Option<LoadView>,
}

impl UiState {
    #[must_use]
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_owned(),
            layers: Vec::new(),
            load: None,
        }
    }
}

/// One probed layer as a display row.
#[derive(Debug, Clone)]
pub struct LayerRow {
    pub layer: Layer,
    pub ok: bool,
    pub duration_ms: u64,
    /// The note for a passed check, or the failure cause.
    pub detail: Option<String>,
}

impl From<&LayerReport> for LayerRow {
    fn from(report: &LayerReport) -> Self {
        Self {
            layer: report.layer,
            ok: report.is_ok(),
            duration_ms: report.duration_ms,
            detail: report
                .error
                .as_ref()
                .map_or_else(|| report.note.clone(), |err| Some(err.to_string())),
        }
    }
}

/// Final load-test figures for the dashboard.
#[derive(Debug, Clone)]
pub struct LoadView {
    pub requests: u64,
    pub concurrency: usize,
    pub success: u64,
    pub errors: u64,
    pub summary: Option<LatencySummary>,
}

impl LoadView {
    #[must_use]
    pub fn new(stats: &LoadStats, concurrency: usize) -> Self {
        Self {
            requests: stats.total,
            concurrency,
            success: stats.success,
            errors: stats.errors,
            summary: stats.latency_summary(),
        }
    }
}
