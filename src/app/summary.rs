use crate::probe::{LayerReport, LoadStats, Target};

/// Formats one layer report the way the plain renderer prints it.
pub(crate) fn layer_line(report: &LayerReport) -> String {
    if let Some(err) = &report.error {
        return format!("✖ {} failed: {}", report.layer.label(), err);
    }
    report.note.as_ref().map_or_else(
        || format!("✔ {}: {}ms", report.layer.label(), report.duration_ms),
        |note| {
            format!(
                "✔ {}: {}ms ({})",
                report.layer.label(),
                report.duration_ms,
                note
            )
        },
    )
}

pub(crate) fn print_probe_report(target: &Target, reports: &[LayerReport]) {
    println!("🔍 Probing: {}", target.as_str());
    for report in reports {
        println!("{}", layer_line(report));
    }
}

/// Prints the load-test block. The latency lines are omitted when the run
/// recorded no samples.
pub(crate) fn print_load_report(stats: &LoadStats, concurrency: usize) {
    println!();
    println!("⚡ Load Test");
    println!("Requests: {}", stats.total);
    println!("Concurrency: {}", concurrency);
    println!("Success: {}", stats.success);
    println!("Errors: {}", stats.errors);
    if let Some(summary) = stats.latency_summary() {
        println!("Avg latency: {}ms", summary.avg_ms);
        println!("P95 latency: {}ms", summary.p95_ms);
    }
}
