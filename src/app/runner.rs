use tracing::debug;

use crate::args::{OutputFormat, ProbeArgs};
use crate::error::AppResult;
use crate::probe::{
    LayerReport, LoadStats, ProbeConfig, Target, run_context, run_layer_probes, run_load_test,
};
use crate::shutdown::spawn_signal_handler;

use super::client::build_client;
use super::{export, summary};

/// Builds a validated probe configuration from the parsed arguments.
///
/// # Errors
///
/// Returns an error when the URL is not a probeable `http` or `https` URL.
pub fn probe_config(args: &ProbeArgs) -> AppResult<ProbeConfig> {
    Ok(ProbeConfig {
        target: Target::parse(&args.url)?,
        retries: args.retries.into(),
        deadline: args.timeout,
        concurrency: args.concurrency.into(),
        requests: args.requests.into(),
    })
}

/// Runs the layer probes, then the load test when one was requested, and
/// renders the outcome in the selected output format.
///
/// Probe failures are part of the rendered result, not errors; the run only
/// fails on application-level problems such as a broken TLS backend.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built, rendering fails,
/// or a handler task is lost.
pub async fn run(args: &ProbeArgs, config: &ProbeConfig) -> AppResult<()> {
    let client = build_client()?;
    let (cancel, context) = run_context(config.deadline);
    let signals = spawn_signal_handler(&cancel);

    debug!("Probing {}", config.target.as_str());
    let reports = run_layer_probes(&context, config, &client).await;

    let load = if config.load_requested() {
        debug!(
            "Running load test: {} requests, concurrency {}",
            config.requests, config.concurrency
        );
        Some(run_load_test(&context, config, &client).await)
    } else {
        None
    };

    render(args.output, config, &reports, load.as_ref())?;

    cancel.cancel();
    signals.await?;
    Ok(())
}

fn render(
    output: OutputFormat,
    config: &ProbeConfig,
    reports: &[LayerReport],
    load: Option<&LoadStats>,
) -> AppResult<()> {
    match output {
        OutputFormat::Text => {
            summary::print_probe_report(&config.target, reports);
            if let Some(stats) = load {
                summary::print_load_report(stats, config.concurrency.get());
            }
        }
        OutputFormat::Json => {
            let payload = export::to_json(&export::run_export(config, reports, load))?;
            println!("{}", payload);
        }
    }
    Ok(())
}
