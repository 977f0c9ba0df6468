use std::marker::PhantomData;

use ratatui::Terminal;
use tokio::sync::watch;
use tracing::debug;

use crate::app::build_client;
use crate::error::AppResult;
use crate::probe::{CancelHandle, ProbeConfig, run_context, run_layer_probes, run_load_test};
use crate::shutdown::{spawn_keyboard_handler, spawn_signal_handler};
use crate::ui::model::{LayerRow, LoadView, UiState};

use super::dashboard::{Ui, UiActions};

struct TerminalGuard<U: UiActions> {
    marker: PhantomData<U>,
}

impl<U: UiActions> Drop for TerminalGuard<U> {
    fn drop(&mut self) {
        U::cleanup();
    }
}

/// Runs the probes and the optional load test while a full-screen dashboard
/// tracks the run. The dashboard stays up after the run finishes and closes
/// on `q`, Ctrl+C or SIGTERM; a quit during the run cancels it.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built, the terminal
/// cannot be set up, or one of the run's tasks is lost.
pub async fn run_dashboard(config: &ProbeConfig) -> AppResult<()> {
    run_dashboard_with::<Ui>(config).await
}

async fn run_dashboard_with<U>(config: &ProbeConfig) -> AppResult<()>
where
    U: UiActions + Send + 'static,
{
    let client = build_client()?;
    // Terminal setup comes before any run task starts; without a dashboard
    // there is no quit key, so the run must not begin.
    let terminal = U::setup_terminal()?;

    let (cancel, context) = run_context(config.deadline);
    let signals = spawn_signal_handler(&cancel);
    let keyboard = spawn_keyboard_handler(&cancel);

    let (ui_tx, ui_rx) = watch::channel(UiState::new(config.target.as_str()));
    let render_task = spawn_render_task::<U>(terminal, &cancel, ui_rx);

    let reports = run_layer_probes(&context, config, &client).await;
    ui_tx.send_modify(|state| {
        state.layers = reports.iter().map(LayerRow::from).collect();
    });

    if config.load_requested() {
        let stats = run_load_test(&context, config, &client).await;
        let view = LoadView::new(&stats, config.concurrency.get());
        ui_tx.send_modify(|state| state.load = Some(view));
    }

    debug!("Run finished, waiting for quit.");
    cancel.cancelled().await;

    render_task.await?;
    keyboard.await?;
    signals.await?;
    Ok(())
}

fn spawn_render_task<U>(
    mut terminal: Terminal<U::TerminalBackend>,
    cancel: &CancelHandle,
    mut ui_rx: watch::Receiver<UiState>,
) -> tokio::task::JoinHandle<()>
where
    U: UiActions + Send + 'static,
{
    let cancel = cancel.clone();
    tokio::spawn(async move {
        let _guard = TerminalGuard::<U> {
            marker: PhantomData,
        };

        let initial = ui_rx.borrow().clone();
        U::render(&mut terminal, &initial);

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                res = ui_rx.changed() => {
                    if res.is_ok() {
                        let state = ui_rx.borrow().clone();
                        U::render(&mut terminal, &state);
                    } else {
                        break;
                    }
                }
            }
        }
    })
}
