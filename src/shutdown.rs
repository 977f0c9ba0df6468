//! Handler tasks that turn external stop requests into a run cancellation.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::probe::CancelHandle;

const KEYBOARD_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Spawns a task that cancels the run on Ctrl+C or, on Unix, SIGTERM.
///
/// The task also exits once the run is cancelled from elsewhere, so it never
/// outlives the run it guards.
pub fn spawn_signal_handler(cancel: &CancelHandle) -> JoinHandle<()> {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => {}
            () = interrupt_signal() => {
                debug!("Interrupt signal received, cancelling run.");
                cancel.cancel();
            }
        }
    })
}

#[cfg(unix)]
async fn interrupt_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => Some(stream),
        Err(err) => {
            error!("Failed to install SIGTERM handler: {}", err);
            None
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                error!("Failed to listen for Ctrl+C: {}", err);
                std::future::pending::<()>().await;
            }
        }
        () = async {
            if let Some(stream) = terminate.as_mut() {
                stream.recv().await;
            } else {
                std::future::pending::<()>().await;
            }
        } => {}
    }
}

#[cfg(not(unix))]
async fn interrupt_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}

/// Spawns a blocking task that polls the keyboard and cancels the run when
/// `q` or Ctrl+C is pressed. Used only while the dashboard owns the terminal.
pub fn spawn_keyboard_handler(cancel: &CancelHandle) -> JoinHandle<()> {
    let cancel = cancel.clone();
    tokio::task::spawn_blocking(move || loop {
        if cancel.is_cancelled() {
            break;
        }
        let ready = poll(KEYBOARD_POLL_INTERVAL).unwrap_or(false);
        if !ready {
            continue;
        }
        if let Ok(Event::Key(key)) = read() {
            if is_quit_key(&key) {
                debug!("Quit key pressed, cancelling run.");
                cancel.cancel();
                break;
            }
        }
    })
}

fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q'))
        || (matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL))
}
