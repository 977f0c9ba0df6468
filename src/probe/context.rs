use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::ProbeError;

/// Shared stop condition for one run: a fixed wall-clock deadline plus an
/// externally triggered cancel flag. Cheap to clone into every task.
#[derive(Debug, Clone)]
pub struct RunContext {
    deadline: Instant,
    cancel_rx: watch::Receiver<bool>,
}

impl RunContext {
    /// Reports whether the run is already over, cancellation first.
    ///
    /// # Errors
    ///
    /// Returns the cause when the run was cancelled or its deadline passed.
    pub fn check(&self) -> Result<(), ProbeError> {
        if *self.cancel_rx.borrow() {
            return Err(ProbeError::Cancelled);
        }
        if Instant::now() >= self.deadline {
            return Err(ProbeError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Resolves with the stop cause once the run is over. Used to race an
    /// in-flight operation against the deadline and the cancel flag.
    pub async fn done(&self) -> ProbeError {
        let mut cancel_rx = self.cancel_rx.clone();
        let cancelled = async move {
            while !*cancel_rx.borrow_and_update() {
                if cancel_rx.changed().await.is_err() {
                    // The sender is gone, so cancellation can no longer fire.
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            () = tokio::time::sleep_until(self.deadline) => ProbeError::DeadlineExceeded,
            () = cancelled => ProbeError::Cancelled,
        }
    }
}

/// Flips the cancel flag seen by every [`RunContext`] clone of one run.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        drop(self.cancel_tx.send(true));
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }

    /// Resolves once the run has been cancelled.
    pub async fn cancelled(&self) {
        let mut cancel_rx = self.cancel_tx.subscribe();
        while !*cancel_rx.borrow_and_update() {
            if cancel_rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Thirty years. Deadlines are capped here so the computed instant stays
/// representable; an oversized timeout must not read as already expired.
const DEADLINE_CEILING: Duration = Duration::from_secs(946_080_000);

/// Creates the paired cancel handle and context for a run that must finish
/// within `deadline` from now.
#[must_use]
pub fn run_context(deadline: Duration) -> (CancelHandle, RunContext) {
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let context = RunContext {
        deadline: Instant::now()
            .checked_add(deadline.min(DEADLINE_CEILING))
            .unwrap_or_else(Instant::now),
        cancel_rx,
    };
    let handle = CancelHandle {
        cancel_tx: Arc::new(cancel_tx),
    };
    (handle, context)
}
