//! Debounced search scheduling.
//!
//! Rapid query edits are coalesced into a single delayed delivery: each
//! `schedule` aborts the previous timer, so only the timer that survives
//! the quiet period delivers its query. This guarantees at most one
//! in-flight search per settled query and keeps results from an abandoned
//! keystroke sequence out of the view.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct SearchDebouncer {
    delay: Duration,
    tx: mpsc::UnboundedSender<String>,
    rx: mpsc::UnboundedReceiver<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { delay, tx, rx, pending: None }
    }

    /// (Re)start the quiet-period timer for `query`, superseding any
    /// pending timer.
    pub fn schedule(&mut self, query: impl Into<String>) {
        self.cancel();

        let tx = self.tx.clone();
        let deadline = tokio::time::Instant::now() + self.delay;
        let query = query.into();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Receiver lives as long as the debouncer; a send can only
            // fail during teardown.
            let _ = tx.send(query);
        }));
    }

    /// Abort the pending timer without delivery (query cleared or view
    /// exited).
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Wait for the next settled query. Returns `None` only if the channel
    /// closed during teardown.
    pub async fn settled(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Non-blocking check for a settled query.
    pub fn try_settled(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}
