//! Single-timer debounce.
//!
//! Every `arm` cancels the pending timer and starts a new one, so a burst of
//! edits produces one idle event after the last of them. The idle event is
//! delivered through the event loop's channel and carries the generation of
//! the arm that produced it; an event from an older generation can still be
//! queued if it was sent just before a re-arm, so the receiver checks
//! [`DebounceScheduler::is_current`] before acting on it.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct DebounceScheduler<E: Send + 'static> {
    tx: UnboundedSender<E>,
    make_event: fn(u64) -> E,
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl<E: Send + 'static> DebounceScheduler<E> {
    pub fn new(tx: UnboundedSender<E>, delay: Duration, make_event: fn(u64) -> E) -> Self {
        Self {
            tx,
            make_event,
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Re-arm with the default delay; call on every input mutation
    pub fn on_text_changed(&mut self) -> u64 {
        self.arm(self.delay)
    }

    /// Restart the timer with `delay`, replacing any pending one
    pub fn arm(&mut self, delay: Duration) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        let event = self.make_event;

        debug!("Debounce armed: generation {} in {:?}", generation, delay);

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the loop has shut down
            let _ = tx.send(event(generation));
        }));

        generation
    }

    /// Whether `generation` belongs to the most recent arm
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl<E: Send + 'static> Drop for DebounceScheduler<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
