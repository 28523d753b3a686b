//! Debounce gate for bursts of query changes.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Suppresses all but the last of a rapid burst of calls.
///
/// Each [`call`](Self::call) cancels the previously scheduled one, if it has
/// not fired yet, and schedules the new future to run after the quiet period.
/// A future that has fired is never cancelled by later calls; it runs to
/// completion on its own.
///
/// Must be used from within a tokio runtime. Cheap to clone; clones share the
/// same pending slot.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    /// Bumped on every call; a timer only fires if it still holds the latest value.
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Returns the quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `fut` to run once the quiet period elapses without another call.
    pub fn call<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(mut slot) = self.slot.lock() else {
            log::error!("Debouncer::call: pending slot poisoned");
            return;
        };

        if let Some(previous) = slot.pending.take() {
            log::trace!("Debouncer::call: superseding pending call");
            previous.abort();
        }
        slot.generation += 1;

        let generation = slot.generation;
        let delay = self.delay;
        let shared = Arc::clone(&self.slot);
        slot.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let Ok(mut slot) = shared.lock() else {
                    return;
                };
                if slot.generation != generation {
                    return;
                }
                slot.pending = None;
            }
            fut.await;
        }));
    }

    /// Cancels the pending call, if any.
    ///
    /// Returns `true` if a call was waiting.
    pub fn cancel(&self) -> bool {
        let Ok(mut slot) = self.slot.lock() else {
            return false;
        };
        slot.generation += 1;
        match slot.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Returns `true` if a call is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .map(|slot| slot.pending.is_some())
            .unwrap_or(false)
    }
}
