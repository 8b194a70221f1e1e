//! # TokioScheduler: deferred actions on a tokio runtime
//!
//! Each deferred action runs on the runtime's blocking pool via
//! [`Handle::spawn_blocking`], since mission operations are synchronous.
//!
//! ## Rules
//! - `defer` returns immediately; the action runs on some pool thread.
//! - [`TokioScheduler::drain`] awaits every submitted action, including
//!   actions submitted while draining.
//! - Panics are caught inside the pool task and counted; `drain` reports
//!   them. Completions and panics are counted per drain.
//! - `defer` forgets handles of actions that already finished, so hosts that
//!   never drain do not accumulate them.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::{DeferredAction, Scheduler};
use crate::error::RuntimeError;

/// Outcome counters shared with pool tasks.
#[derive(Default)]
struct Outcomes {
    finished: AtomicUsize,
    panicked: AtomicUsize,
}

/// Scheduler backed by a tokio runtime's blocking pool.
pub struct TokioScheduler {
    handle: Handle,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
    outcomes: Arc<Outcomes>,
}

impl TokioScheduler {
    /// Creates a scheduler that spawns onto `handle`.
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            in_flight: Mutex::new(Vec::new()),
            outcomes: Arc::new(Outcomes::default()),
        }
    }

    /// Creates a scheduler on the runtime the caller is running in.
    ///
    /// Fails with [`RuntimeError::NoRuntime`] outside of a tokio runtime.
    pub fn current() -> Result<Self, RuntimeError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| RuntimeError::NoRuntime)
    }

    /// Number of submitted actions that have not finished yet.
    pub fn pending(&self) -> usize {
        self.in_flight
            .lock()
            .iter()
            .filter(|join| !join.is_finished())
            .count()
    }

    /// Awaits all submitted actions.
    ///
    /// Returns how many actions finished normally since the last drain, or
    /// [`RuntimeError::ActionPanicked`] if any of them panicked.
    pub async fn drain(&self) -> Result<usize, RuntimeError> {
        loop {
            let batch = std::mem::take(&mut *self.in_flight.lock());
            if batch.is_empty() {
                break;
            }
            for join in batch {
                // Panics are caught inside the task; a join error here means
                // the runtime shut down before the action ran.
                let _ = join.await;
            }
        }

        let finished = self.outcomes.finished.swap(0, Ordering::SeqCst);
        let panicked = self.outcomes.panicked.swap(0, Ordering::SeqCst);
        if panicked > 0 {
            tracing::warn!(panicked, finished, "deferred actions panicked");
            return Err(RuntimeError::ActionPanicked { count: panicked });
        }
        Ok(finished)
    }
}

impl Scheduler for TokioScheduler {
    fn defer(&self, action: DeferredAction) {
        let outcomes = Arc::clone(&self.outcomes);
        let join = self.handle.spawn_blocking(move || {
            match panic::catch_unwind(AssertUnwindSafe(action)) {
                Ok(()) => outcomes.finished.fetch_add(1, Ordering::SeqCst),
                Err(_) => outcomes.panicked.fetch_add(1, Ordering::SeqCst),
            };
        });

        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|join| !join.is_finished());
        in_flight.push(join);
    }
}

impl std::fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("in_flight", &self.in_flight.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_requires_a_runtime() {
        assert!(matches!(
            TokioScheduler::current(),
            Err(RuntimeError::NoRuntime)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn drain_waits_for_every_action() {
        let scheduler = TokioScheduler::current().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..8 {
            let counter = Arc::clone(&hits);
            scheduler.defer(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        assert_eq!(scheduler.drain().await.unwrap(), 8);
        assert_eq!(hits.load(Ordering::SeqCst), 8);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn defer_forgets_finished_actions() {
        let scheduler = TokioScheduler::current().unwrap();
        for _ in 0..4 {
            scheduler.defer(Box::new(|| {}));
        }

        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while scheduler.pending() > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        scheduler.defer(Box::new(|| {}));
        assert_eq!(scheduler.in_flight.lock().len(), 1);
        assert_eq!(scheduler.drain().await.unwrap(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn panics_of_forgotten_actions_are_still_reported() {
        let scheduler = TokioScheduler::current().unwrap();
        scheduler.defer(Box::new(|| panic!("early")));

        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while scheduler.pending() > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        scheduler.defer(Box::new(|| {}));

        let err = scheduler.drain().await.unwrap_err();
        assert!(matches!(err, RuntimeError::ActionPanicked { count: 1 }));
        assert_eq!(scheduler.drain().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn drain_reports_panics() {
        let scheduler = TokioScheduler::current().unwrap();
        scheduler.defer(Box::new(|| panic!("boom")));
        scheduler.defer(Box::new(|| {}));

        let err = scheduler.drain().await.unwrap_err();
        assert!(matches!(err, RuntimeError::ActionPanicked { count: 1 }));
    }
}
