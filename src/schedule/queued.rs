//! # Queued: FIFO scheduler drained on demand
//!
//! Actions are stored in submission order and run only when the host calls
//! [`Queued::run_pending`]. Between submission and draining a mission is
//! observably "scheduled but not yet run".

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::{DeferredAction, Scheduler};

/// FIFO of deferred actions.
#[derive(Default)]
pub struct Queued {
    actions: Mutex<VecDeque<DeferredAction>>,
}

impl Queued {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs queued actions in FIFO order until the queue is empty.
    ///
    /// Actions queued by running actions are run in the same call.
    /// The queue lock is not held while an action runs. Returns the number
    /// of actions run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.actions.lock().pop_front();
            let Some(action) = next else {
                break;
            };
            action();
            ran += 1;
        }
        if ran > 0 {
            tracing::debug!(ran, "drained deferred actions");
        }
        ran
    }

    /// Runs at most one queued action. Returns `false` if the queue was empty.
    pub fn run_next(&self) -> bool {
        let next = self.actions.lock().pop_front();
        match next {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    /// Number of actions waiting to run.
    pub fn len(&self) -> usize {
        self.actions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.lock().is_empty()
    }
}

impl Scheduler for Queued {
    fn defer(&self, action: DeferredAction) {
        self.actions.lock().push_back(action);
    }
}

impl std::fmt::Debug for Queued {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queued").field("pending", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn push(queue: &Queued, log: &Arc<Mutex<Vec<u32>>>, value: u32) {
        let log = Arc::clone(log);
        queue.defer(Box::new(move || log.lock().push(value)));
    }

    #[test]
    fn nothing_runs_until_drained() {
        let queue = Queued::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        push(&queue, &log, 1);
        push(&queue, &log, 2);

        assert_eq!(queue.len(), 2);
        assert!(log.lock().is_empty());

        assert_eq!(queue.run_pending(), 2);
        assert_eq!(*log.lock(), vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn run_next_takes_one_action() {
        let queue = Queued::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        push(&queue, &log, 1);
        push(&queue, &log, 2);

        assert!(queue.run_next());
        assert_eq!(*log.lock(), vec![1]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn actions_may_queue_more_work() {
        let queue = Arc::new(Queued::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let (inner_queue, inner_log) = (Arc::clone(&queue), Arc::clone(&log));
        queue.defer(Box::new(move || {
            inner_log.lock().push(1);
            push(&inner_queue, &inner_log, 2);
        }));

        assert_eq!(queue.run_pending(), 2);
        assert_eq!(*log.lock(), vec![1, 2]);
    }
}
