//! # Core scheduler trait
//!
//! `Scheduler` is the seam between mission dispatch and whatever actually runs
//! work. An implementation receives boxed `FnOnce` actions, so each one can be
//! invoked at most once by construction.
//!
//! ## Contract
//! - `defer` never reports failure back to the caller.
//! - An action that is never run simply leaves its mission incomplete.
//! - Submitted actions cannot be withdrawn.

use std::sync::Arc;

/// Zero-argument unit of work handed to a [`Scheduler`].
pub type DeferredAction = Box<dyn FnOnce() + Send + 'static>;

/// Accepts deferred actions for eventual, at-most-once execution.
pub trait Scheduler: Send + Sync {
    fn defer(&self, action: DeferredAction);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn defer(&self, action: DeferredAction) {
        (**self).defer(action)
    }
}

/// Runs every action on the caller's thread, before `defer` returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Scheduler for Immediate {
    fn defer(&self, action: DeferredAction) {
        action();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn immediate_runs_inline() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        Immediate.defer(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn shared_handles_forward() {
        let shared: Arc<dyn Scheduler> = Arc::new(Immediate);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        shared.defer(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
