//! # Scheduling surface for deferred, one-shot actions.
//!
//! The core only needs one capability from its host: [`Scheduler::defer`].
//! Where and when the action runs is the scheduler's policy.
//!
//! | Scheduler          | Policy                                             |
//! |--------------------|----------------------------------------------------|
//! | [`Immediate`]      | runs the action inline, before `defer` returns     |
//! | [`Queued`]         | FIFO queue drained by [`Queued::run_pending`]      |
//! | [`TokioScheduler`] | `spawn_blocking` on a tokio runtime, awaited by `drain` |

mod queued;
mod runtime;
mod scheduler;

pub use queued::Queued;
pub use runtime::TokioScheduler;
pub use scheduler::{DeferredAction, Immediate, Scheduler};
