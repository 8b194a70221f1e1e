//! # missionroom
//!
//! **missionroom** is the runtime kernel of a small test-execution framework.
//!
//! It combines two pieces:
//! - a hierarchical, type-routed publish/subscribe bus ([`MailRoom`]) that lets
//!   framework components announce events and subscribe to them;
//! - a minimal mission runtime that turns declarative mission specifications
//!   ([`MissionSpecification`]) into deferred, one-shot executions through a
//!   [`Scheduler`].
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────────┐     ┌──────────────────┐
//!     │  TestDiscovery   │     │  Reporter / UI   │
//!     │ (locate_tests)   │     │ (subscribe, ...) │
//!     └────────┬─────────┘     └────────▲─────────┘
//!              │ TestFound               │ typed + universal handlers
//!              ▼                         │
//! ┌──────────────────────────┐   escalate   ┌──────────────────────────┐
//! │  TestRun (satellite room)├─────────────►│  MissionControl (root)   │
//! │  - records found missions│              │  - root MailRoom         │
//! └────────┬─────────────────┘              │  - Scheduler             │
//!          │ OldFool per mission            └────────────▲─────────────┘
//!          ▼                                             │ defer(action)
//!   MissionSpecification::execute(operator) ─────────────┘
//! ```
//!
//! ### Mission lifecycle
//! ```text
//! SinglePart, incomplete ──► defer(action) ──► [scheduled] ──► operation() ──► is_complete = true
//! SinglePart, complete   ──► skipped
//! Sequential(next)       ──► next.execute(operator)
//! Sequential(None)       ──► no-op
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                        |
//! |-------------------|-----------------------------------------------------------|-------------------------------------------|
//! | **Mail**          | Exact-type routing, universal handlers, escalation        | [`MailRoom`], [`Message`]                 |
//! | **Missions**      | Closed mission variants with double dispatch              | [`MissionSpecification`], [`OldFool`]     |
//! | **Scheduling**    | Deferred at-most-once actions                             | [`Scheduler`], [`Queued`], [`TokioScheduler`] |
//! | **Control**       | Explicit root wiring and test runs                        | [`MissionControl`], [`TestRun`], [`Config`] |
//! | **Discovery**     | Interface for mission sources                             | [`TestDiscovery`], [`TestFound`]          |
//! | **Errors**        | Typed errors for delivery and runtime wiring              | [`MailError`], [`RuntimeError`]           |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`](subscribers::LogWriter), a universal subscriber that logs
//!   every announcement _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use missionroom::{Config, FixedTestDiscovery, MissionControl, MissionSpecification, TestFound};
//!
//! let control = MissionControl::new(Config::default())?;
//!
//! // Reporter at the root sees every discovered test.
//! control.mail_room().subscribe(|found: &TestFound| {
//!     println!("found {:?}", found.mission.name());
//!     Ok(())
//! });
//!
//! let ran = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&ran);
//! let spec = MissionSpecification::single("hello", move || flag.store(true, Ordering::SeqCst));
//!
//! let run = control.create_test_run();
//! run.discover(&FixedTestDiscovery::new(vec![spec.clone()]))?;
//! run.schedule_missions();
//! control.run_pending();
//!
//! assert!(ran.load(Ordering::SeqCst));
//! assert!(spec.is_complete());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod control;
mod discovery;
mod error;
mod mail;
mod missions;
mod schedule;
pub mod subscribers;

// ---- Public re-exports ----

pub use control::{Building, Config, MissionControl, Scheduling, TestRun};
pub use discovery::{FixedTestDiscovery, TestDiscovery, TestFound};
pub use error::{MailError, RuntimeError};
pub use mail::{AsAny, MailRoom, Message};
pub use missions::{
    MissionOperator, MissionSpecification, OldFool, Operation, SequentialMission,
    SinglePartMission,
};
pub use schedule::{DeferredAction, Immediate, Queued, Scheduler, TokioScheduler};
