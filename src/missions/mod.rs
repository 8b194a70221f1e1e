//! # Missions: what to run and how it gets scheduled.
//!
//! - [`MissionSpecification`] closed sum of the two mission variants
//! - [`SinglePartMission`] one named operation plus a completion flag
//! - [`SequentialMission`] a forwarding link to the next mission
//! - [`MissionOperator`] double-dispatch target for mission variants
//! - [`OldFool`] the operator that hands single-part missions to a [`Scheduler`](crate::Scheduler)
//!
//! ## Lifecycle
//! ```text
//! OldFool::schedule_active_missions()
//!   └─► mission.execute(operator)
//!         ├─ Sequential { next: None }     ─► no-op
//!         ├─ Sequential { next: Some(m) }  ─► m.execute(operator)
//!         └─ SinglePart
//!               ├─ complete                ─► no-op
//!               └─ not complete            ─► scheduler.defer(action)
//!                                                 └─ later: operation(); is_complete = true
//! ```

mod operator;
mod spec;

pub use operator::{MissionOperator, OldFool};
pub use spec::{MissionSpecification, Operation, SequentialMission, SinglePartMission};
