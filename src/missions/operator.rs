//! # Mission operators.
//!
//! [`MissionOperator`] is the double-dispatch target of
//! [`MissionSpecification::execute`]: one arm per mission variant. Because the
//! variant set is closed, adding a variant means adding an arm here.
//!
//! [`OldFool`] is the operator used at runtime. It borrows the mission it
//! was built for and the scheduler to defer work onto; build one per
//! execution attempt and drop it afterwards.

use std::sync::Arc;

use super::{MissionSpecification, SequentialMission, SinglePartMission};
use crate::schedule::Scheduler;

/// Turns mission variants into scheduled work.
pub trait MissionOperator {
    /// Entry point: executes the mission this operator was built against.
    fn schedule_active_missions(&self);

    /// Arm for [`MissionSpecification::SinglePart`].
    fn execute_single(&self, mission: &Arc<SinglePartMission>);

    /// Arm for [`MissionSpecification::Sequential`].
    fn execute_sequential(&self, mission: &SequentialMission);
}

/// Operator that defers single-part missions onto a [`Scheduler`].
///
/// ## Example
/// ```rust
/// use missionroom::{MissionOperator, MissionSpecification, OldFool, Queued};
///
/// let queue = Queued::new();
/// let spec = MissionSpecification::single("smoke", || {});
///
/// OldFool::new(&spec, &queue).schedule_active_missions();
/// assert!(!spec.is_complete()); // scheduled, not run yet
///
/// queue.run_pending();
/// assert!(spec.is_complete());
/// ```
pub struct OldFool<'a> {
    mission: &'a MissionSpecification,
    scheduler: &'a dyn Scheduler,
}

impl<'a> OldFool<'a> {
    pub fn new(mission: &'a MissionSpecification, scheduler: &'a dyn Scheduler) -> Self {
        Self { mission, scheduler }
    }

    /// Dispatches any mission through this operator.
    pub fn execute(&self, mission: &MissionSpecification) {
        mission.execute(self);
    }
}

impl MissionOperator for OldFool<'_> {
    fn schedule_active_missions(&self) {
        self.execute(self.mission);
    }

    fn execute_single(&self, mission: &Arc<SinglePartMission>) {
        if mission.is_complete() {
            tracing::debug!(mission = mission.name(), "already complete; skipped");
            return;
        }

        tracing::debug!(mission = mission.name(), "scheduling");
        let mission = Arc::clone(mission);
        self.scheduler.defer(Box::new(move || {
            if mission.run() {
                tracing::debug!(mission = mission.name(), "complete");
            }
        }));
    }

    fn execute_sequential(&self, mission: &SequentialMission) {
        match mission.next_mission() {
            Some(next) => self.execute(next),
            None => tracing::trace!("end of mission chain"),
        }
    }
}
