//! # Test discovery.
//!
//! A [`TestDiscovery`] locates missions in some external source and reports
//! them one at a time. [`TestDiscovery::discover_tests`] turns each report into
//! a [`TestFound`] announcement, so anything interested in discovered tests
//! only needs a subscription on a mail room.
//!
//! ```text
//! locate_tests(report) ──► report(mission) ──► room.announce(TestFound { mission })
//! ```

use crate::error::MailError;
use crate::mail::{MailRoom, Message};
use crate::missions::MissionSpecification;

/// Announced once per discovered mission, in discovery order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestFound {
    pub mission: MissionSpecification,
}

impl TestFound {
    pub fn new(mission: MissionSpecification) -> Self {
        Self { mission }
    }
}

impl Message for TestFound {}

/// Source of missions.
pub trait TestDiscovery {
    /// Calls `report` once per mission, in discovery order.
    fn locate_tests(&self, report: &mut dyn FnMut(MissionSpecification));

    /// Announces a [`TestFound`] on `room` for every located mission.
    ///
    /// Stops announcing at the first delivery error and returns it; missions
    /// reported after that are ignored.
    fn discover_tests(&self, room: &MailRoom) -> Result<(), MailError> {
        let mut outcome = Ok(());
        self.locate_tests(&mut |mission| {
            if outcome.is_ok() {
                outcome = room.announce(&TestFound::new(mission));
            }
        });
        outcome
    }
}

/// Discovery over a hard-coded list of missions.
#[derive(Clone, Debug, Default)]
pub struct FixedTestDiscovery {
    missions: Vec<MissionSpecification>,
}

impl FixedTestDiscovery {
    pub fn new(missions: Vec<MissionSpecification>) -> Self {
        Self { missions }
    }
}

impl TestDiscovery for FixedTestDiscovery {
    fn locate_tests(&self, report: &mut dyn FnMut(MissionSpecification)) {
        for mission in &self.missions {
            report(mission.clone());
        }
    }
}
