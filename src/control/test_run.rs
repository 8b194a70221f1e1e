//! # TestRun: one pass of discovery and scheduling.
//!
//! A test run owns a satellite of the mission control mail room. Every
//! [`TestFound`] reaching that room is recorded, then
//! [`TestRun::schedule_missions`] hands each recorded mission to an
//! [`OldFool`] bound to the mission control scheduler.
//!
//! Announcements made on the run's room escalate to mission control, so a
//! reporter subscribed at the root sees every run.

use std::sync::Arc;

use parking_lot::Mutex;

use super::MissionControl;
use crate::discovery::{TestDiscovery, TestFound};
use crate::error::MailError;
use crate::mail::MailRoom;
use crate::missions::{MissionOperator, MissionSpecification, OldFool};

pub struct TestRun<'a> {
    control: &'a MissionControl,
    mail_room: MailRoom,
    missions: Arc<Mutex<Vec<MissionSpecification>>>,
}

impl<'a> TestRun<'a> {
    pub(super) fn new(control: &'a MissionControl) -> Self {
        let mail_room = control.mail_room().create_satellite_office();
        let missions = Arc::new(Mutex::new(Vec::new()));

        let found = Arc::clone(&missions);
        mail_room.subscribe(move |message: &TestFound| {
            found.lock().push(message.mission.clone());
            Ok(())
        });

        Self {
            control,
            mail_room,
            missions,
        }
    }

    /// This run's satellite room.
    pub fn mail_room(&self) -> &MailRoom {
        &self.mail_room
    }

    /// Runs `discovery` against this run's room.
    pub fn discover(&self, discovery: &dyn TestDiscovery) -> Result<(), MailError> {
        discovery.discover_tests(&self.mail_room)
    }

    /// Missions found so far, in discovery order.
    pub fn missions(&self) -> Vec<MissionSpecification> {
        self.missions.lock().clone()
    }

    /// Dispatches every found mission; returns how many were dispatched.
    ///
    /// Completed missions are skipped by the operator, so calling this again
    /// only reschedules what has not run yet.
    pub fn schedule_missions(&self) -> usize {
        let missions = self.missions();
        for mission in &missions {
            OldFool::new(mission, self.control.scheduler()).schedule_active_missions();
        }
        tracing::debug!(missions = missions.len(), "test run scheduled");
        missions.len()
    }

    /// True when every found mission is complete.
    pub fn is_complete(&self) -> bool {
        self.missions.lock().iter().all(MissionSpecification::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Config, Scheduling};
    use crate::discovery::FixedTestDiscovery;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn control() -> MissionControl {
        MissionControl::new(Config {
            scheduling: Scheduling::Queued,
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_run_mail_room_is_a_satellite_of_mission_control() {
        let control = control();
        let run = control.create_test_run();

        let home = run.mail_room().home_office().unwrap();
        assert!(MailRoom::ptr_eq(&home, control.mail_room()));
    }

    #[test]
    fn discovered_missions_are_recorded_and_escalated() {
        let control = control();
        let run = control.create_test_run();
        let at_root = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&at_root);
        control.mail_room().subscribe(move |_: &TestFound| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let first = MissionSpecification::single("first", || {});
        let second = MissionSpecification::single("second", || {});
        run.discover(&FixedTestDiscovery::new(vec![first.clone(), second.clone()]))
            .unwrap();

        assert_eq!(run.missions(), vec![first, second]);
        assert_eq!(at_root.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn scheduled_missions_complete_when_the_queue_drains() {
        let control = control();
        let run = control.create_test_run();
        let hits = Arc::new(AtomicUsize::new(0));
        let missions = (0..3)
            .map(|i| {
                let counter = Arc::clone(&hits);
                MissionSpecification::single(format!("t{i}"), move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();
        run.discover(&FixedTestDiscovery::new(missions)).unwrap();

        assert_eq!(run.schedule_missions(), 3);
        assert!(!run.is_complete());

        assert_eq!(control.run_pending(), 3);
        assert!(run.is_complete());
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        run.schedule_missions();
        assert_eq!(control.run_pending(), 0);
    }

    #[test]
    fn runs_do_not_see_each_others_discoveries() {
        let control = control();
        let first = control.create_test_run();
        let second = control.create_test_run();

        first
            .discover(&FixedTestDiscovery::new(vec![MissionSpecification::single(
                "only-first",
                || {},
            )]))
            .unwrap();

        assert_eq!(first.missions().len(), 1);
        assert!(second.missions().is_empty());
    }
}
