//! # Building: a satellite office of mission control.
//!
//! A building groups components that share one mail room. Its room is a
//! satellite of the mission control room, so everything announced inside a
//! building escalates to the root.

use super::MissionControl;
use crate::mail::MailRoom;

#[derive(Debug, Clone)]
pub struct Building {
    mail_room: MailRoom,
}

impl Building {
    pub(super) fn new(control: &MissionControl) -> Self {
        Self {
            mail_room: control.mail_room().create_satellite_office(),
        }
    }

    /// This building's satellite room.
    pub fn mail_room(&self) -> &MailRoom {
        &self.mail_room
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Config;
    use crate::mail::Message;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Knock;
    impl Message for Knock {}

    #[test]
    fn building_mail_room_is_a_satellite_of_mission_control() {
        let control = MissionControl::new(Config::default()).unwrap();
        let building = control.create_building();

        let home = building.mail_room().home_office().unwrap();
        assert!(MailRoom::ptr_eq(&home, control.mail_room()));
    }

    #[test]
    fn buildings_get_their_own_rooms() {
        let control = MissionControl::new(Config::default()).unwrap();
        let first = control.create_building();
        let second = control.create_building();

        assert!(!MailRoom::ptr_eq(first.mail_room(), second.mail_room()));
        assert!(!MailRoom::ptr_eq(first.mail_room(), control.mail_room()));
    }

    #[test]
    fn building_mail_escalates_to_mission_control() {
        let control = MissionControl::new(Config::default()).unwrap();
        let building = control.create_building();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        control.mail_room().subscribe(move |_: &Knock| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        building.mail_room().announce(&Knock).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
