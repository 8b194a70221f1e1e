//! Mission control: the explicitly wired root of a test runtime.
//!
//! - [`Config`] selects the scheduling policy and relay defaults.
//! - [`MissionControl`] owns the root [`MailRoom`](crate::MailRoom) and the scheduler.
//! - [`Building`] a satellite room for components grouped together.
//! - [`TestRun`] a satellite room collecting discovered missions and scheduling them.
//!
//! ```text
//!                 MissionControl
//!                 ├─ mail_room (root) ◄──────── escalation ───────┐
//!                 └─ scheduler                                    │
//!                      ▲                                          │
//!   TestRun ───────────┤ OldFool per found mission                │
//!   └─ mail_room (satellite) ── TestFound ── announce ────────────┘
//! ```

mod building;
mod config;
mod mission_control;
mod test_run;

pub use building::Building;
pub use config::{Config, Scheduling};
pub use mission_control::MissionControl;
pub use test_run::TestRun;
