//! # Runtime configuration.
//!
//! [`Config`] is consumed by [`MissionControl::new`](crate::MissionControl::new).
//!
//! ## Sentinel values
//! - `relay_capacity = 0` → clamped to 1

/// Which scheduler mission control builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheduling {
    /// Run deferred actions inline.
    Immediate,
    /// Queue deferred actions until `MissionControl::run_pending`.
    #[default]
    Queued,
    /// Run deferred actions on the current tokio runtime's blocking pool.
    Tokio,
}

/// Mission control settings.
///
/// ## Field semantics
/// - `scheduling`: policy for deferred mission actions
/// - `relay_capacity`: default queue size for [`relay`](crate::subscribers::relay) receivers
#[derive(Clone, Debug)]
pub struct Config {
    pub scheduling: Scheduling,
    pub relay_capacity: usize,
}

impl Config {
    /// Relay capacity clamped to a minimum of 1.
    #[inline]
    pub fn relay_capacity_clamped(&self) -> usize {
        self.relay_capacity.max(1)
    }
}

impl Default for Config {
    /// - `scheduling = Scheduling::Queued`
    /// - `relay_capacity = 1024`
    fn default() -> Self {
        Self {
            scheduling: Scheduling::default(),
            relay_capacity: 1024,
        }
    }
}
