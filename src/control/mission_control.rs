//! # MissionControl: root mail room plus scheduler.
//!
//! Built once per process (or per test harness) and passed by reference to
//! whatever needs to announce, subscribe or schedule. There is no global
//! instance.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::{Building, Config, Scheduling, TestRun};
use crate::error::RuntimeError;
use crate::mail::{MailRoom, Message};
use crate::schedule::{DeferredAction, Immediate, Queued, Scheduler, TokioScheduler};

enum Engine {
    Immediate(Immediate),
    Queued(Arc<Queued>),
    Tokio(Arc<TokioScheduler>),
    Custom(Box<dyn Scheduler>),
}

/// Root of the runtime object graph.
///
/// ## Example
/// ```rust
/// use missionroom::{Config, FixedTestDiscovery, MissionControl, MissionSpecification};
///
/// let control = MissionControl::new(Config::default()).unwrap();
/// let run = control.create_test_run();
///
/// let spec = MissionSpecification::single("smoke", || {});
/// run.discover(&FixedTestDiscovery::new(vec![spec.clone()])).unwrap();
///
/// assert_eq!(run.schedule_missions(), 1);
/// assert_eq!(control.run_pending(), 1);
/// assert!(spec.is_complete());
/// ```
pub struct MissionControl {
    config: Config,
    mail_room: MailRoom,
    engine: Engine,
}

impl MissionControl {
    /// Builds mission control with the scheduler named by `config.scheduling`.
    ///
    /// Fails with [`RuntimeError::NoRuntime`] if `Scheduling::Tokio` is
    /// requested outside of a tokio runtime.
    pub fn new(config: Config) -> Result<Self, RuntimeError> {
        let engine = match config.scheduling {
            Scheduling::Immediate => Engine::Immediate(Immediate),
            Scheduling::Queued => Engine::Queued(Arc::new(Queued::new())),
            Scheduling::Tokio => Engine::Tokio(Arc::new(TokioScheduler::current()?)),
        };
        tracing::debug!(scheduling = ?config.scheduling, "mission control ready");
        Ok(Self {
            config,
            mail_room: MailRoom::new(),
            engine,
        })
    }

    /// Builds mission control around a host-provided scheduler.
    ///
    /// `config.scheduling` is ignored.
    pub fn with_scheduler(config: Config, scheduler: impl Scheduler + 'static) -> Self {
        Self {
            config,
            mail_room: MailRoom::new(),
            engine: Engine::Custom(Box::new(scheduler)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The root mail room every satellite escalates to.
    pub fn mail_room(&self) -> &MailRoom {
        &self.mail_room
    }

    pub fn scheduler(&self) -> &dyn Scheduler {
        match &self.engine {
            Engine::Immediate(scheduler) => scheduler,
            Engine::Queued(scheduler) => &**scheduler,
            Engine::Tokio(scheduler) => &**scheduler,
            Engine::Custom(scheduler) => &**scheduler,
        }
    }

    /// Defers `action` onto the configured scheduler.
    pub fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let action: DeferredAction = Box::new(action);
        self.scheduler().defer(action);
    }

    /// Runs queued actions (queued scheduling only); returns how many ran.
    pub fn run_pending(&self) -> usize {
        match &self.engine {
            Engine::Queued(queue) => queue.run_pending(),
            _ => 0,
        }
    }

    /// Waits until every deferred action submitted so far has run.
    ///
    /// Queued scheduling drains its queue inline; tokio scheduling awaits its
    /// blocking tasks. Immediate and custom schedulers have nothing to wait for.
    pub async fn drain(&self) -> Result<usize, RuntimeError> {
        match &self.engine {
            Engine::Queued(queue) => Ok(queue.run_pending()),
            Engine::Tokio(scheduler) => scheduler.drain().await,
            Engine::Immediate(_) | Engine::Custom(_) => Ok(0),
        }
    }

    /// Creates a building whose mail room is a satellite of this one.
    pub fn create_building(&self) -> Building {
        Building::new(self)
    }

    /// Creates a test run whose mail room is a satellite of this one.
    pub fn create_test_run(&self) -> TestRun<'_> {
        TestRun::new(self)
    }

    /// Relays messages of type `M` reaching the root room into a bounded channel.
    pub fn relay<M: Message + Clone>(&self) -> mpsc::Receiver<M> {
        crate::subscribers::relay(&self.mail_room, self.config.relay_capacity_clamped())
    }
}

impl std::fmt::Debug for MissionControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MissionControl")
            .field("config", &self.config)
            .field("mail_room", &self.mail_room)
            .finish()
    }
}
