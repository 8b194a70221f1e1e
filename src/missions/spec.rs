//! # Mission specifications.
//!
//! A mission is either a [`SinglePartMission`] (a named operation with a
//! completion flag) or a [`SequentialMission`] (a link pointing at the next
//! mission of a chain). [`MissionSpecification`] is the closed enum over both.
//!
//! ## Rules
//! - A single-part operation runs **at most once**: the deferred action takes
//!   it out of its slot, so a second submission finds nothing to run.
//! - `is_complete` flips `false → true` exactly once, strictly after the
//!   operation returned. A panicking operation leaves the mission incomplete.
//! - Sequential missions own no work; they only forward to `next_mission`.
//! - Clones share state: cloning a spec never duplicates a mission.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::MissionOperator;

/// Body of a single-part mission.
pub type Operation = Box<dyn FnOnce() + Send + 'static>;

/// One executable step.
pub struct SinglePartMission {
    name: Cow<'static, str>,
    operation: Mutex<Option<Operation>>,
    is_complete: AtomicBool,
}

impl SinglePartMission {
    /// Creates an incomplete mission named `name` running `operation`.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, operation: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            name: name.into(),
            operation: Mutex::new(Some(Box::new(operation))),
            is_complete: AtomicBool::new(false),
        }
    }

    /// Human-readable mission name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the operation has run to completion.
    pub fn is_complete(&self) -> bool {
        self.is_complete.load(Ordering::Acquire)
    }

    /// Runs the operation if nobody has taken it yet, then marks completion.
    ///
    /// Returns `false` when the operation was already taken.
    pub(crate) fn run(&self) -> bool {
        let operation = self.operation.lock().take();
        match operation {
            Some(operation) => {
                operation();
                self.is_complete.store(true, Ordering::Release);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for SinglePartMission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinglePartMission")
            .field("name", &self.name)
            .field("is_complete", &self.is_complete())
            .finish()
    }
}

/// A link in a chain of missions.
#[derive(Debug, Default)]
pub struct SequentialMission {
    next_mission: Option<MissionSpecification>,
}

impl SequentialMission {
    pub fn new(next_mission: Option<MissionSpecification>) -> Self {
        Self { next_mission }
    }

    /// A link that terminates the chain.
    pub fn end() -> Self {
        Self::default()
    }

    pub fn next_mission(&self) -> Option<&MissionSpecification> {
        self.next_mission.as_ref()
    }
}

/// Closed set of mission variants.
///
/// Equality is identity: two specs are equal when they share the same mission.
#[derive(Clone, Debug)]
pub enum MissionSpecification {
    SinglePart(Arc<SinglePartMission>),
    Sequential(Arc<SequentialMission>),
}

impl MissionSpecification {
    /// Shorthand for a [`SinglePartMission`] spec.
    ///
    /// ## Example
    /// ```rust
    /// use missionroom::MissionSpecification;
    ///
    /// let spec = MissionSpecification::single("adds", || assert_eq!(1 + 1, 2));
    /// assert_eq!(spec.name(), Some("adds"));
    /// assert!(!spec.is_complete());
    /// ```
    pub fn single<F>(name: impl Into<Cow<'static, str>>, operation: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        MissionSpecification::SinglePart(Arc::new(SinglePartMission::new(name, operation)))
    }

    /// Shorthand for a [`SequentialMission`] spec forwarding to `next`.
    pub fn sequential(next: Option<MissionSpecification>) -> Self {
        MissionSpecification::Sequential(Arc::new(SequentialMission::new(next)))
    }

    /// Dispatches to the operator arm for this variant.
    pub fn execute<O: MissionOperator + ?Sized>(&self, operator: &O) {
        match self {
            MissionSpecification::SinglePart(mission) => operator.execute_single(mission),
            MissionSpecification::Sequential(mission) => operator.execute_sequential(mission),
        }
    }

    /// Name of a single-part mission; `None` for chain links.
    pub fn name(&self) -> Option<&str> {
        match self {
            MissionSpecification::SinglePart(mission) => Some(mission.name()),
            MissionSpecification::Sequential(_) => None,
        }
    }

    /// Single-part: its flag. Sequential: true when the rest of the chain is.
    pub fn is_complete(&self) -> bool {
        match self {
            MissionSpecification::SinglePart(mission) => mission.is_complete(),
            MissionSpecification::Sequential(mission) => mission
                .next_mission()
                .map_or(true, MissionSpecification::is_complete),
        }
    }
}

impl PartialEq for MissionSpecification {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MissionSpecification::SinglePart(a), MissionSpecification::SinglePart(b)) => {
                Arc::ptr_eq(a, b)
            }
            (MissionSpecification::Sequential(a), MissionSpecification::Sequential(b)) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl Eq for MissionSpecification {}

impl From<SinglePartMission> for MissionSpecification {
    fn from(mission: SinglePartMission) -> Self {
        MissionSpecification::SinglePart(Arc::new(mission))
    }
}

impl From<SequentialMission> for MissionSpecification {
    fn from(mission: SequentialMission) -> Self {
        MissionSpecification::Sequential(Arc::new(mission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Counts dispatches per variant and records each chain link visited.
    #[derive(Default)]
    struct Tally {
        single: AtomicUsize,
        sequential: AtomicUsize,
        links: Mutex<Vec<usize>>,
    }

    impl MissionOperator for Tally {
        fn schedule_active_missions(&self) {}

        fn execute_single(&self, _mission: &Arc<SinglePartMission>) {
            self.single.fetch_add(1, Ordering::SeqCst);
        }

        fn execute_sequential(&self, mission: &SequentialMission) {
            self.sequential.fetch_add(1, Ordering::SeqCst);
            self.links.lock().push(mission as *const SequentialMission as usize);
            if let Some(next) = mission.next_mission() {
                next.execute(self);
            }
        }
    }

    /// Builds a chain of `links` sequential missions and returns it with the
    /// address of every link, root first.
    fn chain_with_links(
        links: usize,
        terminal: Option<MissionSpecification>,
    ) -> (MissionSpecification, Vec<usize>) {
        let mut spec = terminal;
        let mut addresses = Vec::with_capacity(links);
        for _ in 0..links {
            let link = Arc::new(SequentialMission::new(spec.take()));
            addresses.push(Arc::as_ptr(&link) as usize);
            spec = Some(MissionSpecification::Sequential(link));
        }
        addresses.reverse();
        let root = spec.unwrap_or_else(|| MissionSpecification::sequential(None));
        (root, addresses)
    }

    fn chain(links: usize, terminal: Option<MissionSpecification>) -> MissionSpecification {
        chain_with_links(links, terminal).0
    }

    #[test]
    fn single_part_runs_once_and_completes() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mission = SinglePartMission::new("once", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!mission.is_complete());
        assert!(mission.run());
        assert!(!mission.run());
        assert!(mission.is_complete());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_operation_stays_incomplete() {
        let mission = Arc::new(SinglePartMission::new("boom", || panic!("boom")));
        let runner = Arc::clone(&mission);
        let joined = std::thread::spawn(move || runner.run()).join();

        assert!(joined.is_err());
        assert!(!mission.is_complete());
        assert!(!mission.run());
    }

    #[test]
    fn dispatch_visits_every_link_once() {
        let tally = Tally::default();
        let spec = chain(4, Some(MissionSpecification::single("leaf", || {})));

        spec.execute(&tally);

        assert_eq!(tally.sequential.load(Ordering::SeqCst), 4);
        assert_eq!(tally.single.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_follows_links_from_root_to_terminal() {
        let tally = Tally::default();
        let (spec, links) =
            chain_with_links(5, Some(MissionSpecification::single("leaf", || {})));

        spec.execute(&tally);

        assert_eq!(links.len(), 5);
        assert_eq!(*tally.links.lock(), links);
        assert_eq!(tally.single.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_chain_dispatches_no_single_part() {
        let tally = Tally::default();
        chain(3, None).execute(&tally);

        assert_eq!(tally.sequential.load(Ordering::SeqCst), 3);
        assert_eq!(tally.single.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn equality_is_identity() {
        let a = MissionSpecification::single("same", || {});
        let b = MissionSpecification::single("same", || {});

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a, MissionSpecification::sequential(Some(a.clone())));
    }

    #[test]
    fn sequential_completion_follows_its_chain() {
        let leaf = Arc::new(SinglePartMission::new("leaf", || {}));
        let spec = MissionSpecification::sequential(Some(MissionSpecification::SinglePart(
            Arc::clone(&leaf),
        )));

        assert!(!spec.is_complete());
        assert_eq!(spec.name(), None);
        leaf.run();
        assert!(spec.is_complete());
        assert!(MissionSpecification::from(SequentialMission::end()).is_complete());
    }
}
