//! # MailRoom: hierarchical publish/subscribe node
//!
//! A [`MailRoom`] owns two registries:
//! - **typed** subscribers, keyed by the exact concrete message type;
//! - **universal** subscribers, invoked for every message.
//!
//! It may also point at a *home office*. Announcing on a satellite
//! notifies the satellite first and then escalates the same message to
//! the home office, recursively, until a root is reached.
//!
//! ## Rules
//! - Delivery is synchronous and depth-first: `announce` returns only after
//!   every handler in this room and in all rooms above it has run.
//! - Typed handlers run before universal handlers; both in subscription order.
//! - Lists are traversed **by index over the live list**. A handler that
//!   subscribes to the type being delivered (on the same room) is reached by
//!   the delivery already in flight.
//! - The registry lock is released before each handler call, so handlers may
//!   freely subscribe or announce on any room.
//! - The first handler error stops the delivery: nothing after it runs
//!   (neither in this room nor above), and the error is returned.
//! - The home office link is a [`Weak`]: satellites never keep their home
//!   office alive. A satellite whose home office is gone acts as a root.
//! - Handlers that announce their own trigger type recurse without bound.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::MailError;
use crate::mail::Message;

type Handler = Arc<dyn Fn(&dyn Message) -> Result<(), MailError> + Send + Sync>;

/// Which list of a registry a delivery loop walks.
#[derive(Clone, Copy)]
enum List {
    Typed(TypeId),
    Universal,
}

#[derive(Default)]
struct Registry {
    by_type: HashMap<TypeId, Vec<Handler>>,
    universal: Vec<Handler>,
}

impl Registry {
    fn nth(&self, list: List, index: usize) -> Option<Handler> {
        let handlers = match list {
            List::Typed(key) => self.by_type.get(&key)?,
            List::Universal => &self.universal,
        };
        handlers.get(index).cloned()
    }
}

struct Office {
    home_office: Option<Weak<Office>>,
    depth: usize,
    registry: Mutex<Registry>,
}

/// Handle to one node of the mail bus.
///
/// Cloning is cheap and yields another handle to the **same** room.
#[derive(Clone)]
pub struct MailRoom {
    office: Arc<Office>,
}

impl MailRoom {
    /// Creates a root mail room (no home office).
    #[must_use]
    pub fn new() -> Self {
        Self {
            office: Arc::new(Office {
                home_office: None,
                depth: 0,
                registry: Mutex::new(Registry::default()),
            }),
        }
    }

    /// Creates a new room whose home office is `self`.
    ///
    /// The new room starts with empty registries. `self` does not learn
    /// about its satellites.
    #[must_use]
    pub fn create_satellite_office(&self) -> MailRoom {
        Self {
            office: Arc::new(Office {
                home_office: Some(Arc::downgrade(&self.office)),
                depth: self.office.depth + 1,
                registry: Mutex::new(Registry::default()),
            }),
        }
    }

    /// Returns the home office, if there is one and it is still alive.
    pub fn home_office(&self) -> Option<MailRoom> {
        self.office
            .home_office
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|office| MailRoom { office })
    }

    /// True if announcements stop at this room.
    pub fn is_root(&self) -> bool {
        self.home_office().is_none()
    }

    /// True if both handles refer to the same room.
    pub fn ptr_eq(a: &MailRoom, b: &MailRoom) -> bool {
        Arc::ptr_eq(&a.office, &b.office)
    }

    /// Registers `handler` for messages whose concrete type is exactly `M`.
    ///
    /// Appends to this room's list for `M`. Past messages are not replayed.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::{Arc, Mutex};
    /// use missionroom::{MailRoom, Message};
    ///
    /// #[derive(Debug)]
    /// struct Ping(u32);
    /// impl Message for Ping {}
    ///
    /// let room = MailRoom::new();
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    /// room.subscribe(move |p: &Ping| {
    ///     sink.lock().unwrap().push(p.0);
    ///     Ok(())
    /// });
    ///
    /// room.announce(&Ping(7)).unwrap();
    /// assert_eq!(*seen.lock().unwrap(), vec![7]);
    /// ```
    pub fn subscribe<M, F>(&self, handler: F)
    where
        M: Message,
        F: Fn(&M) -> Result<(), MailError> + Send + Sync + 'static,
    {
        let erased: Handler = Arc::new(move |message: &dyn Message| {
            match message.as_any().downcast_ref::<M>() {
                Some(typed) => handler(typed),
                None => Ok(()),
            }
        });
        self.office
            .registry
            .lock()
            .by_type
            .entry(TypeId::of::<M>())
            .or_default()
            .push(erased);
    }

    /// Registers `handler` for every message announced on (or escalated through) this room.
    pub fn subscribe_to_all<F>(&self, handler: F)
    where
        F: Fn(&dyn Message) -> Result<(), MailError> + Send + Sync + 'static,
    {
        self.office.registry.lock().universal.push(Arc::new(handler));
    }

    /// Announces `message` here and then in every room above.
    pub fn announce<M: Message>(&self, message: &M) -> Result<(), MailError> {
        self.announce_dyn(message)
    }

    /// Type-erased [`announce`](Self::announce).
    ///
    /// Routing uses the concrete type behind `message`, so re-announcing a
    /// message received by a universal handler reaches the same typed handlers.
    pub fn announce_dyn(&self, message: &dyn Message) -> Result<(), MailError> {
        let key = message.as_any().type_id();

        let typed = self.deliver(List::Typed(key), message)?;
        let universal = self.deliver(List::Universal, message)?;

        tracing::trace!(
            message = message.type_name(),
            depth = self.office.depth,
            typed,
            universal,
            "delivered"
        );

        match self.home_office() {
            Some(home) => home.announce_dyn(message),
            None => Ok(()),
        }
    }

    /// Number of handlers registered here for exactly `M`.
    pub fn subscriber_count<M: Message>(&self) -> usize {
        self.office
            .registry
            .lock()
            .by_type
            .get(&TypeId::of::<M>())
            .map_or(0, Vec::len)
    }

    /// Number of universal handlers registered here.
    pub fn universal_count(&self) -> usize {
        self.office.registry.lock().universal.len()
    }

    /// Walks one list by index; the lock is re-taken for every step so
    /// handlers appended mid-walk are still reached.
    fn deliver(&self, list: List, message: &dyn Message) -> Result<usize, MailError> {
        let mut index = 0;
        loop {
            let next = self.office.registry.lock().nth(list, index);
            let Some(handler) = next else {
                return Ok(index);
            };
            handler(message)?;
            index += 1;
        }
    }
}

impl Default for MailRoom {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MailRoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.office.registry.lock();
        f.debug_struct("MailRoom")
            .field("depth", &self.office.depth)
            .field("types", &registry.by_type.len())
            .field("universal", &registry.universal.len())
            .finish()
    }
}
