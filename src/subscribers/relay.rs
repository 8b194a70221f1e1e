//! # relay: bridge a message type into an async channel
//!
//! Subscribes a handler for `M` that clones every delivered message into a
//! bounded [`tokio::sync::mpsc`] channel.
//!
//! ## Rules
//! - Never blocks the announcer and never fails the delivery.
//! - Queue **full**: the message is dropped for this receiver (warn).
//! - Receiver **closed**: the message is dropped (debug). The handler stays
//!   registered; mail room subscriptions are never removed.

use tokio::sync::mpsc;

use crate::mail::{MailRoom, Message};

/// Relays every `M` reaching `room` into a channel of `capacity` (min 1).
///
/// ## Example
/// ```rust
/// use missionroom::{MailRoom, Message, subscribers::relay};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Ping(u8);
/// impl Message for Ping {}
///
/// let room = MailRoom::new();
/// let mut rx = relay::<Ping>(&room, 8);
/// room.announce(&Ping(1)).unwrap();
/// assert_eq!(rx.try_recv().unwrap(), Ping(1));
/// ```
pub fn relay<M: Message + Clone>(room: &MailRoom, capacity: usize) -> mpsc::Receiver<M> {
    let (tx, rx) = mpsc::channel::<M>(capacity.max(1));
    room.subscribe(move |message: &M| {
        match tx.try_send(message.clone()) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    message = message.type_name(),
                    "relay dropped message: queue full"
                );
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(
                    message = message.type_name(),
                    "relay dropped message: receiver closed"
                );
            }
        }
        Ok(())
    });
    rx
}
