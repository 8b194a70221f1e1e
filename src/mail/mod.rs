//! Hierarchical, type-routed mail rooms.
//!
//! ## Contents
//! - [`Message`] marker trait for anything that can be announced
//! - [`MailRoom`] one node of the bus: registries plus an optional home office
//!
//! ## Delivery order
//! ```text
//! satellite.announce(m)
//!   ├─► satellite: handlers for type_of(m)   (subscription order)
//!   ├─► satellite: universal handlers        (subscription order)
//!   └─► home office.announce(m)
//!         ├─► home office: handlers for type_of(m)
//!         ├─► home office: universal handlers
//!         └─► ... up to the root
//! ```

mod message;
mod room;

pub use message::{AsAny, Message};
pub use room::MailRoom;
