//! # Subscribers for reporting collaborators.
//!
//! Mail room handlers run synchronously on the announcer's thread. The
//! helpers here let slower or async consumers observe announcements
//! without holding up the delivery loop.
//!
//! ## Contents
//! - [`relay`] copies one message type into a bounded tokio channel
//! - [`LogWriter`] logs every announcement through `tracing` _(feature `logging`)_
//!
//! ## Diagram
//! ```text
//!   room.announce(m)
//!       ├─► relay handler ── try_send(m.clone()) ──► [mpsc queue] ──► async consumer
//!       └─► LogWriter ────── info!(message = ...)
//! ```

#[cfg(feature = "logging")]
mod log;
mod relay;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use relay::relay;
