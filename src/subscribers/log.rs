//! # LogWriter — announcement logger
//!
//! A universal subscriber that logs every message through `tracing`.
//! Use it for demos and debugging; install a `tracing` subscriber to see output.
//!
//! ## Example output
//! ```text
//! INFO missionroom::subscribers::log: announced message=missionroom::discovery::TestFound payload=TestFound { .. }
//! ```

use crate::mail::{MailRoom, Message};

/// Announcement logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Subscribes this writer to every message reaching `room`.
    pub fn attach(self, room: &MailRoom) {
        room.subscribe_to_all(|message| {
            tracing::info!(
                message = message.type_name(),
                payload = ?message,
                "announced"
            );
            Ok(())
        });
    }
}
