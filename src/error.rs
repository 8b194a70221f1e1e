//! Error types used by mail rooms and the mission runtime.
//!
//! - [`MailError`] — raised by subscribers and returned from `announce`.
//! - [`RuntimeError`] — raised while wiring or draining the runtime.
//!
//! Both provide `as_label` / `as_message` helpers for logs.

use thiserror::Error;

use crate::mail::Message;

/// # Errors produced while delivering a message.
///
/// Handlers return this to signal a fault. The first fault aborts the
/// delivery in progress and is handed back to the announcer unchanged.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    /// A subscriber refused or failed to process a message.
    #[error("handler for {message_type} failed: {reason}")]
    HandlerFailed {
        /// Type name of the message being delivered.
        message_type: &'static str,
        /// Handler supplied reason.
        reason: String,
    },
}

impl MailError {
    /// Builds a [`MailError::HandlerFailed`] for message type `M`.
    ///
    /// # Example
    /// ```
    /// use missionroom::{MailError, Message};
    ///
    /// #[derive(Debug)]
    /// struct Ping;
    /// impl Message for Ping {}
    ///
    /// let err = MailError::handler_failed::<Ping>("nope");
    /// assert_eq!(err.as_label(), "mail_handler_failed");
    /// ```
    pub fn handler_failed<M: Message>(reason: impl Into<String>) -> Self {
        MailError::HandlerFailed {
            message_type: std::any::type_name::<M>(),
            reason: reason.into(),
        }
    }

    /// Builds a [`MailError::HandlerFailed`] from a type-erased message.
    ///
    /// Handy inside universal subscribers.
    pub fn rejected(message: &dyn Message, reason: impl Into<String>) -> Self {
        MailError::HandlerFailed {
            message_type: message.type_name(),
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            MailError::HandlerFailed { .. } => "mail_handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            MailError::HandlerFailed {
                message_type,
                reason,
            } => format!("message={message_type} reason={reason}"),
        }
    }
}

/// # Errors produced by the mission runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Tokio scheduling was requested outside of a tokio runtime.
    #[error("tokio scheduling requires a running tokio runtime")]
    NoRuntime,

    /// One or more deferred actions panicked while the scheduler drained.
    #[error("{count} deferred action(s) panicked")]
    ActionPanicked {
        /// Number of actions that panicked.
        count: usize,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use missionroom::RuntimeError;
    ///
    /// let err = RuntimeError::ActionPanicked { count: 2 };
    /// assert_eq!(err.as_label(), "runtime_action_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::NoRuntime => "runtime_missing",
            RuntimeError::ActionPanicked { .. } => "runtime_action_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::NoRuntime => "no tokio runtime available".to_string(),
            RuntimeError::ActionPanicked { count } => format!("panicked actions={count}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Probe;
    impl Message for Probe {}

    #[test]
    fn handler_failed_names_the_message_type() {
        let err = MailError::handler_failed::<Probe>("boom");
        let text = err.to_string();
        assert!(text.contains("Probe"), "{text}");
        assert!(text.ends_with("boom"), "{text}");
    }

    #[test]
    fn rejected_uses_runtime_type_name() {
        let probe = Probe;
        let err = MailError::rejected(&probe, "no");
        assert_eq!(err, MailError::handler_failed::<Probe>("no"));
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(RuntimeError::NoRuntime.as_label(), "runtime_missing");
        assert_eq!(
            RuntimeError::ActionPanicked { count: 1 }.as_message(),
            "panicked actions=1"
        );
    }
}
