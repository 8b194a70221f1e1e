//! # Message marker trait
//!
//! Any value that can be announced on a [`MailRoom`](crate::MailRoom)
//! implements [`Message`]. The trait is opt-in, so subscribing to a type
//! that is not a message is a compile error rather than a runtime fault.
//!
//! ```rust
//! use missionroom::Message;
//!
//! #[derive(Debug)]
//! struct TestStarted {
//!     name: String,
//! }
//!
//! impl Message for TestStarted {}
//! ```

use std::any::Any;
use std::fmt::Debug;

/// Upcast to [`Any`] so a type-erased message can be downcast again.
///
/// Implemented for every `'static` type; there is no need to implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Marker for announceable events.
///
/// Messages carry no identity beyond their concrete type and payload.
/// Routing matches the **exact** concrete type: a struct wrapping another
/// message is a different message.
pub trait Message: AsAny + Debug + Send + Sync + 'static {
    /// Concrete type name (for logs and errors).
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
