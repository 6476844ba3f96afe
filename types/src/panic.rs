//! Captured panics.
//!
//! A panic unwinding out of a caller-supplied closure is the Rust analogue of
//! a thrown exception. [`Panic`] keeps its message in a form that can be
//! mapped into a domain error, logged, or compared in tests.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::unwrap::UnwrapError;

/// A panic payload reduced to its message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Panic {
    message: String,
}

impl Panic {
    /// Message used when the payload is neither a string nor an [`UnwrapError`].
    pub const OPAQUE: &'static str = "panic with a non-string payload";

    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Reduce a payload obtained from `catch_unwind`.
    #[must_use]
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        Self::from_payload_ref(payload.as_ref())
    }

    #[must_use]
    pub fn from_payload_ref(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<&'static str>() {
            return Self::new(*message);
        }
        if let Some(message) = payload.downcast_ref::<String>() {
            return Self::new(message.clone());
        }
        if let Some(violation) = payload.downcast_ref::<UnwrapError>() {
            return Self::new(violation.to_string());
        }
        Self::new(Self::OPAQUE)
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Run `f`, converting an unwinding panic into `Err(Panic)`.
///
/// Unwind safety is asserted: callers observe the closure's effects only
/// through its return value or through state they already accept may be
/// left half-updated.
pub fn catch<R>(f: impl FnOnce() -> R) -> Result<R, Panic> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Panic::from_payload)
}
