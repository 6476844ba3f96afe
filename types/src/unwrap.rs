//! The unwrap-violation error.
//!
//! Raised (as a panic payload) when a value is extracted from the wrong
//! variant. The payload is a [`UnwrapError`], so `catch_unwind` callers can
//! downcast it and inspect the actual variant.

use std::any::Any;
use std::fmt;

use thiserror::Error;

use crate::brand::Tag;
use crate::settings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (found {tag}: {payload})")]
pub struct UnwrapError {
    message: String,
    tag: Tag,
    payload: String,
}

impl UnwrapError {
    /// Tag of the variant that was actually present.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// Debug rendering of the payload that was actually present, truncated
    /// to the configured preview length. Empty for `None`.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Recover the violation from a `catch_unwind` payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Option<&Self> {
        payload.downcast_ref::<Self>()
    }
}

pub(crate) fn violation(message: &str, tag: Tag, payload: &dyn fmt::Debug) -> UnwrapError {
    let limit = settings::current().payload_preview().chars();
    UnwrapError {
        message: message.to_string(),
        tag,
        payload: preview(&format!("{payload:?}"), limit),
    }
}

/// Log and raise. Used by `expect`, `expect_err` and the unchecked gate.
pub(crate) fn raise(message: &str, tag: Tag, payload: &dyn fmt::Debug) -> ! {
    let error = violation(message, tag, payload);
    tracing::error!(tag = %error.tag, payload = %error.payload, "{}", error.message);
    std::panic::panic_any(error)
}

pub(crate) fn raise_empty(message: &str, tag: Tag) -> ! {
    let error = UnwrapError {
        message: message.to_string(),
        tag,
        payload: String::new(),
    };
    tracing::error!(tag = %error.tag, "{}", error.message);
    std::panic::panic_any(error)
}

/// Keep at most `max` characters, the last three being `...` when cut.
fn preview(raw: &str, max: usize) -> String {
    if raw.chars().count() <= max {
        return raw.to_string();
    }
    let head: String = raw.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}
