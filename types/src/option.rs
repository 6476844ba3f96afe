//! The Option algebra.
//!
//! Mirrors [`Result`](crate::Result) at one type parameter. None
//! short-circuits every transformation and chaining operation; callbacks
//! fire only on Some.
//!
//! `none()` is a `const fn`: every None is the same payload-free variant, so
//! there is nothing to allocate or share.
//!
//! ```compile_fail
//! let mut o = keel_types::some(1);
//! o.repr = None;
//! ```

use std::fmt;
use std::option::Option as StdOption;

use crate::brand::sealed::Seal;
use crate::brand::{self, Brand, Tag, Tagged};
use crate::result::{self, Result};
use crate::unwrap;

/// Tagged present-or-absent value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct Option<T> {
    repr: StdOption<T>,
}

pub const fn some<T>(value: T) -> Option<T> {
    Option { repr: Some(value) }
}

pub const fn none<T>() -> Option<T> {
    Option { repr: None }
}

impl<T> Option<T> {
    #[must_use]
    pub const fn is_some(&self) -> bool {
        self.repr.is_some()
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.repr.is_none()
    }

    #[must_use]
    pub fn is_some_and(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        self.repr.as_ref().is_some_and(predicate)
    }

    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self.repr {
            Some(_) => Tag::Some,
            None => Tag::None,
        }
    }

    pub const fn as_ref(&self) -> Option<&T> {
        Option {
            repr: self.repr.as_ref(),
        }
    }

    #[must_use]
    pub const fn as_std(&self) -> StdOption<&T> {
        self.repr.as_ref()
    }

    #[must_use]
    pub fn into_std(self) -> StdOption<T> {
        self.repr
    }

    pub fn from_std(value: StdOption<T>) -> Self {
        Self { repr: value }
    }

    // ── Transformation ───────────────────────────────────────

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Option<U> {
        Option {
            repr: self.repr.map(f),
        }
    }

    /// Keep the value only if `predicate` holds.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        Self {
            repr: self.repr.filter(predicate),
        }
    }

    pub fn zip<U>(self, other: Option<U>) -> Option<(T, U)> {
        Option {
            repr: self.repr.zip(other.repr),
        }
    }

    pub fn zip_with<U, R>(self, other: Option<U>, f: impl FnOnce(T, U) -> R) -> Option<R> {
        match (self.repr, other.repr) {
            (Some(left), Some(right)) => some(f(left, right)),
            _ => none(),
        }
    }

    // ── Chaining ─────────────────────────────────────────────

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Option<U>) -> Option<U> {
        match self.repr {
            Some(value) => f(value),
            None => none(),
        }
    }

    pub fn or_else(self, f: impl FnOnce() -> Self) -> Self {
        match self.repr {
            Some(value) => some(value),
            None => f(),
        }
    }

    pub fn or(self, other: Self) -> Self {
        match self.repr {
            Some(value) => some(value),
            None => other,
        }
    }

    /// Run `f` on the value. Panics propagate.
    pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
        if let Some(value) = &self.repr {
            f(value);
        }
        self
    }

    // ── Extraction ───────────────────────────────────────────

    pub fn match_with<R>(self, on_some: impl FnOnce(T) -> R, on_none: impl FnOnce() -> R) -> R {
        match self.repr {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.repr.unwrap_or(default)
    }

    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        self.repr.unwrap_or_else(f)
    }

    pub fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
        self.repr.map_or(default, f)
    }

    #[must_use]
    pub fn contains(&self, candidate: &T) -> bool
    where
        T: PartialEq,
    {
        matches!(&self.repr, Some(value) if value == candidate)
    }

    /// Extract the value.
    ///
    /// # Panics
    ///
    /// On None, panics with an [`UnwrapError`](crate::UnwrapError) payload
    /// tagged `None` with an empty payload.
    pub fn expect(self, message: &str) -> T {
        match self.repr {
            Some(value) => value,
            None => unwrap::raise_empty(message, Tag::None),
        }
    }

    // ── Conversion ───────────────────────────────────────────

    /// Some → Ok, None → Err(`error`).
    pub fn to_result<E>(self, error: E) -> Result<T, E> {
        match self.repr {
            Some(value) => result::ok(value),
            None => result::err(error),
        }
    }

    /// Like [`Option::to_result`] but builds the error only when needed.
    pub fn to_result_else<E>(self, error: impl FnOnce() -> E) -> Result<T, E> {
        match self.repr {
            Some(value) => result::ok(value),
            None => result::err(error()),
        }
    }

    pub fn to_nullable(self) -> StdOption<T> {
        self.repr
    }

    /// Same projection as [`Option::to_nullable`].
    pub fn to_undefined(self) -> StdOption<T> {
        self.repr
    }
}

impl<T> Option<Option<T>> {
    pub fn flatten(self) -> Option<T> {
        match self.repr {
            Some(inner) => inner,
            None => none(),
        }
    }
}

impl<T, E> Option<Result<T, E>> {
    /// `Some(Ok(v))` → `Ok(Some(v))`, `Some(Err(e))` → `Err(e)`, `None` → `Ok(None)`.
    pub fn transpose(self) -> Result<Option<T>, E> {
        match self.repr {
            Some(inner) => inner.map(some),
            None => result::ok(none()),
        }
    }
}

impl<T> Default for Option<T> {
    fn default() -> Self {
        none()
    }
}

impl<T: fmt::Debug> fmt::Debug for Option<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Some(value) => f.debug_tuple("Some").field(value).finish(),
            None => f.write_str("None"),
        }
    }
}

impl<T> Tagged for Option<T> {
    fn tag_name(&self) -> &str {
        self.tag().as_str()
    }

    fn brand(&self, _seal: Seal) -> StdOption<&'static Brand> {
        Some(brand::option_brand())
    }
}

impl<T> From<StdOption<T>> for Option<T> {
    fn from(value: StdOption<T>) -> Self {
        Self::from_std(value)
    }
}

impl<T> From<Option<T>> for StdOption<T> {
    fn from(value: Option<T>) -> Self {
        value.repr
    }
}
