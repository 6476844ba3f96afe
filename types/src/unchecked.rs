//! Panicking extraction, kept apart from the total API so that imports of
//! this module are easy to audit.
//!
//! Every function here raises an [`UnwrapError`](crate::UnwrapError) panic
//! on the wrong variant, exactly like [`Result::expect`].

use std::fmt;

use crate::brand::Tag;
use crate::option::Option;
use crate::result::{Result, Variant};
use crate::unwrap;

/// The Ok value.
///
/// # Panics
///
/// On Err.
pub fn unwrap<T, E: fmt::Debug>(result: Result<T, E>) -> T {
    match result.into_variant() {
        Variant::Ok(value) => value,
        Variant::Err(error) => unwrap::raise("called `unwrap` on an Err", Tag::Err, &error),
    }
}

/// The Err value.
///
/// # Panics
///
/// On Ok.
pub fn unwrap_err<T: fmt::Debug, E>(result: Result<T, E>) -> E {
    match result.into_variant() {
        Variant::Ok(value) => unwrap::raise("called `unwrap_err` on an Ok", Tag::Ok, &value),
        Variant::Err(error) => error,
    }
}

/// The Some value.
///
/// # Panics
///
/// On None.
pub fn unwrap_some<T>(option: Option<T>) -> T {
    match option.into_std() {
        Some(value) => value,
        None => unwrap::raise_empty("called `unwrap_some` on a None", Tag::None),
    }
}
