//! The Result algebra.
//!
//! `Result<T, E>` is a closed, immutable sum of `Ok(T)` and `Err(E)`. It is
//! built only through [`ok`] / [`err`] (or the conversions that route through
//! them) and never mutated afterwards: the representation is private and no
//! method hands out `&mut` access.
//!
//! Reassignment and field access from outside the crate do not compile:
//!
//! ```compile_fail
//! let mut r = keel_types::ok::<i32, String>(1);
//! r.repr = keel_types::Variant::Ok(2);
//! ```
//!
//! ```compile_fail
//! let r: keel_types::Result<i32, String> = keel_types::Result {
//!     repr: keel_types::Variant::Ok(1),
//! };
//! ```
//!
//! Every operation except [`Result::expect`] and [`Result::expect_err`] is
//! total. [`Result::and_tee`] / [`Result::or_tee`] swallow panics raised by
//! their callback; [`Result::inspect`] / [`Result::inspect_err`] let them
//! propagate.

use std::fmt;
use std::option::Option as StdOption;
use std::result::Result as StdResult;

use crate::brand::sealed::Seal;
use crate::brand::{self, Brand, Tag, Tagged};
use crate::flow::Bail;
use crate::option::{self, Option};
use crate::panic::{self, Panic};
use crate::report::{self, TeeSite};
use crate::unwrap;

/// Owned or borrowed view of a Result's variant, for pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant<T, E> {
    Ok(T),
    Err(E),
}

/// Tagged success-or-failure value. See the module docs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use = "this `Result` may be an `Err` variant, which should be handled"]
pub struct Result<T, E> {
    repr: Variant<T, E>,
}

/// Build an `Ok`.
pub const fn ok<T, E>(value: T) -> Result<T, E> {
    Result {
        repr: Variant::Ok(value),
    }
}

/// Build an `Err`.
pub const fn err<T, E>(error: E) -> Result<T, E> {
    Result {
        repr: Variant::Err(error),
    }
}

/// Run `f`, turning a panic into `Err(map_panic(panic))`.
///
/// The boundary for code that reports failure by panicking: everything past
/// this call sees a plain `Result`.
pub fn try_catch<T, E>(f: impl FnOnce() -> T, map_panic: impl FnOnce(Panic) -> E) -> Result<T, E> {
    match panic::catch(f) {
        Ok(value) => ok(value),
        Err(caught) => err(map_panic(caught)),
    }
}

impl<T, E> Result<T, E> {
    // ── Queries ──────────────────────────────────────────────

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.repr, Variant::Ok(_))
    }

    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self.repr, Variant::Err(_))
    }

    #[must_use]
    pub fn is_ok_and(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match &self.repr {
            Variant::Ok(value) => predicate(value),
            Variant::Err(_) => false,
        }
    }

    #[must_use]
    pub fn is_err_and(&self, predicate: impl FnOnce(&E) -> bool) -> bool {
        match &self.repr {
            Variant::Ok(_) => false,
            Variant::Err(error) => predicate(error),
        }
    }

    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self.repr {
            Variant::Ok(_) => Tag::Ok,
            Variant::Err(_) => Tag::Err,
        }
    }

    // ── Views and std interop ────────────────────────────────

    pub const fn as_ref(&self) -> Result<&T, &E> {
        match &self.repr {
            Variant::Ok(value) => ok(value),
            Variant::Err(error) => err(error),
        }
    }

    #[must_use]
    pub const fn as_variant(&self) -> Variant<&T, &E> {
        match &self.repr {
            Variant::Ok(value) => Variant::Ok(value),
            Variant::Err(error) => Variant::Err(error),
        }
    }

    #[must_use]
    pub fn into_variant(self) -> Variant<T, E> {
        self.repr
    }

    pub fn into_std(self) -> StdResult<T, E> {
        match self.repr {
            Variant::Ok(value) => Ok(value),
            Variant::Err(error) => Err(error),
        }
    }

    pub fn from_std(result: StdResult<T, E>) -> Self {
        match result {
            Ok(value) => ok(value),
            Err(error) => err(error),
        }
    }

    // ── Transformation ───────────────────────────────────────

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Result<U, E> {
        match self.repr {
            Variant::Ok(value) => ok(f(value)),
            Variant::Err(error) => err(error),
        }
    }

    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> Result<T, F> {
        match self.repr {
            Variant::Ok(value) => ok(value),
            Variant::Err(error) => err(f(error)),
        }
    }

    pub fn map_both<U, F>(
        self,
        on_ok: impl FnOnce(T) -> U,
        on_err: impl FnOnce(E) -> F,
    ) -> Result<U, F> {
        match self.repr {
            Variant::Ok(value) => ok(on_ok(value)),
            Variant::Err(error) => err(on_err(error)),
        }
    }

    /// Swap which variant carries the payload.
    pub fn flip(self) -> Result<E, T> {
        match self.repr {
            Variant::Ok(value) => err(value),
            Variant::Err(error) => ok(error),
        }
    }

    /// Widen the error type through `From`.
    pub fn err_into<F: From<E>>(self) -> Result<T, F> {
        self.map_err(F::from)
    }

    // ── Logical ──────────────────────────────────────────────

    /// `other` if this is Ok, otherwise this Err.
    pub fn and<U>(self, other: Result<U, E>) -> Result<U, E> {
        match self.repr {
            Variant::Ok(_) => other,
            Variant::Err(error) => err(error),
        }
    }

    /// This if Ok, otherwise `other`.
    pub fn or<F>(self, other: Result<T, F>) -> Result<T, F> {
        match self.repr {
            Variant::Ok(value) => ok(value),
            Variant::Err(_) => other,
        }
    }

    // ── Chaining ─────────────────────────────────────────────

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<U, E> {
        match self.repr {
            Variant::Ok(value) => f(value),
            Variant::Err(error) => err(error),
        }
    }

    pub fn or_else<F>(self, f: impl FnOnce(E) -> Result<T, F>) -> Result<T, F> {
        match self.repr {
            Variant::Ok(value) => ok(value),
            Variant::Err(error) => f(error),
        }
    }

    /// Run a fallible side step against the value. The step's own success
    /// payload is discarded; its error replaces this Ok.
    pub fn and_through<U>(self, f: impl FnOnce(&T) -> Result<U, E>) -> Result<T, E> {
        match self.repr {
            Variant::Ok(value) => match f(&value).repr {
                Variant::Ok(_) => ok(value),
                Variant::Err(error) => err(error),
            },
            Variant::Err(error) => err(error),
        }
    }

    // ── Side effects ─────────────────────────────────────────

    /// Run `f` on the Ok value for its side effect.
    ///
    /// A panic inside `f` is swallowed and reported through
    /// [`report::suppressed`]; the returned Result is always `self`. Use
    /// [`Result::inspect`] when the side effect must not fail silently.
    pub fn and_tee(self, f: impl FnOnce(&T)) -> Self {
        if let Variant::Ok(value) = &self.repr
            && let Err(caught) = panic::catch(|| f(value))
        {
            report::suppressed(TeeSite::AndTee, &caught);
        }
        self
    }

    /// Error-side counterpart of [`Result::and_tee`].
    pub fn or_tee(self, f: impl FnOnce(&E)) -> Self {
        if let Variant::Err(error) = &self.repr
            && let Err(caught) = panic::catch(|| f(error))
        {
            report::suppressed(TeeSite::OrTee, &caught);
        }
        self
    }

    /// Run `f` on the Ok value. Panics propagate.
    pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
        if let Variant::Ok(value) = &self.repr {
            f(value);
        }
        self
    }

    /// Run `f` on the Err value. Panics propagate.
    pub fn inspect_err(self, f: impl FnOnce(&E)) -> Self {
        if let Variant::Err(error) = &self.repr {
            f(error);
        }
        self
    }

    // ── Extraction ───────────────────────────────────────────

    /// Total extraction: exactly one of the two callbacks runs.
    pub fn match_with<R>(self, on_ok: impl FnOnce(T) -> R, on_err: impl FnOnce(E) -> R) -> R {
        match self.repr {
            Variant::Ok(value) => on_ok(value),
            Variant::Err(error) => on_err(error),
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self.repr {
            Variant::Ok(value) => value,
            Variant::Err(_) => default,
        }
    }

    pub fn unwrap_or_else(self, f: impl FnOnce(E) -> T) -> T {
        match self.repr {
            Variant::Ok(value) => value,
            Variant::Err(error) => f(error),
        }
    }

    pub fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
        match self.repr {
            Variant::Ok(value) => f(value),
            Variant::Err(_) => default,
        }
    }

    pub fn map_or_else<U>(self, default: impl FnOnce(E) -> U, f: impl FnOnce(T) -> U) -> U {
        match self.repr {
            Variant::Ok(value) => f(value),
            Variant::Err(error) => default(error),
        }
    }

    #[must_use]
    pub fn contains(&self, candidate: &T) -> bool
    where
        T: PartialEq,
    {
        matches!(&self.repr, Variant::Ok(value) if value == candidate)
    }

    #[must_use]
    pub fn contains_err(&self, candidate: &E) -> bool
    where
        E: PartialEq,
    {
        matches!(&self.repr, Variant::Err(error) if error == candidate)
    }

    /// Extract the Ok value.
    ///
    /// # Panics
    ///
    /// On Err, panics with an [`UnwrapError`](crate::UnwrapError) payload
    /// carrying `message`, the `Err` tag, and the error's debug form.
    pub fn expect(self, message: &str) -> T
    where
        E: fmt::Debug,
    {
        match self.repr {
            Variant::Ok(value) => value,
            Variant::Err(error) => unwrap::raise(message, Tag::Err, &error),
        }
    }

    /// Extract the Err value.
    ///
    /// # Panics
    ///
    /// On Ok, panics with an [`UnwrapError`](crate::UnwrapError) payload
    /// carrying `message`, the `Ok` tag, and the value's debug form.
    pub fn expect_err(self, message: &str) -> E
    where
        T: fmt::Debug,
    {
        match self.repr {
            Variant::Ok(value) => unwrap::raise(message, Tag::Ok, &value),
            Variant::Err(error) => error,
        }
    }

    // ── Conversion ───────────────────────────────────────────

    /// The Ok value, or nothing.
    pub fn to_nullable(self) -> StdOption<T> {
        match self.repr {
            Variant::Ok(value) => Some(value),
            Variant::Err(_) => None,
        }
    }

    /// Same projection as [`Result::to_nullable`]; Rust has a single
    /// absent-value representation.
    pub fn to_undefined(self) -> StdOption<T> {
        self.to_nullable()
    }

    /// Error-first pair: `(None, Some(value))` or `(Some(error), None)`.
    pub fn into_tuple(self) -> (StdOption<E>, StdOption<T>) {
        match self.repr {
            Variant::Ok(value) => (None, Some(value)),
            Variant::Err(error) => (Some(error), None),
        }
    }

    pub fn to_option(self) -> Option<T> {
        match self.repr {
            Variant::Ok(value) => option::some(value),
            Variant::Err(_) => option::none(),
        }
    }

    pub fn to_option_err(self) -> Option<E> {
        match self.repr {
            Variant::Ok(_) => option::none(),
            Variant::Err(error) => option::some(error),
        }
    }

    // ── Early return ─────────────────────────────────────────

    /// Extract-or-bail for use with `?` inside [`safe_try`](crate::safe_try).
    ///
    /// Ok yields its value and the body continues; Err becomes a [`Bail`]
    /// that ends the body at this point.
    pub fn bail(self) -> StdResult<T, Bail<E>> {
        match self.repr {
            Variant::Ok(value) => Ok(value),
            Variant::Err(error) => Err(Bail::new(error)),
        }
    }
}

impl<T, E> Result<Result<T, E>, E> {
    pub fn flatten(self) -> Result<T, E> {
        match self.repr {
            Variant::Ok(inner) => inner,
            Variant::Err(error) => err(error),
        }
    }
}

impl<T> Result<T, T> {
    /// Whichever payload is present.
    pub fn merge(self) -> T {
        match self.repr {
            Variant::Ok(value) | Variant::Err(value) => value,
        }
    }
}

impl<T, E> Result<Option<T>, E> {
    /// `Ok(Some(v))` → `Some(Ok(v))`, `Ok(None)` → `None`, `Err(e)` → `Some(Err(e))`.
    pub fn transpose(self) -> Option<Result<T, E>> {
        match self.repr {
            Variant::Ok(inner) => inner.map(ok),
            Variant::Err(error) => option::some(err(error)),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Result<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Variant::Ok(value) => f.debug_tuple("Ok").field(value).finish(),
            Variant::Err(error) => f.debug_tuple("Err").field(error).finish(),
        }
    }
}

impl<T, E> Tagged for Result<T, E> {
    fn tag_name(&self) -> &str {
        self.tag().as_str()
    }

    fn brand(&self, _seal: Seal) -> StdOption<&'static Brand> {
        Some(brand::result_brand())
    }
}

impl<T, E> From<StdResult<T, E>> for Result<T, E> {
    fn from(value: StdResult<T, E>) -> Self {
        Self::from_std(value)
    }
}

impl<T, E> From<Result<T, E>> for StdResult<T, E> {
    fn from(value: Result<T, E>) -> Self {
        value.into_std()
    }
}

impl<T, E> From<Variant<T, E>> for Result<T, E> {
    fn from(value: Variant<T, E>) -> Self {
        match value {
            Variant::Ok(value) => ok(value),
            Variant::Err(error) => err(error),
        }
    }
}
