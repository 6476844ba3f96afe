//! Cooperative early return.
//!
//! A body handed to [`safe_try`] extracts each step with `step.bail()?`. Ok
//! steps yield their value; the first Err step ends the body right there.
//! Leaving the body runs the drop glue of every live local, which is where
//! any cleanup tied to the interrupted step belongs. The runner then returns
//! that Err. A body that finishes returns its own Result unchanged.
//!
//! ```
//! use keel_types::{Flow, err, ok, safe_try};
//!
//! let mut reached_end = false;
//! let outcome = safe_try(|| -> Flow<i32, &str> {
//!     let a = ok::<i32, &str>(1).bail()?;
//!     let b = err::<i32, &str>("stop").bail()?;
//!     reached_end = true;
//!     Ok(ok(a + b))
//! });
//! assert_eq!(outcome, err("stop"));
//! assert!(!reached_end);
//! ```

use std::result::Result as StdResult;

use crate::result::{Result, err};

/// An Err that ended a body early. Only [`Result::bail`] creates one, and
/// the runner consumes it, so a body cannot resume past it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Bail<E>(E);

impl<E> Bail<E> {
    pub(crate) fn new(error: E) -> Self {
        Self(error)
    }

    #[must_use]
    pub fn error(&self) -> &E {
        &self.0
    }

    #[must_use]
    pub fn into_error(self) -> E {
        self.0
    }

    /// Widen the carried error, for bodies whose steps fail with
    /// different error types.
    pub fn widen<F: From<E>>(self) -> Bail<F> {
        Bail(F::from(self.0))
    }
}

/// What a runner body returns: its own Result, or the Bail that cut it short.
pub type Flow<T, E> = StdResult<Result<T, E>, Bail<E>>;

/// Run a synchronous body to completion or to its first Err step.
pub fn safe_try<T, E>(body: impl FnOnce() -> Flow<T, E>) -> Result<T, E> {
    settle(body())
}

/// Collapse a finished body's [`Flow`] into the Result it stands for.
pub fn settle<T, E>(flow: Flow<T, E>) -> Result<T, E> {
    match flow {
        Ok(result) => result,
        Err(bail) => {
            tracing::debug!("Early return on Err step");
            err(bail.into_error())
        }
    }
}
