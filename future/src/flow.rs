//! Early return for async bodies, and a runner that picks the sync or async
//! form from the body's return type.
//!
//! ```
//! use keel_future::safe_try;
//! use keel_types::{Flow, err, ok};
//!
//! // Synchronous body: returns a Result right away.
//! let sync = safe_try(|| -> Flow<i32, &str> {
//!     let a = ok::<i32, &str>(1).bail()?;
//!     Ok(ok(a + 1))
//! });
//! assert_eq!(sync, ok(2));
//!
//! // Asynchronous body: returns a ResultAsync.
//! async fn fetch() -> Flow<i32, &'static str> {
//!     let _ = err::<i32, &'static str>("offline").bail()?;
//!     Ok(ok(0))
//! }
//! let deferred = safe_try(fetch);
//! # let _ = deferred;
//! ```

use std::future::Future;

use keel_types::flow::{self, Flow};
use keel_types::result::Result;

use crate::result_async::ResultAsync;

/// Run an async body to completion or to its first Err step. Locals held
/// by the body are dropped when it returns early, as in the sync runner.
pub fn safe_try_async<T, E, Fut>(body: impl FnOnce() -> Fut) -> ResultAsync<T, E>
where
    T: 'static,
    E: 'static,
    Fut: Future<Output = Flow<T, E>> + 'static,
{
    let pending = body();
    ResultAsync::new(async move { flow::settle(pending.await) })
}

/// Marker for bodies returning [`Flow`] directly.
pub enum SyncRoutine {}

/// Marker for bodies returning a future of [`Flow`].
pub enum AsyncRoutine {}

/// A body [`safe_try`] can run. `Marker` keeps the two impls apart.
pub trait Routine<Marker> {
    type Output;

    fn run(self) -> Self::Output;
}

impl<F, T, E> Routine<SyncRoutine> for F
where
    F: FnOnce() -> Flow<T, E>,
{
    type Output = Result<T, E>;

    fn run(self) -> Self::Output {
        flow::safe_try(self)
    }
}

impl<F, Fut, T, E> Routine<AsyncRoutine> for F
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Flow<T, E>> + 'static,
    T: 'static,
    E: 'static,
{
    type Output = ResultAsync<T, E>;

    fn run(self) -> Self::Output {
        safe_try_async(self)
    }
}

/// Run `body` with the runner matching its return type: a `Result` for
/// synchronous bodies, a [`ResultAsync`] for async ones.
pub fn safe_try<M, R: Routine<M>>(body: R) -> R::Output {
    body.run()
}
