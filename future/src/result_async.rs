//! [`ResultAsync`]: a future that always resolves to a Result.
//!
//! Foreign futures that can fail (by returning `Err` or by panicking while
//! polled) are admitted only through constructors that map the failure into
//! the error type, so awaiting a `ResultAsync` never unwinds on their behalf.
//! Chained operations run strictly in the order they were declared.

use std::borrow::Cow;
use std::fmt;
use std::future::{self, Future};
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::result::Result as StdResult;
use std::task::{Context, Poll};

use futures_util::future::{FutureExt, LocalBoxFuture, select_all};
use thiserror::Error;
use tokio::sync::oneshot;

use keel_types::bindings::Bindings;
use keel_types::brand::Tag;
use keel_types::combinators;
use keel_types::nonempty::NonEmptyVec;
use keel_types::option::Option;
use keel_types::panic::{self, Panic};
use keel_types::report::{self, TeeSite};
use keel_types::result::{Result, Variant, err, ok};

/// Why a foreign future or callback did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection<X> {
    #[error("rejected: {0}")]
    Failed(X),
    #[error("panicked: {0}")]
    Panicked(Panic),
    #[error("callback dropped without settling")]
    Abandoned,
}

/// Deferred Result. Awaiting it yields `Result<T, E>`.
#[must_use = "a ResultAsync does nothing until awaited"]
pub struct ResultAsync<T, E> {
    inner: LocalBoxFuture<'static, Result<T, E>>,
}

/// Values a chaining callback may return: a Result now or one later.
pub trait IntoResultAsync {
    type Ok;
    type Err;

    fn into_result_async(self) -> ResultAsync<Self::Ok, Self::Err>;
}

impl<T: 'static, E: 'static> IntoResultAsync for Result<T, E> {
    type Ok = T;
    type Err = E;

    fn into_result_async(self) -> ResultAsync<T, E> {
        ResultAsync::from_result(self)
    }
}

impl<T, E> IntoResultAsync for ResultAsync<T, E> {
    type Ok = T;
    type Err = E;

    fn into_result_async(self) -> Self {
        self
    }
}

/// The settle side of [`ResultAsync::from_callback`].
pub struct Callback<T, X> {
    sender: oneshot::Sender<StdResult<T, X>>,
}

impl<T, X> Callback<T, X> {
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, reason: X) {
        self.settle(Err(reason));
    }

    pub fn settle(self, outcome: StdResult<T, X>) {
        if self.sender.send(outcome).is_err() {
            tracing::debug!("Callback settled after its ResultAsync was dropped");
        }
    }
}

impl<T: 'static, E: 'static> ResultAsync<T, E> {
    /// Wrap a future already known to resolve to a Result.
    pub fn new(inner: impl Future<Output = Result<T, E>> + 'static) -> Self {
        Self {
            inner: inner.boxed_local(),
        }
    }

    pub fn ok(value: T) -> Self {
        Self::from_result(ok(value))
    }

    pub fn err(error: E) -> Self {
        Self::from_result(err(error))
    }

    pub fn from_result(result: Result<T, E>) -> Self {
        Self::new(future::ready(result))
    }

    /// Adopt a future trusted never to fail. Its output becomes Ok.
    pub fn from_safe_promise(inner: impl Future<Output = T> + 'static) -> Self {
        Self::new(inner.map(ok))
    }

    /// Adopt a foreign future. Its `Err`, or a panic while polling it, is
    /// mapped into the error type.
    pub fn from_promise<X: 'static>(
        inner: impl Future<Output = StdResult<T, X>> + 'static,
        map_rejection: impl FnOnce(Rejection<X>) -> E + 'static,
    ) -> Self {
        Self::new(async move {
            match AssertUnwindSafe(inner).catch_unwind().await {
                Ok(Ok(value)) => ok(value),
                Ok(Err(reason)) => err(map_rejection(Rejection::Failed(reason))),
                Err(payload) => err(map_rejection(Rejection::Panicked(Panic::from_payload(payload)))),
            }
        })
    }

    /// Run an async routine that may panic, either while building its
    /// future or while it is polled.
    pub fn from_throwable<Fut>(
        routine: impl FnOnce() -> Fut,
        map_panic: impl FnOnce(Panic) -> E + 'static,
    ) -> Self
    where
        Fut: Future<Output = T> + 'static,
    {
        match panic::catch(routine) {
            Ok(inner) => Self::new(async move {
                match AssertUnwindSafe(inner).catch_unwind().await {
                    Ok(value) => ok(value),
                    Err(payload) => err(map_panic(Panic::from_payload(payload))),
                }
            }),
            Err(panic) => Self::err(map_panic(panic)),
        }
    }

    /// Bridge a single-callback API. `register` receives a [`Callback`] to
    /// settle; dropping it unsettled yields [`Rejection::Abandoned`].
    pub fn from_callback<X: 'static>(
        register: impl FnOnce(Callback<T, X>),
        map_rejection: impl FnOnce(Rejection<X>) -> E + 'static,
    ) -> Self {
        let (sender, receiver) = oneshot::channel();
        let registered = panic::catch(move || register(Callback { sender }));
        Self::new(async move {
            if let Err(panic) = registered {
                return err(map_rejection(Rejection::Panicked(panic)));
            }
            match receiver.await {
                Ok(Ok(value)) => ok(value),
                Ok(Err(reason)) => err(map_rejection(Rejection::Failed(reason))),
                Err(_closed) => err(map_rejection(Rejection::Abandoned)),
            }
        })
    }

    /// First input to settle wins, Ok or Err. The rest are dropped.
    pub fn race(inputs: NonEmptyVec<Self>) -> Self {
        let inputs = inputs.into_vec();
        Self::new(async move {
            let (winner, index, _rest) = select_all(inputs).await;
            tracing::trace!(index, "Race settled");
            winner
        })
    }

    /// Await each input in turn. Ok of every value, or the first Err;
    /// inputs after it are never awaited.
    pub fn all(inputs: impl IntoIterator<Item = Self>) -> ResultAsync<Vec<T>, E> {
        let inputs: Vec<Self> = inputs.into_iter().collect();
        ResultAsync::new(async move {
            let mut values = Vec::with_capacity(inputs.len());
            for input in inputs {
                match input.await.into_variant() {
                    Variant::Ok(value) => values.push(value),
                    Variant::Err(error) => return err(error),
                }
            }
            ok(values)
        })
    }

    /// Await every input in turn and gather all errors.
    pub fn all_settled(inputs: impl IntoIterator<Item = Self>) -> ResultAsync<Vec<T>, Vec<E>> {
        let inputs: Vec<Self> = inputs.into_iter().collect();
        ResultAsync::new(async move {
            let mut settled = Vec::with_capacity(inputs.len());
            for input in inputs {
                settled.push(input.await);
            }
            combinators::all_settled(settled)
        })
    }

    // ── Transformation ───────────────────────────────────────

    pub fn map<U: 'static>(self, f: impl FnOnce(T) -> U + 'static) -> ResultAsync<U, E> {
        ResultAsync::new(async move { self.await.map(f) })
    }

    pub fn map_err<F: 'static>(self, f: impl FnOnce(E) -> F + 'static) -> ResultAsync<T, F> {
        ResultAsync::new(async move { self.await.map_err(f) })
    }

    pub fn map_both<U: 'static, F: 'static>(
        self,
        on_ok: impl FnOnce(T) -> U + 'static,
        on_err: impl FnOnce(E) -> F + 'static,
    ) -> ResultAsync<U, F> {
        ResultAsync::new(async move { self.await.map_both(on_ok, on_err) })
    }

    pub fn async_map<U: 'static, Fut>(self, f: impl FnOnce(T) -> Fut + 'static) -> ResultAsync<U, E>
    where
        Fut: Future<Output = U> + 'static,
    {
        ResultAsync::new(async move {
            match self.await.into_variant() {
                Variant::Ok(value) => ok(f(value).await),
                Variant::Err(error) => err(error),
            }
        })
    }

    pub fn async_map_err<F: 'static, Fut>(self, f: impl FnOnce(E) -> Fut + 'static) -> ResultAsync<T, F>
    where
        Fut: Future<Output = F> + 'static,
    {
        ResultAsync::new(async move {
            match self.await.into_variant() {
                Variant::Ok(value) => ok(value),
                Variant::Err(error) => err(f(error).await),
            }
        })
    }

    /// See [`Result::err_into`].
    pub fn err_into<F: From<E> + 'static>(self) -> ResultAsync<T, F> {
        ResultAsync::new(async move { self.await.err_into() })
    }

    pub fn flip(self) -> ResultAsync<E, T> {
        ResultAsync::new(async move { self.await.flip() })
    }

    // ── Chaining ─────────────────────────────────────────────

    pub fn and<U: 'static>(self, other: ResultAsync<U, E>) -> ResultAsync<U, E> {
        ResultAsync::new(async move {
            match self.await.into_variant() {
                Variant::Ok(_) => other.await,
                Variant::Err(error) => err(error),
            }
        })
    }

    pub fn or<F: 'static>(self, other: ResultAsync<T, F>) -> ResultAsync<T, F> {
        ResultAsync::new(async move {
            match self.await.into_variant() {
                Variant::Ok(value) => ok(value),
                Variant::Err(_) => other.await,
            }
        })
    }

    pub fn and_then<R>(self, f: impl FnOnce(T) -> R + 'static) -> ResultAsync<R::Ok, E>
    where
        R: IntoResultAsync<Err = E> + 'static,
        R::Ok: 'static,
    {
        ResultAsync::new(async move {
            match self.await.into_variant() {
                Variant::Ok(value) => f(value).into_result_async().await,
                Variant::Err(error) => err(error),
            }
        })
    }

    pub fn or_else<R>(self, f: impl FnOnce(E) -> R + 'static) -> ResultAsync<T, R::Err>
    where
        R: IntoResultAsync<Ok = T> + 'static,
        R::Err: 'static,
    {
        ResultAsync::new(async move {
            match self.await.into_variant() {
                Variant::Ok(value) => ok(value),
                Variant::Err(error) => f(error).into_result_async().await,
            }
        })
    }

    /// Run a fallible step for its outcome only: its Err replaces the
    /// original, its Ok value is discarded.
    pub fn and_through<R>(self, f: impl FnOnce(&T) -> R + 'static) -> Self
    where
        R: IntoResultAsync<Err = E> + 'static,
        R::Ok: 'static,
    {
        Self::new(async move {
            match self.await.into_variant() {
                Variant::Ok(value) => {
                    let step = f(&value).into_result_async();
                    step.await.map(|_| value)
                }
                Variant::Err(error) => err(error),
            }
        })
    }

    // ── Side effects ─────────────────────────────────────────

    /// See [`Result::and_tee`]: a panic in `f` is reported and swallowed.
    pub fn and_tee(self, f: impl FnOnce(&T) + 'static) -> Self {
        Self::new(async move { self.await.and_tee(f) })
    }

    /// See [`Result::or_tee`].
    pub fn or_tee(self, f: impl FnOnce(&E) + 'static) -> Self {
        Self::new(async move { self.await.or_tee(f) })
    }

    /// Await an async side effect on the Ok value. Panics raised while
    /// building or polling it are reported and swallowed; its output is
    /// discarded.
    pub fn async_and_tee<Fut>(self, f: impl FnOnce(&T) -> Fut + 'static) -> Self
    where
        Fut: Future + 'static,
    {
        Self::new(async move {
            let result = self.await;
            if let Variant::Ok(value) = result.as_variant() {
                swallow(TeeSite::AsyncAndTee, || f(value)).await;
            }
            result
        })
    }

    /// Async counterpart of [`ResultAsync::or_tee`].
    pub fn async_or_tee<Fut>(self, f: impl FnOnce(&E) -> Fut + 'static) -> Self
    where
        Fut: Future + 'static,
    {
        Self::new(async move {
            let result = self.await;
            if let Variant::Err(error) = result.as_variant() {
                swallow(TeeSite::AsyncOrTee, || f(error)).await;
            }
            result
        })
    }

    /// See [`Result::inspect`]: panics propagate to whoever awaits.
    pub fn inspect(self, f: impl FnOnce(&T) + 'static) -> Self {
        Self::new(async move { self.await.inspect(f) })
    }

    pub fn inspect_err(self, f: impl FnOnce(&E) + 'static) -> Self {
        Self::new(async move { self.await.inspect_err(f) })
    }

    // ── Queries ──────────────────────────────────────────────

    pub async fn is_ok(self) -> bool {
        self.await.is_ok()
    }

    pub async fn is_err(self) -> bool {
        self.await.is_err()
    }

    pub async fn tag(self) -> Tag {
        self.await.tag()
    }

    // ── Extraction ───────────────────────────────────────────

    pub async fn unwrap_or(self, default: T) -> T {
        self.await.unwrap_or(default)
    }

    pub async fn unwrap_or_else(self, f: impl FnOnce(E) -> T) -> T {
        self.await.unwrap_or_else(f)
    }

    pub async fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
        self.await.map_or(default, f)
    }

    pub async fn map_or_else<U>(self, default: impl FnOnce(E) -> U, f: impl FnOnce(T) -> U) -> U {
        self.await.map_or_else(default, f)
    }

    /// See [`Result::expect`]. The panic surfaces in whoever awaits.
    pub async fn expect(self, message: &str) -> T
    where
        E: fmt::Debug,
    {
        self.await.expect(message)
    }

    /// See [`Result::expect_err`].
    pub async fn expect_err(self, message: &str) -> E
    where
        T: fmt::Debug,
    {
        self.await.expect_err(message)
    }

    pub async fn match_with<R>(self, on_ok: impl FnOnce(T) -> R, on_err: impl FnOnce(E) -> R) -> R {
        self.await.match_with(on_ok, on_err)
    }

    pub async fn contains(self, candidate: &T) -> bool
    where
        T: PartialEq,
    {
        self.await.contains(candidate)
    }

    pub async fn contains_err(self, candidate: &E) -> bool
    where
        E: PartialEq,
    {
        self.await.contains_err(candidate)
    }

    // ── Conversion ───────────────────────────────────────────

    pub async fn to_nullable(self) -> std::option::Option<T> {
        self.await.to_nullable()
    }

    pub async fn to_undefined(self) -> std::option::Option<T> {
        self.await.to_undefined()
    }

    pub async fn to_option(self) -> Option<T> {
        self.await.to_option()
    }

    pub async fn to_option_err(self) -> Option<E> {
        self.await.to_option_err()
    }

    pub async fn into_tuple(self) -> (std::option::Option<E>, std::option::Option<T>) {
        self.await.into_tuple()
    }
}

impl<T: 'static, E: 'static> ResultAsync<Result<T, E>, E> {
    pub fn flatten(self) -> ResultAsync<T, E> {
        ResultAsync::new(async move { self.await.flatten() })
    }
}

impl<T: 'static> ResultAsync<T, T> {
    pub async fn merge(self) -> T {
        self.await.merge()
    }
}

impl<T: 'static, E: 'static> ResultAsync<Option<T>, E> {
    /// See [`Result::transpose`].
    pub async fn transpose(self) -> Option<Result<T, E>> {
        self.await.transpose()
    }
}

impl<E: 'static> ResultAsync<Bindings, E> {
    /// Async start of a Do-notation chain.
    pub fn begin() -> Self {
        Self::ok(Bindings::new())
    }

    /// Like [`Result::bind`](keel_types::Result::bind); the step may return
    /// a Result or a `ResultAsync`.
    pub fn bind<R>(
        self,
        name: impl Into<Cow<'static, str>> + 'static,
        f: impl FnOnce(&Bindings) -> R + 'static,
    ) -> Self
    where
        R: IntoResultAsync<Err = E> + 'static,
        R::Ok: 'static,
    {
        Self::new(async move {
            match self.await.into_variant() {
                Variant::Ok(ctx) => {
                    let step = f(&ctx).into_result_async();
                    step.await.map(|value| ctx.with(name, value))
                }
                Variant::Err(error) => err(error),
            }
        })
    }

    pub fn let_<V: 'static>(
        self,
        name: impl Into<Cow<'static, str>> + 'static,
        f: impl FnOnce(&Bindings) -> V + 'static,
    ) -> Self {
        self.map(move |ctx| {
            let value = f(&ctx);
            ctx.with(name, value)
        })
    }
}

async fn swallow<Fut: Future>(site: TeeSite, start: impl FnOnce() -> Fut) {
    let outcome = match panic::catch(start) {
        Ok(effect) => AssertUnwindSafe(effect)
            .catch_unwind()
            .await
            .map(drop)
            .map_err(Panic::from_payload),
        Err(panic) => Err(panic),
    };
    if let Err(panic) = outcome {
        report::suppressed(site, &panic);
    }
}

impl<T, E> Future for ResultAsync<T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<T: 'static, E: 'static> From<Result<T, E>> for ResultAsync<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}

impl<T, E> fmt::Debug for ResultAsync<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultAsync").finish_non_exhaustive()
    }
}

/// Lift a synchronous Result into the async surface.
pub trait ResultExt<T, E> {
    fn to_async(self) -> ResultAsync<T, E>;

    fn async_map<U: 'static, Fut>(self, f: impl FnOnce(T) -> Fut + 'static) -> ResultAsync<U, E>
    where
        Fut: Future<Output = U> + 'static;

    fn async_and_then<R>(self, f: impl FnOnce(T) -> R + 'static) -> ResultAsync<R::Ok, E>
    where
        R: IntoResultAsync<Err = E> + 'static,
        R::Ok: 'static;
}

impl<T: 'static, E: 'static> ResultExt<T, E> for Result<T, E> {
    fn to_async(self) -> ResultAsync<T, E> {
        ResultAsync::from_result(self)
    }

    fn async_map<U: 'static, Fut>(self, f: impl FnOnce(T) -> Fut + 'static) -> ResultAsync<U, E>
    where
        Fut: Future<Output = U> + 'static,
    {
        self.to_async().async_map(f)
    }

    fn async_and_then<R>(self, f: impl FnOnce(T) -> R + 'static) -> ResultAsync<R::Ok, E>
    where
        R: IntoResultAsync<Err = E> + 'static,
        R::Ok: 'static,
    {
        self.to_async().and_then(f)
    }
}

/// Any future resolving to a Result. This is a structural check: no brand
/// is carried, so plain `async` blocks qualify.
pub trait AsyncResult<T, E>: Future<Output = Result<T, E>> {
    fn match_with<R>(
        self,
        on_ok: impl FnOnce(T) -> R,
        on_err: impl FnOnce(E) -> R,
    ) -> impl Future<Output = R>
    where
        Self: Sized,
    {
        async move { self.await.match_with(on_ok, on_err) }
    }
}

impl<F, T, E> AsyncResult<T, E> for F where F: Future<Output = Result<T, E>> {}
