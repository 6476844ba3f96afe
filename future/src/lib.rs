//! Async wrapper for the Keel Result algebra.
//!
//! [`ResultAsync`] is a single-threaded future (`!Send`) that resolves to a
//! [`keel_types::Result`] and never fails on its own. Any executor can await
//! it; nothing here spawns tasks or owns a runtime.

#![allow(clippy::missing_errors_doc)]

pub mod flow;
pub mod result_async;

pub use flow::{AsyncRoutine, Routine, SyncRoutine, safe_try, safe_try_async};
pub use result_async::{AsyncResult, Callback, IntoResultAsync, Rejection, ResultAsync, ResultExt};
