//! Keel: algebraic error handling.
//!
//! ```
//! use keel::{Result, err, ok, combinators};
//!
//! let parsed: Vec<Result<i32, String>> = vec![ok(1), ok(2), ok(3)];
//! assert_eq!(combinators::all(parsed), ok(vec![1, 2, 3]));
//!
//! let halted: Vec<Result<i32, &str>> = vec![ok(1), err("x"), ok(3)];
//! assert_eq!(combinators::all(halted), err("x"));
//! ```
//!
//! The sync algebra lives in [`keel_types`], the async wrapper in
//! [`keel_future`], and file configuration in [`keel_config`]. This crate
//! re-exports the everyday surface and wires configuration in through
//! [`init`].

use thiserror::Error;

pub use keel_config::{self as config, ConfigError};
pub use keel_future::{
    AsyncResult, Callback, IntoResultAsync, Rejection, ResultAsync, ResultExt, safe_try, safe_try_async,
};
pub use keel_types::{
    Bail, BindingError, Bindings, Family, Flow, JsonError, NonEmptyVec, Option, Panic, Result, SCHEMA_VERSION,
    Settings, Tag, Tagged, UnwrapError, Variant, begin, bindings, combinators, err, error_tag, family_of, is_option,
    is_result, none, ok, report, schema, settings, some, try_catch, unchecked,
};

#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    AlreadyInstalled(#[from] settings::AlreadyInstalled),
}

/// Load configuration from the default location and install it for the
/// process. Call once, before the first `expect` or tee runs.
pub fn init() -> std::result::Result<Settings, InitError> {
    let loaded = config::load()?;
    install(loaded)
}

/// Install already-resolved settings.
pub fn install(resolved: Settings) -> std::result::Result<Settings, InitError> {
    settings::install(resolved)?;
    tracing::debug!(
        report = resolved.report_level().as_str(),
        forwarding = resolved.forwarding().is_enabled(),
        preview = resolved.payload_preview().chars(),
        "Keel settings installed"
    );
    Ok(resolved)
}
