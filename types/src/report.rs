//! Reporting of panics swallowed by `and_tee` / `or_tee`.
//!
//! The tee operations never let a side-effect panic change the Result they
//! return. The panic is still visible: it is emitted as a `tracing` event at
//! the configured [`ReportLevel`](crate::settings::ReportLevel) and, when
//! forwarding is enabled, handed to an observer installed once per process.

use std::fmt;
use std::sync::OnceLock;

use crate::panic::Panic;
use crate::settings::{self, ReportLevel};

/// Which operation swallowed the panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeeSite {
    AndTee,
    OrTee,
    AsyncAndTee,
    AsyncOrTee,
}

impl TeeSite {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AndTee => "and_tee",
            Self::OrTee => "or_tee",
            Self::AsyncAndTee => "async_and_tee",
            Self::AsyncOrTee => "async_or_tee",
        }
    }
}

impl fmt::Display for TeeSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A swallowed panic, as seen by an observer.
#[derive(Debug, Clone, Copy)]
pub struct Suppressed<'a> {
    site: TeeSite,
    panic: &'a Panic,
}

impl<'a> Suppressed<'a> {
    #[must_use]
    pub const fn site(&self) -> TeeSite {
        self.site
    }

    #[must_use]
    pub const fn panic(&self) -> &'a Panic {
        self.panic
    }
}

type Observer = Box<dyn Fn(&Suppressed<'_>) + Send + Sync>;

static OBSERVER: OnceLock<Observer> = OnceLock::new();

/// Install the process-wide observer. Returns `false` if one already exists.
pub fn set_observer(observer: impl Fn(&Suppressed<'_>) + Send + Sync + 'static) -> bool {
    OBSERVER.set(Box::new(observer)).is_ok()
}

/// Record a panic swallowed at `site`. Never panics itself on behalf of the
/// caller: an observer that panics is caught and logged.
pub fn suppressed(site: TeeSite, panic: &Panic) {
    let settings = settings::current();
    emit(settings.report_level(), site, panic);

    if !settings.forwarding().is_enabled() {
        return;
    }
    if let Some(observer) = OBSERVER.get() {
        let event = Suppressed { site, panic };
        if let Err(observer_panic) = crate::panic::catch(|| observer(&event)) {
            tracing::warn!(
                site = %site,
                error = %observer_panic,
                "Suppression observer panicked"
            );
        }
    }
}

fn emit(level: ReportLevel, site: TeeSite, panic: &Panic) {
    match level {
        ReportLevel::Off => {}
        ReportLevel::Trace => {
            tracing::trace!(site = %site, panic = %panic, "Suppressed panic in side effect");
        }
        ReportLevel::Debug => {
            tracing::debug!(site = %site, panic = %panic, "Suppressed panic in side effect");
        }
        ReportLevel::Info => {
            tracing::info!(site = %site, panic = %panic, "Suppressed panic in side effect");
        }
        ReportLevel::Warn => {
            tracing::warn!(site = %site, panic = %panic, "Suppressed panic in side effect");
        }
        ReportLevel::Error => {
            tracing::error!(site = %site, panic = %panic, "Suppressed panic in side effect");
        }
    }
}
