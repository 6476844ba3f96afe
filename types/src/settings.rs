//! Resolved runtime settings.
//!
//! These types represent fully-validated configuration state. Raw TOML
//! structs stay private in `keel-config`, which resolves them into these
//! types at the parse boundary. Existence of a value is the proof of its
//! validity.
//!
//! Settings are installed at most once per process. Until then (or if never
//! installed) [`current`] yields [`Settings::default`].

use std::sync::OnceLock;

use thiserror::Error;

/// Level at which suppressed tee panics are reported through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportLevel {
    Off,
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl ReportLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Some(Self::Off),
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Whether suppressed tee panics reach an installed observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserverForwarding {
    #[default]
    Enabled,
    Disabled,
}

impl ObserverForwarding {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("payload preview must allow at least {min} characters (got {got})")]
    PreviewTooShort { min: usize, got: usize },
}

/// Upper bound on the characters of a payload rendered into an
/// `UnwrapError`.
///
/// Invariant: at least [`PayloadPreview::MIN`] so an ellipsis always fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadPreview(usize);

impl PayloadPreview {
    pub const MIN: usize = 8;
    pub const DEFAULT: Self = Self(200);

    pub fn new(chars: usize) -> Result<Self, SettingsError> {
        if chars < Self::MIN {
            return Err(SettingsError::PreviewTooShort {
                min: Self::MIN,
                got: chars,
            });
        }
        Ok(Self(chars))
    }

    #[must_use]
    pub const fn chars(self) -> usize {
        self.0
    }
}

impl Default for PayloadPreview {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Process-wide behavior knobs of the algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    report_level: ReportLevel,
    forwarding: ObserverForwarding,
    payload_preview: PayloadPreview,
}

impl Settings {
    pub const DEFAULT: Self = Self::new(
        ReportLevel::Debug,
        ObserverForwarding::Enabled,
        PayloadPreview::DEFAULT,
    );

    #[must_use]
    pub const fn new(
        report_level: ReportLevel,
        forwarding: ObserverForwarding,
        payload_preview: PayloadPreview,
    ) -> Self {
        Self {
            report_level,
            forwarding,
            payload_preview,
        }
    }

    #[must_use]
    pub const fn report_level(&self) -> ReportLevel {
        self.report_level
    }

    #[must_use]
    pub const fn forwarding(&self) -> ObserverForwarding {
        self.forwarding
    }

    #[must_use]
    pub const fn payload_preview(&self) -> PayloadPreview {
        self.payload_preview
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("runtime settings were already installed")]
pub struct AlreadyInstalled;

static SETTINGS: OnceLock<Settings> = OnceLock::new();
static DEFAULT_SETTINGS: Settings = Settings::DEFAULT;

/// Install `settings` for the rest of the process.
pub fn install(settings: Settings) -> Result<(), AlreadyInstalled> {
    SETTINGS.set(settings).map_err(|_rejected| AlreadyInstalled)
}

/// The installed settings, or defaults when nothing was installed. Reading
/// never installs anything.
#[must_use]
pub fn current() -> &'static Settings {
    SETTINGS.get().unwrap_or(&DEFAULT_SETTINGS)
}
