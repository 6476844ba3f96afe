//! Configuration for Keel.
//!
//! The file is TOML:
//!
//! ```toml
//! [tee]
//! report = "warn"        # off | trace | debug | info | warn | error
//! observer = true
//!
//! [diagnostics]
//! payload_preview_chars = 200
//! ```
//!
//! Raw sections stay private; [`load`] and friends resolve them into
//! [`Settings`], so a caller never sees an unvalidated value.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use keel_types::settings::{ObserverForwarding, PayloadPreview, ReportLevel, Settings, SettingsError};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "KEEL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown tee report level {value:?}")]
    UnknownReportLevel { value: String },
    #[error(transparent)]
    Invalid(#[from] SettingsError),
}

impl ConfigError {
    /// The file involved, for errors tied to one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::UnknownReportLevel { .. } | ConfigError::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    tee: Option<RawTee>,
    diagnostics: Option<RawDiagnostics>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTee {
    report: Option<String>,
    observer: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDiagnostics {
    payload_preview_chars: Option<usize>,
}

impl TryFrom<RawConfig> for Settings {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let tee = raw.tee.unwrap_or_default();
        let diagnostics = raw.diagnostics.unwrap_or_default();

        let report_level = match tee.report {
            Some(value) => ReportLevel::parse(&value).ok_or(ConfigError::UnknownReportLevel { value })?,
            None => ReportLevel::default(),
        };
        let forwarding = match tee.observer {
            Some(false) => ObserverForwarding::Disabled,
            Some(true) | None => ObserverForwarding::Enabled,
        };
        let payload_preview = match diagnostics.payload_preview_chars {
            Some(chars) => PayloadPreview::new(chars)?,
            None => PayloadPreview::default(),
        };

        Ok(Settings::new(report_level, forwarding, payload_preview))
    }
}

/// Resolve settings from TOML text.
pub fn parse(text: &str, origin: &Path) -> Result<Settings, ConfigError> {
    let raw: RawConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    Settings::try_from(raw)
}

/// Resolve settings from the file at `path`.
pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) => {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    parse(&text, path).inspect_err(|e| tracing::warn!("Rejected config at {:?}: {}", path, e))
}

/// Resolve settings from the default location. A missing file (or no
/// resolvable location) yields defaults.
pub fn load() -> Result<Settings, ConfigError> {
    let Some(path) = config_path() else {
        tracing::debug!("No config location; using default settings");
        return Ok(Settings::default());
    };
    if !path.exists() {
        tracing::debug!("No config at {:?}; using default settings", path);
        return Ok(Settings::default());
    }
    load_from(&path)
}

/// `$KEEL_CONFIG`, else `<config_dir>/keel/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    resolve_path(env::var_os(CONFIG_ENV))
}

fn resolve_path(explicit: Option<OsString>) -> Option<PathBuf> {
    match explicit {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => dirs::config_dir().map(|dir| dir.join("keel").join("config.toml")),
    }
}
