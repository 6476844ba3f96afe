//! Configuration files resolved into settings.

use std::fs;

use keel::config::{ConfigError, load_from};
use keel::settings::{ObserverForwarding, ReportLevel, Settings};

#[test]
fn file_sections_resolve_into_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[tee]\nreport = \"info\"\nobserver = false\n\n[diagnostics]\npayload_preview_chars = 32\n",
    )
    .unwrap();

    let settings = load_from(&path).unwrap();
    assert_eq!(settings.report_level(), ReportLevel::Info);
    assert_eq!(settings.forwarding(), ObserverForwarding::Disabled);
    assert_eq!(settings.payload_preview().chars(), 32);
}

#[test]
fn invalid_values_are_rejected_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[diagnostics]\npayload_preview_chars = 1\n").unwrap();
    assert!(matches!(load_from(&path), Err(ConfigError::Invalid(_))));

    fs::write(&path, "[tee]\nreport = [1]\n").unwrap();
    let error = load_from(&path).unwrap_err();
    assert!(matches!(error, ConfigError::Parse { .. }));
    assert_eq!(error.path(), Some(path.as_path()));
}

#[test]
fn settings_install_once() {
    let _first = keel::install(Settings::default());
    let second = keel::install(Settings::default());
    assert!(matches!(second, Err(keel::InitError::AlreadyInstalled(_))));
}
