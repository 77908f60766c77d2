use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::warn;

use crate::controller::FailurePolicy;

pub const SETTINGS_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fetch_delay_ms: u64,
    pub catalog_path: Option<PathBuf>,
    pub simulate_failure: bool,
    pub failure_policy: FailurePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch_delay_ms: client_core::DEFAULT_FETCH_DELAY.as_millis() as u64,
            catalog_path: None,
            simulate_failure: false,
            failure_policy: FailurePolicy::Transition,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    fetch_delay_ms: Option<u64>,
    catalog_path: Option<PathBuf>,
    simulate_failure: Option<bool>,
    on_fetch_error: Option<String>,
}

/// Defaults, then `catalog.toml` in the working directory, then the environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new(SETTINGS_FILE));
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };

    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.fetch_delay_ms {
                settings.fetch_delay_ms = v;
            }
            if let Some(v) = file_cfg.catalog_path {
                settings.catalog_path = Some(v);
            }
            if let Some(v) = file_cfg.simulate_failure {
                settings.simulate_failure = v;
            }
            if let Some(v) = file_cfg.on_fetch_error {
                apply_policy(settings, "on_fetch_error", &v);
            }
        }
        Err(err) => warn!(path = %path.display(), "ignoring unreadable settings file: {err}"),
    }
}

/// Applies environment overrides read through `lookup`. `APP__*` names win over the short ones.
pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for name in ["CATALOG_FETCH_DELAY_MS", "APP__FETCH_DELAY_MS"] {
        if let Some(v) = lookup(name) {
            match v.trim().parse::<u64>() {
                Ok(parsed) => settings.fetch_delay_ms = parsed,
                Err(err) => warn!(%name, value = %v, "ignoring invalid delay: {err}"),
            }
        }
    }

    for name in ["CATALOG_PATH", "APP__CATALOG_PATH"] {
        if let Some(v) = lookup(name) {
            if v.trim().is_empty() {
                settings.catalog_path = None;
            } else {
                settings.catalog_path = Some(PathBuf::from(v));
            }
        }
    }

    if let Some(v) = lookup("APP__SIMULATE_FAILURE") {
        match parse_flag(&v) {
            Some(flag) => settings.simulate_failure = flag,
            None => warn!(value = %v, "ignoring invalid APP__SIMULATE_FAILURE"),
        }
    }

    if let Some(v) = lookup("APP__ON_FETCH_ERROR") {
        apply_policy(settings, "APP__ON_FETCH_ERROR", &v);
    }
}

fn apply_policy(settings: &mut Settings, source: &str, value: &str) {
    match value.parse::<FailurePolicy>() {
        Ok(policy) => settings.failure_policy = policy,
        Err(err) => warn!(%source, "{err}"),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
