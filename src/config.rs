use std::fs;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

pub const CONFIG_ENV: &str = "GOENV_CONFIG";
pub const STRICT_ENV: &str = "GOENV_STRICT";
pub const DEFAULT_DESTINATION: &str = ".goenv";

/// How the workspace builder reacts to a failed filesystem step.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure, record it, and carry on with the remaining steps.
    #[default]
    Continue,
    /// Stop at the first failure and exit non-zero.
    Abort,
}

/// Optional configuration document loaded from `~/.goenv/config.toml` by default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoenvConfig {
    pub default_destination: Option<String>,
    pub on_error: Option<ErrorPolicy>,
}

impl GoenvConfig {
    pub fn default_destination(&self) -> &str {
        self.default_destination
            .as_deref()
            .unwrap_or(DEFAULT_DESTINATION)
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.on_error.unwrap_or_default()
    }

    /// Apply `GOENV_STRICT`; any value other than empty, `0` or `false` forces `Abort`.
    pub fn with_strict_override(mut self, strict: Option<&str>) -> Self {
        if let Some(value) = strict {
            let value = value.trim();
            if !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false")) {
                self.on_error = Some(ErrorPolicy::Abort);
            }
        }
        self
    }
}

/// `$GOENV_CONFIG` if set, otherwise `~/.goenv/config.toml`.
pub fn resolve_path() -> Option<Utf8PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Utf8PathBuf::from_path_buf(explicit.into()).ok();
    }
    let home = dirs::home_dir()?;
    Utf8PathBuf::from_path_buf(home.join(".goenv").join("config.toml")).ok()
}

/// Load a configuration file from disk and deserialize it.
pub fn load_from_path(path: &Utf8Path) -> Result<GoenvConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}

/// Load the resolved configuration, falling back to defaults when no file exists.
pub fn load() -> Result<GoenvConfig> {
    let config = match resolve_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(config = %path, "loading configuration");
            load_from_path(&path)?
        }
        Some(path) if path.exists() => {
            bail!("config path {} is not a file", path);
        }
        _ => GoenvConfig::default(),
    };
    let strict = std::env::var(STRICT_ENV).ok();
    Ok(config.with_strict_override(strict.as_deref()))
}
