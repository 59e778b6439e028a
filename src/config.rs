//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <file>`, else `$XDG_CONFIG_HOME/exprtree/exprtree.toml`
//! 3. Environment variables: `EXPRTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::DivisionMode;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("cannot determine config directory")]
    NoConfigDir,

    #[error("config error: {message}")]
    Invalid { message: String },
}

/// Unified configuration for exprtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Separator between traversal values (default: single space)
    pub separator: String,
    /// Integer division semantics (default: truncate)
    pub division: DivisionMode,
    /// Colored labels in terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator: " ".into(),
            division: DivisionMode::Truncate,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (None = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub separator: Option<String>,
    pub division: Option<DivisionMode>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for exprtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "exprtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("exprtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Invalid {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Invalid {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            division: overlay.division.unwrap_or(self.division),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_file` must exist; the global file is optional.
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(SettingsError::NotFound(path.to_path_buf()));
                }
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        debug!("Loading global config: {}", global_path.display());
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply EXPRTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("EXPRTREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("separator") {
            settings.separator = val;
        }
        if let Ok(val) = config.get_string("division") {
            settings.division = parse_division(&val)?;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Invalid {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# exprtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/exprtree/exprtree.toml  (or --config <file>)
#   Env:    EXPRTREE_* environment variables (explicit overrides)

# Separator printed between traversal values
# separator = " "

# Integer division: "truncate" (toward zero) or "floor" (toward negative infinity)
# division = "truncate"

# Colored labels in terminal output
# color = true
"#
        .to_string()
    }
}

fn parse_division(value: &str) -> Result<DivisionMode, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "truncate" => Ok(DivisionMode::Truncate),
        "floor" => Ok(DivisionMode::Floor),
        other => Err(SettingsError::Invalid {
            message: format!("division must be 'truncate' or 'floor', got '{other}'"),
        }),
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError::Invalid {
        message: e.to_string(),
    }
}
