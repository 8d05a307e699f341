//! Plugin configuration
//!
//! Re-exports the shared config types from amascut-types and adds
//! persistence through confy.

use std::path::{Path, PathBuf};

pub use amascut_types::{AttackCounterMode, CONFIG_GROUP, PluginConfig, PrayerMode};

use super::error::ConfigError;

const APP_NAME: &str = "amascut";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// PluginConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for PluginConfig persistence
pub trait PluginConfigExt: Sized {
    fn load() -> Result<Self, ConfigError>;
    /// Load the persisted config, falling back to defaults on any error
    fn load_or_default() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn from_toml_file(path: &Path) -> Result<Self, ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
}

impl PluginConfigExt for PluginConfig {
    fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Using default configuration");
            Self::default()
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }
}
