mod config;
mod error;

pub use config::{
    AttackCounterMode, CONFIG_GROUP, PluginConfig, PluginConfigExt, PrayerMode,
};
pub use error::ConfigError;
