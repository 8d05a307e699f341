//! Shared configuration types for Amascut
//!
//! This crate contains serializable configuration types that are shared between
//! the engine (amascut-core) and the replay CLI (amascut-cli).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Prayer Display
// ─────────────────────────────────────────────────────────────────────────────

/// Where prayer recommendations are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrayerMode {
    /// No prayer recommendations
    Off,
    /// Highlight the prayer in the prayer book widget
    Widget,
    /// Show an info box with the prayer sprite
    InfoBox,
    /// Widget and info box
    #[default]
    All,
}

impl PrayerMode {
    /// Returns true if any prayer surface is enabled
    pub fn is_enabled(&self) -> bool {
        !matches!(self, PrayerMode::Off)
    }

    pub fn shows_widget(&self) -> bool {
        matches!(self, PrayerMode::Widget | PrayerMode::All)
    }

    pub fn shows_info_box(&self) -> bool {
        matches!(self, PrayerMode::InfoBox | PrayerMode::All)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kephri
// ─────────────────────────────────────────────────────────────────────────────

/// Kephri attack counter variant.
///
/// The attack cycle differs when the "Medic" invocation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackCounterMode {
    #[default]
    Off,
    Normal,
    Medic,
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level plugin configuration.
///
/// Every field has a default so partial config files load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub prayer_mode: PrayerMode,

    pub zebak_prayer_indicator: bool,
    pub akkha_prayer_indicator: bool,
    pub warden_p2_prayer_indicator: bool,
    pub warden_p3_prayer_indicator: bool,

    pub kephri_attack_counter: AttackCounterMode,

    /// Show HP remaining until the next boss phase breakpoint
    pub health_counters: bool,

    /// Read path levels from the Nexus widget (needed for Zebak projectile timing)
    pub path_level_tracking: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            prayer_mode: PrayerMode::default(),
            zebak_prayer_indicator: true,
            akkha_prayer_indicator: true,
            warden_p2_prayer_indicator: true,
            warden_p3_prayer_indicator: true,
            kephri_attack_counter: AttackCounterMode::default(),
            health_counters: true,
            path_level_tracking: true,
        }
    }
}

/// Config group name used to filter `ConfigChanged` notifications.
pub const CONFIG_GROUP: &str = "amascut";
