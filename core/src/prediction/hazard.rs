use std::cmp::Ordering;

use serde::Serialize;

/// Protection prayer that neutralizes a hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrayerKind {
    Magic,
    Missiles,
    Melee,
}

impl PrayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrayerKind::Magic => "Protect from Magic",
            PrayerKind::Missiles => "Protect from Missiles",
            PrayerKind::Melee => "Protect from Melee",
        }
    }
}

/// A hazard that will land in `ticks` ticks.
///
/// Invariant: `ticks > 0` while the hazard is held by a queue. Entries that
/// reach zero are removed during the same decay step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictedHazard {
    pub prayer: PrayerKind,
    pub ticks: u32,
    /// Lower sorts first among hazards landing on the same tick
    pub priority: i32,
}

impl PredictedHazard {
    pub fn new(prayer: PrayerKind, ticks: u32) -> Self {
        Self {
            prayer,
            ticks,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.ticks == 0
    }

    /// Total urgency order: ticks ascending, then priority ascending.
    pub fn cmp_urgency(&self, other: &Self) -> Ordering {
        self.ticks
            .cmp(&other.ticks)
            .then(self.priority.cmp(&other.priority))
    }
}

/// What a component recommends praying right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrayerAdvice {
    pub prayer: PrayerKind,
    /// Ticks until the hazard lands, when the advice comes from a prediction
    pub ticks: Option<u32>,
    pub source: &'static str,
}

impl PrayerAdvice {
    pub fn from_hazard(hazard: &PredictedHazard, source: &'static str) -> Self {
        Self {
            prayer: hazard.prayer,
            ticks: Some(hazard.ticks),
            source,
        }
    }
}
