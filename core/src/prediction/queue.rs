use hashbrown::HashMap;

use super::conversion::TickConversion;
use super::hazard::{PrayerKind, PredictedHazard};

/// Ticks an occurrence is remembered after its hazard would have landed
const SEEN_GRACE_TICKS: u32 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Hazard Signals
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Duration {
    /// Remaining client cycles plus distance to travel
    Cycles { remaining: i32, distance: u32 },
    /// Already expressed in ticks
    Ticks(u32),
}

/// A "hazard was just created" signal, as seen by a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardSignal {
    prayer: PrayerKind,
    duration: Duration,
    extra_ticks: u32,
    priority: i32,
    occurrence: Option<(u32, i32)>,
}

impl HazardSignal {
    /// Hazard whose remaining duration is measured in client cycles
    pub fn cycles(prayer: PrayerKind, remaining_cycles: i32) -> Self {
        Self {
            prayer,
            duration: Duration::Cycles {
                remaining: remaining_cycles,
                distance: 0,
            },
            extra_ticks: 0,
            priority: 0,
            occurrence: None,
        }
    }

    /// Hazard that lands a fixed number of ticks from now
    pub fn fixed(prayer: PrayerKind, ticks: u32) -> Self {
        Self {
            duration: Duration::Ticks(ticks),
            ..Self::cycles(prayer, 0)
        }
    }

    /// Distance in tiles the hazard still has to travel
    pub fn travelling(mut self, distance_tiles: u32) -> Self {
        if let Duration::Cycles { distance, .. } = &mut self.duration {
            *distance = distance_tiles;
        }
        self
    }

    /// Ticks added after conversion (impact animations, splat delays)
    pub fn delayed(mut self, extra_ticks: u32) -> Self {
        self.extra_ticks = extra_ticks;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Stable identity of the occurrence, e.g. projectile ID and start cycle.
    /// Repeated signals with the same identity are only queued once.
    pub fn occurrence(mut self, source_id: u32, stamp: i32) -> Self {
        self.occurrence = Some((source_id, stamp));
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Queue
// ─────────────────────────────────────────────────────────────────────────────

/// Urgency-ordered forecast of incoming hazards for one encounter.
///
/// Hazards are kept sorted by [`PredictedHazard::cmp_urgency`]; hazards that
/// compare equal keep arrival order. `on_tick` must run once per game tick,
/// after that tick's hazard signals and before the overlay reads
/// [`most_urgent`](Self::most_urgent).
#[derive(Debug, Default)]
pub struct AttackPredictionQueue {
    conversion: TickConversion,
    hazards: Vec<PredictedHazard>,
    /// Queued occurrences and the ticks left before they are forgotten
    seen: HashMap<(u32, i32), u32>,
}

impl AttackPredictionQueue {
    pub fn new(conversion: TickConversion) -> Self {
        Self {
            conversion,
            hazards: Vec::new(),
            seen: HashMap::new(),
        }
    }

    pub fn conversion(&self) -> TickConversion {
        self.conversion
    }

    /// Convert and enqueue a hazard. Returns false if the signal repeats an
    /// occurrence already queued or converts to zero ticks.
    pub fn on_hazard_created(&mut self, signal: HazardSignal) -> bool {
        if let Some(key) = signal.occurrence
            && self.seen.contains_key(&key)
        {
            return false;
        }

        let ticks = match signal.duration {
            Duration::Cycles { remaining, distance } => {
                self.conversion.cycles_to_ticks(remaining, distance)
            }
            Duration::Ticks(ticks) => ticks,
        };
        if ticks == 0 {
            tracing::trace!(prayer = ?signal.prayer, "Dropping hazard that already landed");
            return false;
        }

        let ticks = ticks.saturating_add(signal.extra_ticks);
        if let Some(key) = signal.occurrence {
            self.seen.insert(key, ticks.saturating_add(SEEN_GRACE_TICKS));
        }

        let hazard = PredictedHazard::new(signal.prayer, ticks).with_priority(signal.priority);
        self.push(hazard);
        true
    }

    /// Insert an already-converted hazard. Zero-tick hazards are ignored.
    pub fn push(&mut self, hazard: PredictedHazard) {
        if hazard.is_expired() {
            return;
        }
        let idx = self
            .hazards
            .partition_point(|h| h.cmp_urgency(&hazard).is_le());
        self.hazards.insert(idx, hazard);
    }

    /// Decay every hazard by one tick and drop the ones that landed.
    pub fn on_tick(&mut self) {
        for hazard in &mut self.hazards {
            hazard.ticks = hazard.ticks.saturating_sub(1);
        }
        self.hazards.retain(|h| !h.is_expired());

        self.seen.retain(|_, ttl| {
            *ttl = ttl.saturating_sub(1);
            *ttl > 0
        });
    }

    pub fn most_urgent(&self) -> Option<PredictedHazard> {
        self.hazards.first().copied()
    }

    /// All live hazards, most urgent first
    pub fn snapshot(&self) -> Vec<PredictedHazard> {
        self.hazards.clone()
    }

    /// Drop all predictions and forget seen occurrences.
    pub fn reset(&mut self) {
        self.hazards.clear();
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    /// True if any live hazard needs this prayer
    pub fn contains(&self, prayer: PrayerKind) -> bool {
        self.hazards.iter().any(|h| h.prayer == prayer)
    }
}
