use std::any::Any;

use amascut_types::{AttackCounterMode, PluginConfig};

use super::TickCountdowns;
use crate::game_data::{EncounterId, animation_id, npc_id, npc_name};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, SignalContext, SignalHandler};

const ATK_COUNT_INIT: u8 = 3;
const ATK_COUNT_MAX: u8 = 5;
const MEDIC_FOURS_CAP: u8 = 3;

/// Ticks from an egg spawning to it hatching
const EGG_TICKS: u32 = 15;

// ─────────────────────────────────────────────────────────────────────────────
// Attack Counter
// ─────────────────────────────────────────────────────────────────────────────

/// Fireball attacks left before Kephri's next special.
///
/// With the Medic invocation the cycle alternates between runs of four and
/// five attacks, with the number of four-runs growing up to a cap. Only the
/// observed pattern is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackCounter {
    medic: bool,
    remaining: u8,
    prev: u8,
    seen_fours: u8,
    num_of_fours: u8,
}

impl AttackCounter {
    pub fn new(medic: bool) -> Self {
        let init = if medic { ATK_COUNT_INIT - 1 } else { ATK_COUNT_INIT };
        Self {
            medic,
            remaining: init,
            prev: init,
            seen_fours: 0,
            num_of_fours: 0,
        }
    }

    pub fn is_medic(&self) -> bool {
        self.medic
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn on_animation(&mut self, animation: u32) {
        match animation {
            animation_id::KEPHRI_FIREBALL => {
                self.remaining = self.remaining.saturating_sub(1);
            }
            animation_id::KEPHRI_SPECIAL if !self.medic => {
                self.remaining = ATK_COUNT_MAX;
            }
            animation_id::KEPHRI_SPECIAL => self.on_medic_special(),
            animation_id::KEPHRI_INACTIVE => {
                self.remaining = if self.medic {
                    ATK_COUNT_MAX
                } else {
                    (self.remaining + 1).max(2)
                };
            }
            _ => {}
        }
    }

    fn on_medic_special(&mut self) {
        if self.prev <= ATK_COUNT_INIT {
            self.prev = ATK_COUNT_MAX - 1;
            self.remaining = self.prev;
            self.num_of_fours = 1;
            self.seen_fours = 0;
        } else if self.prev == ATK_COUNT_MAX - 1 {
            self.seen_fours += 1;
            if self.seen_fours == self.num_of_fours {
                self.prev = ATK_COUNT_MAX;
            }
            self.remaining = self.prev;
        } else {
            self.prev = ATK_COUNT_MAX - 1;
            self.remaining = self.prev;
            self.seen_fours = 0;
            self.num_of_fours = (self.num_of_fours + 1).min(MEDIC_FOURS_CAP);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kephri
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Kephri {
    npc_index: Option<u32>,
    /// Built from the configured mode on first signal after start
    counter: Option<AttackCounter>,
    eggs: TickCountdowns<u32>,
}

impl Kephri {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attacks_until_special(&self) -> Option<u8> {
        self.counter.map(|c| c.remaining())
    }

    /// `(npc index, ticks until hatch)` for live eggs
    pub fn egg_countdowns(&self) -> Vec<(u32, u32)> {
        let mut eggs: Vec<_> = self.eggs.iter().collect();
        eggs.sort_unstable_by_key(|&(_, ticks)| ticks);
        eggs
    }

    fn sync_mode(&mut self, mode: AttackCounterMode) {
        let medic = mode == AttackCounterMode::Medic;
        if self.counter.is_none_or(|c| c.is_medic() != medic) {
            self.counter = Some(AttackCounter::new(medic));
        }
    }

    fn reset(&mut self) {
        self.npc_index = None;
        self.counter = None;
        self.eggs.clear();
    }
}

impl SignalHandler for Kephri {
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        self.sync_mode(ctx.config.kephri_attack_counter);

        match signal {
            GameSignal::GameTick { .. } => self.eggs.on_tick(),
            GameSignal::NpcSpawned { npc } => {
                if npc.name == npc_name::KEPHRI {
                    self.npc_index = Some(npc.index);
                } else if npc.id == npc_id::KEPHRI_EGG {
                    self.eggs.set(npc.index, EGG_TICKS);
                }
            }
            GameSignal::NpcDespawned { npc } => {
                if self.npc_index == Some(npc.index) {
                    tracing::debug!("Kephri despawned, resetting attack counter");
                    self.reset();
                    self.sync_mode(ctx.config.kephri_attack_counter);
                } else if npc.id == npc_id::KEPHRI_EGG {
                    self.eggs.remove(&npc.index);
                }
            }
            GameSignal::NpcChanged { npc, .. } if npc.id == npc_id::KEPHRI_DOWNED => {
                self.npc_index = None;
            }
            GameSignal::AnimationChanged { npc, animation_id }
                if self.npc_index == Some(npc.index) =>
            {
                if let Some(counter) = &mut self.counter {
                    counter.on_animation(*animation_id);
                }
            }
            _ => {}
        }
    }
}

impl LifecycleComponent for Kephri {
    fn name(&self) -> &'static str {
        "kephri"
    }

    fn is_enabled(&self, config: &PluginConfig, state: &SessionState) -> bool {
        config.kephri_attack_counter != AttackCounterMode::Off
            && state.is_encounter(EncounterId::Kephri)
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
