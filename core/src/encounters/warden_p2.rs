use std::any::Any;

use amascut_types::PluginConfig;

use super::is_challenge_boundary;
use crate::game_data::{EncounterId, npc_id, projectile_id};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::prediction::{
    AttackPredictionQueue, HazardSignal, PrayerAdvice, PrayerKind, PredictedHazard,
    TickConversion,
};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, SignalContext, SignalHandler, WorldPoint};

/// Scimitar/arrow/spell specials always land this many ticks after launch
const SPECIAL_PROJECTILE_TICKS: u32 = 5;

/// Skulls travel slower than the client reports; extra cycles per tile
const SKULL_CYCLES_PER_TILE: u32 = 3;

const WARDEN_IDS: [u32; 4] = [
    npc_id::ELIDINIS_WARDEN_P2,
    npc_id::ELIDINIS_WARDEN_P2_EXPOSED,
    npc_id::TUMEKENS_WARDEN_P2,
    npc_id::TUMEKENS_WARDEN_P2_EXPOSED,
];

enum WardenAttack {
    Skull(PrayerKind),
    Special(PrayerKind),
}

impl WardenAttack {
    fn from_projectile(id: u32) -> Option<Self> {
        match id {
            projectile_id::WARDEN_WHITE_SKULL => Some(Self::Skull(PrayerKind::Missiles)),
            projectile_id::WARDEN_RED_SKULL => Some(Self::Skull(PrayerKind::Magic)),
            projectile_id::WARDEN_ARCANE_SCIMITAR => Some(Self::Special(PrayerKind::Melee)),
            projectile_id::WARDEN_WHITE_ARROW => Some(Self::Special(PrayerKind::Missiles)),
            projectile_id::WARDEN_BLUE_SPELL => Some(Self::Special(PrayerKind::Magic)),
            _ => None,
        }
    }
}

pub struct WardenP2 {
    queue: AttackPredictionQueue,
    npc_index: Option<u32>,
    /// Exposed core and the ticks it has been out
    core: Option<(u32, u32)>,
    damage_dealt: Option<i32>,
}

impl Default for WardenP2 {
    fn default() -> Self {
        Self::new()
    }
}

impl WardenP2 {
    pub fn new() -> Self {
        Self {
            queue: AttackPredictionQueue::new(TickConversion::travelling(SKULL_CYCLES_PER_TILE)),
            npc_index: None,
            core: None,
            damage_dealt: None,
        }
    }

    pub fn most_urgent(&self) -> Option<PredictedHazard> {
        self.queue.most_urgent()
    }

    pub fn hazards(&self) -> Vec<PredictedHazard> {
        self.queue.snapshot()
    }

    /// Ticks since the core was exposed
    pub fn core_ticks(&self) -> Option<u32> {
        self.core.map(|(_, ticks)| ticks)
    }

    /// HP taken off the warden in this phase
    pub fn damage_dealt(&self) -> Option<i32> {
        self.damage_dealt
    }

    fn reset(&mut self) {
        self.queue.reset();
        self.npc_index = None;
        self.core = None;
        self.damage_dealt = None;
    }

    fn on_projectile(
        &mut self,
        id: u32,
        remaining_cycles: i32,
        start_cycle: i32,
        origin: &WorldPoint,
        player: Option<WorldPoint>,
    ) {
        if remaining_cycles <= 0 {
            return;
        }
        let Some(attack) = WardenAttack::from_projectile(id) else {
            return;
        };

        let signal = match attack {
            WardenAttack::Skull(prayer) => {
                let distance = player.map_or(0, |p| origin.distance_to_2d(&p));
                HazardSignal::cycles(prayer, remaining_cycles).travelling(distance)
            }
            WardenAttack::Special(prayer) => HazardSignal::fixed(prayer, SPECIAL_PROJECTILE_TICKS),
        };
        self.queue.on_hazard_created(signal.occurrence(id, start_cycle));
    }
}

impl SignalHandler for WardenP2 {
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        match signal {
            GameSignal::GameTick { .. } => {
                self.queue.on_tick();
                if let Some((_, ticks)) = &mut self.core {
                    *ticks += 1;
                }
            }
            GameSignal::ProjectileMoved {
                projectile_id,
                remaining_cycles,
                start_cycle,
                origin,
                targets_other_player,
            } => {
                if !targets_other_player {
                    self.on_projectile(
                        *projectile_id,
                        *remaining_cycles,
                        *start_cycle,
                        origin,
                        ctx.player_location,
                    );
                }
            }
            GameSignal::NpcSpawned { npc }
                if matches!(npc.id, npc_id::WARDEN_CORE | npc_id::WARDEN_CORE_ALT) =>
            {
                self.core = Some((npc.index, 0));
            }
            GameSignal::NpcDespawned { npc } => {
                if self.core.is_some_and(|(index, _)| index == npc.index) {
                    self.core = None;
                } else if self.npc_index == Some(npc.index) {
                    self.queue.reset();
                    self.npc_index = None;
                }
            }
            GameSignal::NpcChanged { npc, .. } if WARDEN_IDS.contains(&npc.id) => {
                self.npc_index = Some(npc.index);
            }
            GameSignal::ChatMessage { message } if is_challenge_boundary(message) => {
                self.queue.reset();
            }
            GameSignal::HpHudUpdate { current, maximum } if *maximum > 1 && *current > 0 => {
                self.damage_dealt = Some(maximum - current);
            }
            _ => {}
        }
    }
}

impl LifecycleComponent for WardenP2 {
    fn name(&self) -> &'static str {
        "warden_p2"
    }

    fn is_enabled(&self, _config: &PluginConfig, state: &SessionState) -> bool {
        state.is_encounter(EncounterId::WardenP2)
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn prayer_advice(&self, config: &PluginConfig) -> Option<PrayerAdvice> {
        if !config.warden_p2_prayer_indicator {
            return None;
        }
        self.queue
            .most_urgent()
            .map(|hazard| PrayerAdvice::from_hazard(&hazard, self.name()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
