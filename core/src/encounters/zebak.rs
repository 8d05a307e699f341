use std::any::Any;

use amascut_types::PluginConfig;
use hashbrown::HashSet;

use super::{BossHealth, PathLevelHandle, is_challenge_boundary};
use crate::game_data::{EncounterId, graphics_id, npc_name, projectile_id};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::prediction::{
    AttackPredictionQueue, HazardSignal, PrayerAdvice, PrayerKind, PredictedHazard,
    TickConversion,
};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, SignalContext, SignalHandler, WorldPoint};

const HP_BREAKPOINTS: &[f64] = &[0.85, 0.70, 0.55, 0.40];

/// Blood magic lands this many ticks after the first cloud of a volley appears
const BLOOD_MAGIC_TICKS: u32 = 4;

/// Prayer for one of Zebak's rock projectiles
pub(crate) fn rock_prayer(projectile: u32) -> Option<PrayerKind> {
    match projectile {
        projectile_id::ZEBAK_MAGIC_ROCK | projectile_id::ZEBAK_MAGIC_ROCK_ENRAGED => {
            Some(PrayerKind::Magic)
        }
        projectile_id::ZEBAK_RANGE_ROCK | projectile_id::ZEBAK_RANGE_ROCK_ENRAGED => {
            Some(PrayerKind::Missiles)
        }
        _ => None,
    }
}

/// Ticks between a rock landing and its damage. Shorter on higher Crondis levels.
pub(crate) fn rock_delay(zebak_path_level: u8) -> u32 {
    if zebak_path_level >= 4 { 2 } else { 3 }
}

pub struct Zebak {
    path_levels: PathLevelHandle,
    queue: AttackPredictionQueue,
    health: BossHealth,
    npc_index: Option<u32>,
    /// Blood clouds still on screen. A volley is every cloud alive at once.
    blood_clouds: HashSet<WorldPoint>,
}

impl Zebak {
    pub fn new(path_levels: PathLevelHandle) -> Self {
        Self {
            path_levels,
            queue: AttackPredictionQueue::new(TickConversion::default()),
            health: BossHealth::new(HP_BREAKPOINTS),
            npc_index: None,
            blood_clouds: HashSet::new(),
        }
    }

    pub fn most_urgent(&self) -> Option<PredictedHazard> {
        self.queue.most_urgent()
    }

    pub fn hazards(&self) -> Vec<PredictedHazard> {
        self.queue.snapshot()
    }

    fn reset(&mut self) {
        self.queue.reset();
        self.health.reset();
        self.npc_index = None;
        self.blood_clouds.clear();
    }

    fn on_projectile(&mut self, id: u32, remaining_cycles: i32, start_cycle: i32) {
        if remaining_cycles <= 0 {
            return;
        }
        let Some(prayer) = rock_prayer(id) else {
            return;
        };

        let delay = rock_delay(self.path_levels.get().zebak);
        let signal = HazardSignal::cycles(prayer, remaining_cycles)
            .delayed(delay)
            .occurrence(id, start_cycle);
        if self.queue.on_hazard_created(signal) {
            tracing::trace!(?prayer, remaining_cycles, delay, "Zebak rock queued");
        }
    }

    fn on_blood_cloud(&mut self, location: WorldPoint) {
        let new_volley = self.blood_clouds.is_empty();
        self.blood_clouds.insert(location);
        if new_volley {
            self.queue
                .push(PredictedHazard::new(PrayerKind::Magic, BLOOD_MAGIC_TICKS).with_priority(1));
        }
    }
}

impl SignalHandler for Zebak {
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        self.health.on_signal(signal, ctx.config);
        match signal {
            GameSignal::GameTick { .. } => {
                self.queue.on_tick();
            }
            GameSignal::NpcSpawned { npc } if npc.name == npc_name::ZEBAK => {
                self.npc_index = Some(npc.index);
            }
            GameSignal::NpcDespawned { npc } if Some(npc.index) == self.npc_index => {
                tracing::debug!("Zebak despawned, resetting");
                self.reset();
            }
            GameSignal::ProjectileMoved {
                projectile_id,
                remaining_cycles,
                start_cycle,
                ..
            } => self.on_projectile(*projectile_id, *remaining_cycles, *start_cycle),
            GameSignal::GraphicsObjectCreated { id, location } if *id == graphics_id::ZEBAK_BLOOD_MAGIC => {
                self.on_blood_cloud(*location);
            }
            GameSignal::GraphicsObjectFinished { id, location } if *id == graphics_id::ZEBAK_BLOOD_MAGIC => {
                self.blood_clouds.remove(location);
            }
            GameSignal::ChatMessage { message } if is_challenge_boundary(message) => {
                self.queue.reset();
                self.blood_clouds.clear();
            }
            _ => {}
        }
    }
}

impl LifecycleComponent for Zebak {
    fn name(&self) -> &'static str {
        "zebak"
    }

    fn is_enabled(&self, _config: &PluginConfig, state: &SessionState) -> bool {
        state.is_encounter(EncounterId::Zebak)
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
        if !config.zebak_prayer_indicator {
            return None;
        }
        self.queue
            .most_urgent()
            .map(|hazard| PrayerAdvice::from_hazard(&hazard, self.name()))
    }

    fn hp_until_next_breakpoint(&self) -> Option<i32> {
        self.health.hp_until_next_breakpoint()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
