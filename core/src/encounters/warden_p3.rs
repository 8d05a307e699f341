use std::any::Any;

use amascut_types::PluginConfig;

use super::zebak::{rock_delay, rock_prayer};
use super::{BossHealth, PathLevelHandle, TickCountdowns, is_challenge_boundary};
use crate::game_data::{EncounterId, animation_id, graphics_id, npc_id};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::prediction::{
    AttackPredictionQueue, HazardSignal, PrayerAdvice, PrayerKind, PredictedHazard,
    TickConversion,
};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, NpcRef, SignalContext, SignalHandler, WorldPoint};

const HP_BREAKPOINTS: &[f64] = &[0.80, 0.60, 0.40, 0.20, 0.05];

const BOULDER_TICKS: u32 = 7;
const RED_LIGHTNING_TICKS: u32 = 4;
const ENERGY_SIPHON_BASE_TICKS: u32 = 7;

const WARDEN_IDS: [u32; 2] = [npc_id::ELIDINIS_WARDEN_P3, npc_id::TUMEKENS_WARDEN_P3];
const WARDEN_CHARGING_IDS: [u32; 2] = [
    npc_id::ELIDINIS_WARDEN_P3_CHARGING,
    npc_id::TUMEKENS_WARDEN_P3_CHARGING,
];

// ─────────────────────────────────────────────────────────────────────────────
// Slam Direction
// ─────────────────────────────────────────────────────────────────────────────

/// Side of the arena the warden's next slam hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlamDirection {
    #[default]
    Right,
    Left,
    Middle,
}

impl SlamDirection {
    fn from_animation(animation: u32) -> Option<Self> {
        if animation_id::WARDEN_SLAM_RIGHT.contains(&animation) {
            Some(Self::Right)
        } else if animation_id::WARDEN_SLAM_LEFT.contains(&animation) {
            Some(Self::Left)
        } else if animation_id::WARDEN_SLAM_MIDDLE.contains(&animation) {
            Some(Self::Middle)
        } else {
            None
        }
    }

    /// Slams cycle right, left, middle
    pub fn next(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Middle,
            Self::Middle => Self::Right,
        }
    }

    /// Side that is safe from a slam in this direction
    pub fn safe_side(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Middle => Self::Middle,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Warden P3
// ─────────────────────────────────────────────────────────────────────────────

pub struct WardenP3 {
    path_levels: PathLevelHandle,
    queue: AttackPredictionQueue,
    health: BossHealth,
    warden: Option<NpcRef>,
    next_slam: SlamDirection,
    /// Set when the warden starts a charge, cleared on the first slam
    draw_safe_tile: bool,
    akkha_prayer: Option<PrayerKind>,
    red_lightning: TickCountdowns<WorldPoint>,
    falling_boulders: TickCountdowns<WorldPoint>,
    energy_siphons: TickCountdowns<u32>,
    /// Completed charge phases; each adds a tick to new siphons
    energy_siphon_set: u32,
}

impl WardenP3 {
    pub fn new(path_levels: PathLevelHandle) -> Self {
        Self {
            path_levels,
            queue: AttackPredictionQueue::new(TickConversion::default()),
            health: BossHealth::new(HP_BREAKPOINTS),
            warden: None,
            next_slam: SlamDirection::default(),
            draw_safe_tile: false,
            akkha_prayer: None,
            red_lightning: TickCountdowns::new(),
            falling_boulders: TickCountdowns::new(),
            energy_siphons: TickCountdowns::new(),
            energy_siphon_set: 0,
        }
    }

    pub fn most_urgent(&self) -> Option<PredictedHazard> {
        self.queue.most_urgent()
    }

    pub fn hazards(&self) -> Vec<PredictedHazard> {
        self.queue.snapshot()
    }

    pub fn next_slam_direction(&self) -> SlamDirection {
        self.next_slam
    }

    /// Safe side to stand on for the upcoming slam, while it should be shown
    pub fn safe_tile(&self) -> Option<SlamDirection> {
        self.draw_safe_tile.then(|| self.next_slam.safe_side())
    }

    pub fn akkha_prayer(&self) -> Option<PrayerKind> {
        self.akkha_prayer
    }

    pub fn is_warden_charging(&self) -> bool {
        self.warden
            .as_ref()
            .is_some_and(|w| WARDEN_CHARGING_IDS.contains(&w.id))
    }

    pub fn red_lightning(&self) -> Vec<(WorldPoint, u32)> {
        self.red_lightning.iter().collect()
    }

    pub fn falling_boulders(&self) -> Vec<(WorldPoint, u32)> {
        self.falling_boulders.iter().collect()
    }

    pub fn energy_siphon_ticks(&self) -> Option<u32> {
        self.energy_siphons.min()
    }

    fn reset(&mut self) {
        self.queue.reset();
        self.health.reset();
        self.warden = None;
        self.next_slam = SlamDirection::default();
        self.draw_safe_tile = false;
        self.akkha_prayer = None;
        self.red_lightning.clear();
        self.falling_boulders.clear();
        self.energy_siphons.clear();
        self.energy_siphon_set = 0;
    }

    fn is_warden(&self, npc: &NpcRef) -> bool {
        self.warden.as_ref().is_some_and(|w| w.index == npc.index)
    }

    fn on_projectile(&mut self, id: u32, remaining_cycles: i32, start_cycle: i32) {
        if remaining_cycles <= 0 {
            return;
        }
        let Some(prayer) = rock_prayer(id) else {
            return;
        };
        let delay = rock_delay(self.path_levels.get().zebak);
        self.queue.on_hazard_created(
            HazardSignal::cycles(prayer, remaining_cycles)
                .delayed(delay)
                .occurrence(id, start_cycle),
        );
    }

    fn on_warden_changed(&mut self, npc: &NpcRef, old_id: u32) {
        let was_charging = WARDEN_CHARGING_IDS.contains(&old_id);
        self.warden = Some(npc.clone());
        if !was_charging && self.is_warden_charging() {
            self.draw_safe_tile = true;
            self.energy_siphon_set += 1;
            tracing::debug!(set = self.energy_siphon_set, "Warden charging");
        }
    }

    fn on_animation(&mut self, npc: &NpcRef, animation: u32) {
        if self.is_warden(npc) {
            if let Some(direction) = SlamDirection::from_animation(animation) {
                self.draw_safe_tile = false;
                self.next_slam = direction.next();
            }
        } else if npc.id == npc_id::AKKHAS_PHANTOM {
            match animation {
                animation_id::AKKHA_STYLE_SWITCH => {
                    self.akkha_prayer = Some(match self.akkha_prayer {
                        Some(PrayerKind::Missiles) => PrayerKind::Magic,
                        _ => PrayerKind::Missiles,
                    });
                }
                animation_id::AKKHA_MAGIC => self.akkha_prayer = Some(PrayerKind::Magic),
                animation_id::AKKHA_MISSILES => self.akkha_prayer = Some(PrayerKind::Missiles),
                _ => {}
            }
        }
    }
}

impl SignalHandler for WardenP3 {
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        self.health.on_signal(signal, ctx.config);
        match signal {
            GameSignal::GameTick { .. } => {
                self.queue.on_tick();
                self.red_lightning.on_tick();
                self.falling_boulders.on_tick();
                self.energy_siphons.on_tick();
            }
            GameSignal::ProjectileMoved {
                projectile_id,
                remaining_cycles,
                start_cycle,
                ..
            } => self.on_projectile(*projectile_id, *remaining_cycles, *start_cycle),
            GameSignal::NpcSpawned { npc } => {
                if WARDEN_IDS.contains(&npc.id) {
                    self.warden = Some(npc.clone());
                    self.draw_safe_tile = true;
                } else if npc.id == npc_id::ENERGY_SIPHON {
                    self.energy_siphons
                        .set(npc.index, ENERGY_SIPHON_BASE_TICKS + self.energy_siphon_set);
                }
            }
            GameSignal::NpcDespawned { npc } => {
                if self.is_warden(npc) {
                    self.warden = None;
                    self.queue.reset();
                } else if npc.id == npc_id::ENERGY_SIPHON_DEAD {
                    self.energy_siphons.remove(&npc.index);
                }
            }
            GameSignal::NpcChanged { npc, old_id } if self.is_warden(npc) => {
                self.on_warden_changed(npc, *old_id);
            }
            GameSignal::AnimationChanged { npc, animation_id } => {
                self.on_animation(npc, *animation_id);
            }
            GameSignal::GraphicsObjectCreated { id, location } => match *id {
                graphics_id::FALLING_BOULDER | graphics_id::FALLING_BOULDER_ALT => {
                    self.falling_boulders.set(*location, BOULDER_TICKS);
                }
                graphics_id::RED_LIGHTNING => {
                    self.red_lightning.set(*location, RED_LIGHTNING_TICKS);
                }
                _ => {}
            },
            GameSignal::ChatMessage { message } if is_challenge_boundary(message) => {
                self.queue.reset();
            }
            _ => {}
        }
    }
}

impl LifecycleComponent for WardenP3 {
    fn name(&self) -> &'static str {
        "warden_p3"
    }

    fn is_enabled(&self, _config: &PluginConfig, state: &SessionState) -> bool {
        state.is_encounter(EncounterId::WardenP3)
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    /// Incoming Zebak rocks take precedence over the Akkha phantom's style.
    fn prayer_advice(&self, config: &PluginConfig) -> Option<PrayerAdvice> {
        if !config.warden_p3_prayer_indicator {
            return None;
        }
        if let Some(hazard) = self.queue.most_urgent() {
            return Some(PrayerAdvice::from_hazard(&hazard, self.name()));
        }
        self.akkha_prayer.map(|prayer| PrayerAdvice {
            prayer,
            ticks: None,
            source: self.name(),
        })
    }

    fn hp_until_next_breakpoint(&self) -> Option<i32> {
        self.health.hp_until_next_breakpoint()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
