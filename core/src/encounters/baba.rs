use std::any::Any;

use amascut_types::PluginConfig;
use hashbrown::HashSet;

use super::{BossHealth, TickCountdowns};
use crate::game_data::{CYCLES_PER_TICK, EncounterId, graphics_id, npc_id, npc_name, projectile_id};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, SignalContext, SignalHandler, WorldPoint};

const HP_BREAKPOINTS: &[f64] = &[0.66, 0.33];

/// A falling boulder lands this many ticks after its shadow appears
const FALLING_BOULDER_TICKS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shockwave {
    pub location: WorldPoint,
    pub large: bool,
}

pub struct BaBa {
    npc_index: Option<u32>,
    baboons: HashSet<u32>,
    falling_boulders: TickCountdowns<WorldPoint>,
    /// Sarcophagus projectiles in flight, keyed by launch cycle
    sarcophagus: TickCountdowns<i32>,
    shockwave: Option<Shockwave>,
    health: BossHealth,
}

impl Default for BaBa {
    fn default() -> Self {
        Self::new()
    }
}

impl BaBa {
    pub fn new() -> Self {
        Self {
            npc_index: None,
            baboons: HashSet::new(),
            falling_boulders: TickCountdowns::new(),
            sarcophagus: TickCountdowns::new(),
            shockwave: None,
            health: BossHealth::new(HP_BREAKPOINTS),
        }
    }

    /// Ticks until each falling boulder lands
    pub fn falling_boulders(&self) -> &TickCountdowns<WorldPoint> {
        &self.falling_boulders
    }

    pub fn shockwave(&self) -> Option<Shockwave> {
        self.shockwave
    }

    pub fn baboon_count(&self) -> usize {
        self.baboons.len()
    }

    pub fn sarcophagus_projectiles(&self) -> usize {
        self.sarcophagus.len()
    }

    pub fn is_spawned(&self) -> bool {
        self.npc_index.is_some()
    }

    fn reset(&mut self) {
        self.npc_index = None;
        self.baboons.clear();
        self.falling_boulders.clear();
        self.sarcophagus.clear();
        self.shockwave = None;
        self.health.reset();
    }

    fn on_graphics(&mut self, id: u32, location: WorldPoint) {
        match id {
            graphics_id::FALLING_BOULDER | graphics_id::FALLING_BOULDER_ALT => {
                self.falling_boulders.set(location, FALLING_BOULDER_TICKS);
            }
            graphics_id::BABA_SHOCKWAVE_LARGE => {
                self.shockwave = Some(Shockwave { location, large: true });
            }
            graphics_id::BABA_SHOCKWAVE_SMALL if self.shockwave.is_none() => {
                self.shockwave = Some(Shockwave { location, large: false });
            }
            _ => {}
        }
    }

    fn on_sarcophagus(&mut self, remaining_cycles: i32, start_cycle: i32) {
        let Ok(remaining) = u32::try_from(remaining_cycles) else {
            return;
        };
        self.sarcophagus
            .set(start_cycle, remaining.div_ceil(CYCLES_PER_TICK));
    }
}

impl SignalHandler for BaBa {
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        self.health.on_signal(signal, ctx.config);
        match signal {
            GameSignal::GameTick { .. } => {
                self.falling_boulders.on_tick();
                self.sarcophagus.on_tick();
            }
            GameSignal::NpcSpawned { npc } if npc.name == npc_name::BABA => {
                self.npc_index = Some(npc.index);
            }
            GameSignal::NpcSpawned { npc } if npc.id == npc_id::BABOON => {
                self.baboons.insert(npc.index);
            }
            GameSignal::NpcDespawned { npc } if Some(npc.index) == self.npc_index => {
                self.npc_index = None;
            }
            GameSignal::NpcDespawned { npc } | GameSignal::ActorDeath { npc }
                if npc.id == npc_id::BABOON =>
            {
                self.baboons.remove(&npc.index);
            }
            GameSignal::ProjectileMoved {
                projectile_id,
                remaining_cycles,
                start_cycle,
                ..
            } if *projectile_id == projectile_id::BABA_SARCOPHAGUS => {
                self.on_sarcophagus(*remaining_cycles, *start_cycle);
            }
            GameSignal::GraphicsObjectCreated { id, location } => self.on_graphics(*id, *location),
            GameSignal::GraphicsObjectFinished { location, .. }
                if self.shockwave.is_some_and(|s| s.location == *location) =>
            {
                self.shockwave = None;
            }
            _ => {}
        }
    }
}

impl LifecycleComponent for BaBa {
    fn name(&self) -> &'static str {
        "baba"
    }

    fn is_enabled(&self, _config: &PluginConfig, state: &SessionState) -> bool {
        state.is_encounter(EncounterId::BaBa)
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        self.reset();
        Ok(())
    }

    fn hp_until_next_breakpoint(&self) -> Option<i32> {
        self.health.hp_until_next_breakpoint()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounters::test_support::{ctx_for, game_tick, npc, projectile};

    fn graphics(id: u32, x: i32) -> GameSignal {
        GameSignal::GraphicsObjectCreated {
            id,
            location: WorldPoint::new(x, 0, 0),
        }
    }

    #[test]
    fn falling_boulders_count_down_seven_ticks() {
        let mut baba = BaBa::new();
        let (state, config) = ctx_for(EncounterId::BaBa);
        let ctx = state.ctx(&config);

        baba.handle_signal(&graphics(graphics_id::FALLING_BOULDER, 1), &ctx);
        baba.handle_signal(&game_tick(), &ctx);
        baba.handle_signal(&graphics(graphics_id::FALLING_BOULDER_ALT, 2), &ctx);

        assert_eq!(baba.falling_boulders().get(&WorldPoint::new(1, 0, 0)), Some(6));
        assert_eq!(baba.falling_boulders().min(), Some(6));
        assert_eq!(baba.falling_boulders().len(), 2);

        for _ in 0..6 {
            baba.handle_signal(&game_tick(), &ctx);
        }
        assert_eq!(baba.falling_boulders().len(), 1);
        baba.handle_signal(&game_tick(), &ctx);
        assert!(baba.falling_boulders().is_empty());
    }

    #[test]
    fn large_shockwave_replaces_small() {
        let mut baba = BaBa::new();
        let (state, config) = ctx_for(EncounterId::BaBa);
        let ctx = state.ctx(&config);

        baba.handle_signal(&graphics(graphics_id::BABA_SHOCKWAVE_SMALL, 1), &ctx);
        baba.handle_signal(&graphics(graphics_id::BABA_SHOCKWAVE_SMALL, 2), &ctx);
        assert_eq!(baba.shockwave().map(|s| s.location.x), Some(1));

        baba.handle_signal(&graphics(graphics_id::BABA_SHOCKWAVE_LARGE, 3), &ctx);
        let shockwave = baba.shockwave().unwrap();
        assert!(shockwave.large);
        assert_eq!(shockwave.location.x, 3);

        baba.handle_signal(
            &GameSignal::GraphicsObjectFinished {
                id: graphics_id::BABA_SHOCKWAVE_LARGE,
                location: WorldPoint::new(3, 0, 0),
            },
            &ctx,
        );
        assert_eq!(baba.shockwave(), None);
    }

    #[test]
    fn baboons_leave_on_death_or_despawn() {
        let mut baba = BaBa::new();
        let (state, config) = ctx_for(EncounterId::BaBa);
        let ctx = state.ctx(&config);
        let first = npc(20, npc_id::BABOON, "Baboon");
        let second = npc(21, npc_id::BABOON, "Baboon");

        baba.handle_signal(&GameSignal::NpcSpawned { npc: first.clone() }, &ctx);
        baba.handle_signal(&GameSignal::NpcSpawned { npc: second.clone() }, &ctx);
        assert_eq!(baba.baboon_count(), 2);

        baba.handle_signal(&GameSignal::ActorDeath { npc: first }, &ctx);
        assert_eq!(baba.baboon_count(), 1);
        baba.handle_signal(&GameSignal::NpcDespawned { npc: second }, &ctx);
        assert_eq!(baba.baboon_count(), 0);
    }

    #[test]
    fn sarcophagus_projectiles_expire_on_landing() {
        let mut baba = BaBa::new();
        let (state, config) = ctx_for(EncounterId::BaBa);
        let ctx = state.ctx(&config);

        // 45 cycles rounds up to 2 ticks
        baba.handle_signal(&projectile(projectile_id::BABA_SARCOPHAGUS, 45, 10), &ctx);
        baba.handle_signal(&projectile(projectile_id::BABA_SARCOPHAGUS, 40, 10), &ctx);
        baba.handle_signal(&projectile(projectile_id::BABA_SARCOPHAGUS, -5, 50), &ctx);
        assert_eq!(baba.sarcophagus_projectiles(), 1);

        baba.handle_signal(&game_tick(), &ctx);
        baba.handle_signal(&game_tick(), &ctx);
        assert_eq!(baba.sarcophagus_projectiles(), 0);
    }

    #[test]
    fn health_breakpoints_at_thirds() {
        let mut baba = BaBa::new();
        let (state, config) = ctx_for(EncounterId::BaBa);
        let ctx = state.ctx(&config);

        baba.handle_signal(&GameSignal::HpHudUpdate { current: 1000, maximum: 1000 }, &ctx);
        assert_eq!(baba.hp_until_next_breakpoint(), Some(340));
        baba.handle_signal(&GameSignal::HpHudUpdate { current: 500, maximum: 1000 }, &ctx);
        assert_eq!(baba.hp_until_next_breakpoint(), Some(170));
    }

    #[test]
    fn stop_clears_tracking() {
        let mut baba = BaBa::new();
        let (state, config) = ctx_for(EncounterId::BaBa);
        let ctx = state.ctx(&config);

        baba.handle_signal(&GameSignal::NpcSpawned { npc: npc(4, npc_id::BABA, "Ba-Ba") }, &ctx);
        baba.handle_signal(&graphics(graphics_id::FALLING_BOULDER, 1), &ctx);
        assert!(baba.is_spawned());

        baba.stop().unwrap();
        assert!(!baba.is_spawned());
        assert!(baba.falling_boulders().is_empty());
    }
}
