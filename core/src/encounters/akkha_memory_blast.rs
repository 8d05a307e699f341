use std::any::Any;
use std::collections::VecDeque;

use amascut_types::PluginConfig;
use hashbrown::HashMap;

use super::standardize;
use crate::game_data::{EncounterId, animation_id, graphics_id, object_id};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, SignalContext, SignalHandler, WorldPoint};

const MESSAGE_GLOW: &str = "sections of the room start to glow...";
const MESSAGE_START: &str = "challenge started: akkha.";
const MESSAGE_FAILED: &str = "your party failed";

/// Tile offset from a glowing symbol to the quadrant it marks
fn symbol_offset(object: u32) -> Option<(i32, i32)> {
    match object {
        object_id::AKKHA_FIRE_SYMBOL => Some((1, -1)),
        object_id::AKKHA_LIGHTNING_SYMBOL => Some((-1, 1)),
        object_id::AKKHA_STAR_SYMBOL => Some((1, 1)),
        object_id::AKKHA_DEATH_SYMBOL => Some((-1, -1)),
        _ => None,
    }
}

/// Remembers the order Akkha's symbols glow in, so the quadrants can be
/// shown in the order they will detonate.
pub struct AkkhaMemoryBlast {
    symbol_points: HashMap<u32, WorldPoint>,
    sequence: VecDeque<WorldPoint>,
    last_detonation: Option<u64>,
}

impl Default for AkkhaMemoryBlast {
    fn default() -> Self {
        Self::new()
    }
}

impl AkkhaMemoryBlast {
    pub fn new() -> Self {
        Self {
            symbol_points: HashMap::new(),
            sequence: VecDeque::new(),
            last_detonation: None,
        }
    }

    /// Quadrants still to detonate, next first
    pub fn sequence(&self) -> impl Iterator<Item = &WorldPoint> {
        self.sequence.iter()
    }

    pub fn next_detonation(&self) -> Option<WorldPoint> {
        self.sequence.front().copied()
    }

    fn reset(&mut self) {
        self.symbol_points.clear();
        self.sequence.clear();
    }

    fn on_symbol(&mut self, object: u32, location: WorldPoint) {
        let Some((dx, dy)) = symbol_offset(object) else {
            return;
        };
        let point = *self
            .symbol_points
            .entry(object)
            .or_insert_with(|| WorldPoint::new(location.x + dx, location.y + dy, location.plane));
        self.sequence.push_back(point);
    }

    /// Several element graphics play per detonation; only the first on a tick counts.
    fn on_detonation(&mut self, tick: u64) {
        if self.sequence.is_empty() || self.last_detonation == Some(tick) {
            return;
        }
        self.last_detonation = Some(tick);
        self.sequence.pop_front();
    }
}

impl SignalHandler for AkkhaMemoryBlast {
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        match signal {
            GameSignal::GameObjectSpawned {
                id,
                location,
                animation_id: Some(animation_id::AKKHA_SYMBOL_GLOW),
            } => self.on_symbol(*id, *location),
            GameSignal::GraphicsObjectCreated { id, .. }
                if graphics_id::AKKHA_MEMORY_ELEMENTS.contains(id) =>
            {
                self.on_detonation(ctx.tick);
            }
            GameSignal::ChatMessage { message } => {
                let message = standardize(message);
                if message == MESSAGE_GLOW
                    || message == MESSAGE_START
                    || message.ends_with(MESSAGE_FAILED)
                {
                    self.reset();
                }
            }
            _ => {}
        }
    }
}

impl LifecycleComponent for AkkhaMemoryBlast {
    fn name(&self) -> &'static str {
        "akkha_memory_blast"
    }

    fn is_enabled(&self, _config: &PluginConfig, state: &SessionState) -> bool {
        state.is_encounter(EncounterId::Akkha)
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["akkha"]
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounters::test_support::{chat, ctx_for};

    fn glow(object: u32) -> GameSignal {
        GameSignal::GameObjectSpawned {
            id: object,
            location: WorldPoint::new(10, 10, 0),
            animation_id: Some(animation_id::AKKHA_SYMBOL_GLOW),
        }
    }

    fn detonation() -> GameSignal {
        GameSignal::GraphicsObjectCreated {
            id: graphics_id::AKKHA_MEMORY_ELEMENTS[0],
            location: WorldPoint::default(),
        }
    }

    #[test]
    fn records_glow_order_at_quadrant_offsets() {
        let mut blast = AkkhaMemoryBlast::new();
        let (state, config) = ctx_for(EncounterId::Akkha);
        let ctx = state.ctx(&config);

        blast.handle_signal(&glow(object_id::AKKHA_FIRE_SYMBOL), &ctx);
        blast.handle_signal(&glow(object_id::AKKHA_DEATH_SYMBOL), &ctx);
        blast.handle_signal(&glow(object_id::AKKHA_FIRE_SYMBOL), &ctx);

        let sequence: Vec<_> = blast.sequence().copied().collect();
        assert_eq!(
            sequence,
            vec![
                WorldPoint::new(11, 9, 0),
                WorldPoint::new(9, 9, 0),
                WorldPoint::new(11, 9, 0),
            ]
        );
    }

    #[test]
    fn ignores_objects_without_glow() {
        let mut blast = AkkhaMemoryBlast::new();
        let (state, config) = ctx_for(EncounterId::Akkha);
        let ctx = state.ctx(&config);

        blast.handle_signal(
            &GameSignal::GameObjectSpawned {
                id: object_id::AKKHA_STAR_SYMBOL,
                location: WorldPoint::new(10, 10, 0),
                animation_id: None,
            },
            &ctx,
        );
        blast.handle_signal(&glow(45000), &ctx);
        assert_eq!(blast.next_detonation(), None);
    }

    #[test]
    fn one_detonation_per_tick() {
        let mut blast = AkkhaMemoryBlast::new();
        let (mut state, config) = ctx_for(EncounterId::Akkha);

        blast.handle_signal(&glow(object_id::AKKHA_STAR_SYMBOL), &state.ctx(&config));
        blast.handle_signal(&glow(object_id::AKKHA_LIGHTNING_SYMBOL), &state.ctx(&config));

        state.tick = 5;
        blast.handle_signal(&detonation(), &state.ctx(&config));
        blast.handle_signal(&detonation(), &state.ctx(&config));
        assert_eq!(blast.next_detonation(), Some(WorldPoint::new(9, 11, 0)));

        state.tick = 6;
        blast.handle_signal(&detonation(), &state.ctx(&config));
        assert_eq!(blast.next_detonation(), None);
    }

    #[test]
    fn new_glow_round_resets() {
        let mut blast = AkkhaMemoryBlast::new();
        let (state, config) = ctx_for(EncounterId::Akkha);
        let ctx = state.ctx(&config);

        blast.handle_signal(&glow(object_id::AKKHA_STAR_SYMBOL), &ctx);
        blast.handle_signal(&chat("Sections of the room start to glow..."), &ctx);
        assert_eq!(blast.next_detonation(), None);

        blast.handle_signal(&glow(object_id::AKKHA_STAR_SYMBOL), &ctx);
        blast.handle_signal(&chat("<col=ef1020>Your party failed</col>"), &ctx);
        assert_eq!(blast.next_detonation(), None);
    }
}
