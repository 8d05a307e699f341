//! Shared fixtures for encounter module tests

use amascut_types::PluginConfig;

use crate::game_data::EncounterId;
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, NpcRef, SignalContext, WorldPoint};

pub(crate) struct TestState {
    pub state: SessionState,
    pub player_location: Option<WorldPoint>,
    pub tick: u64,
}

impl TestState {
    pub fn ctx<'a>(&'a self, config: &'a PluginConfig) -> SignalContext<'a> {
        SignalContext {
            state: &self.state,
            config,
            player_location: self.player_location,
            tick: self.tick,
        }
    }
}

/// Session inside `encounter` with default config
pub(crate) fn ctx_for(encounter: EncounterId) -> (TestState, PluginConfig) {
    let state = TestState {
        state: SessionState {
            in_lobby: false,
            in_session: true,
            encounter: Some(encounter),
        },
        player_location: None,
        tick: 0,
    };
    (state, PluginConfig::default())
}

pub(crate) fn npc(index: u32, id: u32, name: &str) -> NpcRef {
    NpcRef {
        index,
        id,
        name: name.to_string(),
    }
}

pub(crate) fn game_tick() -> GameSignal {
    GameSignal::GameTick { tick: 0 }
}

pub(crate) fn projectile(id: u32, remaining_cycles: i32, start_cycle: i32) -> GameSignal {
    GameSignal::ProjectileMoved {
        projectile_id: id,
        remaining_cycles,
        start_cycle,
        origin: WorldPoint::default(),
        targets_other_player: false,
    }
}

pub(crate) fn chat(message: &str) -> GameSignal {
    GameSignal::ChatMessage {
        message: message.to_string(),
    }
}
