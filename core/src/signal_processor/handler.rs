use amascut_types::PluginConfig;

use super::signal::{GameSignal, WorldPoint};
use crate::raid_state::SessionState;

/// Read-only view of the runtime handed to components with every signal.
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub state: &'a SessionState,
    pub config: &'a PluginConfig,
    pub player_location: Option<WorldPoint>,
    pub tick: u64,
}

/// Trait for systems that react to game signals.
/// Implemented by every lifecycle component; only started components receive signals.
pub trait SignalHandler {
    /// Handle a single signal
    fn handle_signal(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>);
}
