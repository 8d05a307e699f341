use std::any::Any;

use amascut_types::PluginConfig;
use hashbrown::HashSet;

use super::standardize;
use crate::game_data::{EncounterId, npc_id};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, SignalContext, SignalHandler};

/// Unstable orbs released during Akkha's enrage phase.
pub struct AkkhaFinalStand {
    unstable_orbs: HashSet<u32>,
}

impl Default for AkkhaFinalStand {
    fn default() -> Self {
        Self::new()
    }
}

impl AkkhaFinalStand {
    pub fn new() -> Self {
        Self {
            unstable_orbs: HashSet::new(),
        }
    }

    pub fn unstable_orbs(&self) -> usize {
        self.unstable_orbs.len()
    }
}

impl SignalHandler for AkkhaFinalStand {
    fn handle_signal(&mut self, signal: &GameSignal, _ctx: &SignalContext<'_>) {
        match signal {
            GameSignal::NpcSpawned { npc } if npc.id == npc_id::UNSTABLE_ORB => {
                self.unstable_orbs.insert(npc.index);
            }
            GameSignal::NpcDespawned { npc } if npc.id == npc_id::UNSTABLE_ORB => {
                self.unstable_orbs.remove(&npc.index);
            }
            GameSignal::ChatMessage { message } => {
                let message = standardize(message);
                if message.starts_with("challenge") || message.starts_with("your party failed") {
                    self.unstable_orbs.clear();
                }
            }
            _ => {}
        }
    }
}

impl LifecycleComponent for AkkhaFinalStand {
    fn name(&self) -> &'static str {
        "akkha_final_stand"
    }

    fn is_enabled(&self, _config: &PluginConfig, state: &SessionState) -> bool {
        state.is_encounter(EncounterId::Akkha)
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["akkha"]
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        self.unstable_orbs.clear();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        self.unstable_orbs.clear();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
