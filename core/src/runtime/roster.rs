use hashbrown::HashMap;

use crate::lifecycle::{LifecycleComponent, SignalReplay};
use crate::signal_processor::{GameSignal, NpcRef, SignalContext};

/// NPCs currently spawned in the scene, keyed by scene index.
///
/// Doubles as the replay source for freshly started components, which
/// receive a synthetic `NpcSpawned` for every NPC already present.
#[derive(Debug, Default)]
pub struct NpcRoster {
    npcs: HashMap<u32, NpcRef>,
}

impl NpcRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, signal: &GameSignal) {
        match signal {
            GameSignal::NpcSpawned { npc } | GameSignal::NpcChanged { npc, .. } => {
                self.npcs.insert(npc.index, npc.clone());
            }
            GameSignal::NpcDespawned { npc } => {
                self.npcs.remove(&npc.index);
            }
            _ => {}
        }
    }

    pub fn get(&self, index: u32) -> Option<&NpcRef> {
        self.npcs.get(&index)
    }

    /// Spawned NPCs ordered by scene index
    pub fn npcs(&self) -> Vec<&NpcRef> {
        let mut npcs: Vec<_> = self.npcs.values().collect();
        npcs.sort_unstable_by_key(|npc| npc.index);
        npcs
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn clear(&mut self) {
        self.npcs.clear();
    }
}

impl SignalReplay for NpcRoster {
    fn replay(&self, component: &mut dyn LifecycleComponent, ctx: &SignalContext<'_>) {
        for npc in self.npcs() {
            component.handle_signal(&GameSignal::NpcSpawned { npc: npc.clone() }, ctx);
        }
    }
}
