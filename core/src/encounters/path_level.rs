//! Nexus path level tracking
//!
//! Path levels are only readable from the Nexus widget but matter later in
//! the raid (Zebak's rock timing depends on the Crondis level), so they are
//! published through a [`PathLevelHandle`] that outlives the tracker's
//! active window.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use amascut_types::PluginConfig;

use crate::game_data::{EncounterId, widget};
use crate::lifecycle::{ComponentError, LifecycleComponent};
use crate::raid_state::SessionState;
use crate::signal_processor::{GameSignal, SignalContext, SignalHandler};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathLevels {
    pub kephri: u8,
    pub akkha: u8,
    pub baba: u8,
    pub zebak: u8,
}

/// Shared read access to the most recently seen path levels.
#[derive(Debug, Clone, Default)]
pub struct PathLevelHandle(Rc<Cell<PathLevels>>);

impl PathLevelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> PathLevels {
        self.0.get()
    }

    fn set(&self, levels: PathLevels) {
        self.0.set(levels);
    }
}

pub struct PathLevelTracker {
    levels: PathLevelHandle,
}

impl PathLevelTracker {
    pub fn new(levels: PathLevelHandle) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> PathLevels {
        self.levels.get()
    }

    fn on_raid_widget(&self, texts: &[(u32, String)]) {
        let mut levels = self.levels.get();

        for (child, text) in texts {
            let slot = match *child {
                widget::CHILD_KEPHRI_LEVEL => &mut levels.kephri,
                widget::CHILD_AKKHA_LEVEL => &mut levels.akkha,
                widget::CHILD_BABA_LEVEL => &mut levels.baba,
                widget::CHILD_ZEBAK_LEVEL => &mut levels.zebak,
                _ => continue,
            };
            match text.trim().parse::<u8>() {
                Ok(level) => *slot = level,
                Err(_) => tracing::warn!(child, text = %text, "Unreadable path level"),
            }
        }

        if levels != self.levels.get() {
            tracing::debug!(?levels, "Path levels updated");
            self.levels.set(levels);
        }
    }
}

impl SignalHandler for PathLevelTracker {
    fn handle_signal(&mut self, signal: &GameSignal, _ctx: &SignalContext<'_>) {
        if let GameSignal::WidgetLoaded { group_id, texts } = signal
            && *group_id == widget::RAID_GROUP
        {
            self.on_raid_widget(texts);
        }
    }
}

impl LifecycleComponent for PathLevelTracker {
    fn name(&self) -> &'static str {
        "path_level_tracker"
    }

    fn is_enabled(&self, config: &PluginConfig, state: &SessionState) -> bool {
        config.path_level_tracking && state.is_encounter(EncounterId::Nexus)
    }

    fn start(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
