use serde::Serialize;

use crate::game_data::{EncounterId, REGION_LOBBY};
use crate::signal_processor::TickInput;

/// Ticks the session survives after the last raw "in session" sample.
pub const GRACE_TICKS: u8 = 3;

/// Where the player is, as far as the raid is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionState {
    pub in_lobby: bool,
    pub in_session: bool,
    pub encounter: Option<EncounterId>,
}

impl SessionState {
    pub fn is_encounter(&self, encounter: EncounterId) -> bool {
        self.encounter == Some(encounter)
    }
}

/// Debounced session tracker.
///
/// A session flag that drops for fewer than [`GRACE_TICKS`] consecutive ticks
/// never shows up as a transition.
#[derive(Debug, Default)]
pub struct PhaseDetector {
    state: SessionState,
    grace_ticks: u8,
}

impl PhaseDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Feed one tick's sample. Returns `(old, new)` if the state changed.
    pub fn update(&mut self, input: &TickInput) -> Option<(SessionState, SessionState)> {
        let encounter = input.region.and_then(EncounterId::from_region);
        let session_raw = encounter.is_some() || input.status_widget_visible;

        self.grace_ticks = if session_raw {
            GRACE_TICKS
        } else {
            self.grace_ticks.saturating_sub(1)
        };

        let next = SessionState {
            in_lobby: input.region == Some(REGION_LOBBY),
            in_session: self.grace_ticks > 0,
            encounter,
        };

        if next == self.state {
            return None;
        }

        let old = std::mem::replace(&mut self.state, next);
        tracing::info!(
            in_lobby = next.in_lobby,
            in_session = next.in_session,
            encounter = ?next.encounter.map(|e| e.name()),
            "Raid state changed"
        );
        Some((old, next))
    }
}
