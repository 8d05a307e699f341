use amascut_types::PluginConfig;

use crate::signal_processor::GameSignal;

/// Tracks HP remaining until the boss's next phase breakpoint.
///
/// Breakpoints are fixed from the first valid HUD update of the encounter.
#[derive(Debug, Clone)]
pub struct BossHealth {
    percents: &'static [f64],
    breakpoints: Option<Vec<i32>>,
    until_next: Option<i32>,
}

impl BossHealth {
    /// `percents` must be in descending order
    pub const fn new(percents: &'static [f64]) -> Self {
        Self {
            percents,
            breakpoints: None,
            until_next: None,
        }
    }

    /// Follow HUD updates while health counters are enabled. Turning the
    /// option off drops the tracked breakpoints.
    pub fn on_signal(&mut self, signal: &GameSignal, config: &PluginConfig) {
        match signal {
            GameSignal::HpHudUpdate { current, maximum } if config.health_counters => {
                self.on_hud_update(*current, *maximum);
            }
            GameSignal::HpHudUpdate { .. } | GameSignal::ConfigChanged { .. }
                if !config.health_counters =>
            {
                self.reset();
            }
            _ => {}
        }
    }

    pub fn on_hud_update(&mut self, current: i32, maximum: i32) {
        if self.breakpoints.is_none() {
            if maximum <= 1 {
                return;
            }
            self.breakpoints = Some(
                self.percents
                    .iter()
                    .map(|pct| (pct * f64::from(maximum)) as i32)
                    .collect(),
            );
        }

        if current <= 0 {
            return;
        }

        let Some(breakpoints) = &self.breakpoints else {
            return;
        };
        let remaining = breakpoints
            .iter()
            .find(|&&bp| current > bp)
            .map_or(current, |bp| current - bp);
        self.until_next = Some(remaining);
    }

    /// HP to deal before the next breakpoint (or until death past the last one)
    pub fn hp_until_next_breakpoint(&self) -> Option<i32> {
        self.until_next
    }

    pub fn reset(&mut self) {
        self.breakpoints = None;
        self.until_next = None;
    }
}
