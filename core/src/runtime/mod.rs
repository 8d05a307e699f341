//! Runtime wiring
//!
//! [`PluginRuntime`] owns the phase detector, the lifecycle scheduler and the
//! registered components, and enforces the per-tick ordering: signals for a
//! tick are dispatched as they arrive, then `on_tick` runs the detector,
//! revalidates on transitions and delivers the decay tick.

mod roster;

#[cfg(test)]
mod runtime_tests;

pub use roster::NpcRoster;

use amascut_types::{CONFIG_GROUP, PluginConfig};
use chrono::NaiveDateTime;

use crate::encounters::default_components;
use crate::lifecycle::{LifecycleComponent, LifecycleScheduler, RevalidateReport};
use crate::prediction::PrayerAdvice;
use crate::raid_state::{PhaseDetector, SessionState};
use crate::signal_processor::{GameSignal, SignalContext, TickInput, WorldPoint};

pub struct PluginRuntime {
    config: PluginConfig,
    detector: PhaseDetector,
    scheduler: LifecycleScheduler,
    roster: NpcRoster,
    player_location: Option<WorldPoint>,
    /// Host wall clock of the last settled tick
    timestamp: Option<NaiveDateTime>,
    tick: u64,
    running: bool,
}

impl PluginRuntime {
    pub fn new(config: PluginConfig, components: Vec<Box<dyn LifecycleComponent>>) -> Self {
        Self {
            config,
            detector: PhaseDetector::new(),
            scheduler: LifecycleScheduler::new(components),
            roster: NpcRoster::new(),
            player_location: None,
            timestamp: None,
            tick: 0,
            running: false,
        }
    }

    /// Runtime with every encounter module registered
    pub fn with_default_components(config: PluginConfig) -> Self {
        Self::new(config, default_components())
    }

    /// Initial revalidation. Components whose predicate already holds start now.
    pub fn start(&mut self) -> RevalidateReport {
        self.running = true;
        tracing::info!(components = self.scheduler.len(), "Runtime started");
        self.revalidate()
    }

    /// Dispatch one host signal to the started components.
    pub fn handle_signal(&mut self, signal: &GameSignal) {
        self.roster.apply(signal);

        if let GameSignal::ConfigChanged { group, key } = signal {
            if group != CONFIG_GROUP {
                return;
            }
            tracing::debug!(key = %key, "Config changed");
            self.revalidate();
        }
        self.dispatch(signal);
    }

    /// Settle the tick: update the session state, start/stop components on a
    /// transition, then let started components decay.
    pub fn on_tick(&mut self, input: &TickInput) -> Option<(SessionState, SessionState)> {
        self.tick += 1;
        self.player_location = input.player_location;
        self.timestamp = input.timestamp;

        let transition = self.detector.update(input);
        if transition.is_some() {
            self.revalidate();
        }

        self.dispatch(&GameSignal::GameTick { tick: self.tick });
        transition
    }

    /// Replace the configuration and notify components of the changed key.
    pub fn update_config(&mut self, key: &str, config: PluginConfig) {
        self.config = config;
        self.handle_signal(&GameSignal::ConfigChanged {
            group: CONFIG_GROUP.to_string(),
            key: key.to_string(),
        });
    }

    pub fn shutdown(&mut self) {
        let halted = self.scheduler.halt_all();
        self.running = false;
        self.roster.clear();
        tracing::info!(halted, "Runtime shut down");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_state(&self) -> &SessionState {
        self.detector.state()
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    /// A started component by concrete type
    pub fn component<T: 'static>(&self) -> Option<&T> {
        self.scheduler.find::<T>()
    }

    pub fn active_components(&self) -> Vec<&'static str> {
        self.scheduler.active_components()
    }

    /// First recommendation from a started component, if prayer display is on
    pub fn prayer_advice(&self) -> Option<PrayerAdvice> {
        if !self.config.prayer_mode.is_enabled() {
            return None;
        }
        self.scheduler
            .started()
            .find_map(|component| component.prayer_advice(&self.config))
    }

    /// Advice for the prayer book highlight
    pub fn widget_advice(&self) -> Option<PrayerAdvice> {
        self.config
            .prayer_mode
            .shows_widget()
            .then(|| self.prayer_advice())
            .flatten()
    }

    /// Advice for the info box
    pub fn info_box_advice(&self) -> Option<PrayerAdvice> {
        self.config
            .prayer_mode
            .shows_info_box()
            .then(|| self.prayer_advice())
            .flatten()
    }

    /// HP until the active boss's next phase breakpoint
    pub fn health_counter(&self) -> Option<i32> {
        if !self.config.health_counters {
            return None;
        }
        self.scheduler
            .started()
            .find_map(|component| component.hp_until_next_breakpoint())
    }

    pub fn roster(&self) -> &NpcRoster {
        &self.roster
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn revalidate(&mut self) -> RevalidateReport {
        if !self.running {
            return RevalidateReport::default();
        }
        let ctx = SignalContext {
            state: self.detector.state(),
            config: &self.config,
            player_location: self.player_location,
            tick: self.tick,
        };
        let report = self.scheduler.revalidate(&ctx, &self.roster);
        if !report.is_empty() {
            tracing::debug!(
                started = ?report.started,
                stopped = ?report.stopped,
                failed = ?report.failed,
                "Components revalidated"
            );
        }
        report
    }

    fn dispatch(&mut self, signal: &GameSignal) {
        if !self.running {
            return;
        }
        let ctx = SignalContext {
            state: self.detector.state(),
            config: &self.config,
            player_location: self.player_location,
            tick: self.tick,
        };
        self.scheduler.dispatch(signal, &ctx);
    }
}
