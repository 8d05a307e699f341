use std::any::Any;

use amascut_types::PluginConfig;

use super::error::ComponentError;
use crate::prediction::PrayerAdvice;
use crate::raid_state::SessionState;
use crate::signal_processor::{SignalContext, SignalHandler};

/// A feature module whose activation is owned by the [`LifecycleScheduler`].
///
/// The scheduler never calls `start` on a started component or `stop` on a
/// stopped one, and only started components receive signals. Components
/// allocate their per-encounter state in `start` and release it in `stop`.
///
/// [`LifecycleScheduler`]: super::LifecycleScheduler
pub trait LifecycleComponent: SignalHandler {
    fn name(&self) -> &'static str;

    /// Whether the component should be running. Must be pure.
    fn is_enabled(&self, config: &PluginConfig, state: &SessionState) -> bool;

    /// Components that must already be started before this one starts.
    /// Dependencies must be registered ahead of their dependents.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    fn start(&mut self) -> Result<(), ComponentError>;

    fn stop(&mut self) -> Result<(), ComponentError>;

    /// Prayer the component currently recommends, if it has an opinion
    fn prayer_advice(&self, _config: &PluginConfig) -> Option<PrayerAdvice> {
        None
    }

    /// HP left until the tracked boss's next phase breakpoint
    fn hp_until_next_breakpoint(&self) -> Option<i32> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Supplies the signals a freshly started component missed, such as NPCs that
/// were already spawned before it activated.
pub trait SignalReplay {
    fn replay(&self, component: &mut dyn LifecycleComponent, ctx: &SignalContext<'_>);
}

/// Replay source with nothing to replay
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReplay;

impl SignalReplay for NoReplay {
    fn replay(&self, _component: &mut dyn LifecycleComponent, _ctx: &SignalContext<'_>) {}
}
