pub mod context;
pub mod encounters;
pub mod game_data;
pub mod lifecycle;
pub mod points;
pub mod prediction;
pub mod raid_state;
pub mod runtime;
pub mod signal_processor;

// Re-exports for convenience
pub use context::{ConfigError, PluginConfig, PluginConfigExt};
pub use game_data::{EncounterId, REGION_LOBBY};
pub use lifecycle::{
    ComponentError, LifecycleComponent, LifecycleScheduler, RevalidateReport, SignalReplay,
};
pub use prediction::{
    AttackPredictionQueue, HazardSignal, PrayerAdvice, PrayerKind, PredictedHazard,
    TickConversion,
};
pub use raid_state::{PhaseDetector, SessionState};
pub use runtime::{NpcRoster, PluginRuntime};
pub use signal_processor::{GameSignal, NpcRef, SignalContext, SignalHandler, TickInput, WorldPoint};
