//! Attack prediction
//!
//! One [`AttackPredictionQueue`] per encounter turns hazard-creation signals
//! into a decaying, urgency-ordered forecast of which protection prayer is
//! needed and in how many ticks.

mod conversion;
mod hazard;
mod queue;

pub use conversion::TickConversion;
pub use hazard::{PrayerAdvice, PrayerKind, PredictedHazard};
pub use queue::{AttackPredictionQueue, HazardSignal};
