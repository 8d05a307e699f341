//! Raid phase detection
//!
//! Turns the per-tick region and status widget samples into a debounced
//! [`SessionState`]. Only transitions are published.

mod detector;

pub use detector::{GRACE_TICKS, PhaseDetector, SessionState};
