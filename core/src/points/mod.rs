//! Raid points tracking
//!
//! [`PointsTracker`] estimates personal raid points from damage, room
//! completions and MVP drops, and reports the purple chance when the
//! sarcophagus is opened.

mod tracker;
mod unique_chance;

pub use tracker::{PointsTracker, RaidSummary};
pub use unique_chance::{unique_chance, unique_odds};
