mod ids;
mod rooms;

pub use ids::*;
pub use rooms::{EncounterId, REGION_LOBBY};

/// Client cycles (20 ms) per game tick (600 ms)
pub const CYCLES_PER_TICK: u32 = 30;
