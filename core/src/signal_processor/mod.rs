pub mod handler;
pub mod signal;

pub use handler::{SignalContext, SignalHandler};
pub use signal::{GameSignal, NpcRef, TickInput, WorldPoint};
