pub mod commands;
pub mod logging;
pub mod repl;
pub mod replay;

pub use repl::readline;
pub use replay::{HostEvent, ReplayError, TickReport};
