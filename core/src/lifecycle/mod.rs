//! Component lifecycle
//!
//! Feature modules are registered once at startup and started/stopped by the
//! [`LifecycleScheduler`] as the session state and configuration change.

mod component;
mod error;
mod scheduler;


pub use component::{LifecycleComponent, NoReplay, SignalReplay};
pub use error::ComponentError;
pub use scheduler::{LifecycleScheduler, RevalidateReport};
