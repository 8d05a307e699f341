//! Error types for component lifecycle operations

use thiserror::Error;

/// Errors raised by a component's `start`/`stop`
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("failed to start {component}: {reason}")]
    Start {
        component: &'static str,
        reason: String,
    },

    #[error("failed to stop {component}: {reason}")]
    Stop {
        component: &'static str,
        reason: String,
    },

    #[error("{component} requires {dependency}")]
    MissingDependency {
        component: &'static str,
        dependency: &'static str,
    },
}
