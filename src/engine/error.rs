//! Error types for the timer engine.

use thiserror::Error;

/// Errors returned by [`IntervalTimerEngine`](super::IntervalTimerEngine)
/// operations.
///
/// Both variants are local and non-fatal: the engine state is left exactly as
/// it was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A configuration with an unusable duration was supplied.
    #[error("Invalid timer configuration: {0}")]
    InvalidConfig(String),

    /// An operation was called in a state that does not allow it.
    #[error("Invalid timer state: {0}")]
    InvalidState(String),
}

impl EngineError {
    /// Returns true if the error was caused by a rejected configuration.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}
