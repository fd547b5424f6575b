//! Error types for the tinytown engine.

use thiserror::Error;

/// Top-level error type for core operations.
///
/// The day loop itself never fails — apply-time problems degrade to no-ops
/// and decision failures degrade to the random fallback. These errors only
/// surface from configuration loading.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration parse or validation failure.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Failure signal from a free-choice [`DecisionSource`](crate::DecisionSource).
///
/// The core never retries a failed delegation; any of these triggers the
/// uniform-random fallback action.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// The collaborator could not be reached (network, timeout, no backend).
    #[error("Decision source unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered, but not with a usable action proposal.
    #[error("Decision source returned an unusable proposal: {0}")]
    Malformed(String),
}
