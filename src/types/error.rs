//! Error types

use serde::Serialize;

/// Request-level rejection surfaced to the caller as an input rejection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum RejectionError {
    /// Session state contradicts the user's intent: inactive without the
    /// user ending it, or still active after the user ended it
    #[error("Continuity Guarantee violated: {detail}")]
    Continuity { detail: String },
}

/// Failures of the external responder. Always converted to the safe
/// fallback by the moderator, never returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponderError {
    /// Call exceeded its time bound
    #[error("Responder timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Provider is not reachable
    #[error("Responder unavailable: {0}")]
    Unavailable(String),

    /// Provider returned an error
    #[error("Responder failed: {0}")]
    Failed(String),

    /// Provider returned no usable text
    #[error("Responder returned empty text")]
    Empty,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
