//! Error types for the reagent domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each bounded context
//! has its own error enum; only setup-time errors propagate as hard
//! failures — everything that happens during a run ends up in the
//! transcript or the final run result instead.

use thiserror::Error;

/// The top-level error type for all reagent operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Registry errors ---
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Setup-time registry failures. These are the only errors in the system
/// that are fatal to the caller.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Capability already registered: {0}")]
    Duplicate(String),
}

/// Invocation-time failures. Every variant is recorded as an observation
/// in the transcript and never aborts a run.
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    #[error("Capability failed: {capability} — {reason}")]
    Handler { capability: String, reason: String },

    #[error("Capability panicked: {capability} — {reason}")]
    Panicked { capability: String, reason: String },

    #[error("Capability timed out: {capability} after {timeout_secs}s")]
    Timeout {
        capability: String,
        timeout_secs: u64,
    },
}

/// Reasoning port failures. A failed generation ends the run as
/// `Exhausted`, carried inside the run result rather than raised.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Generation failed: {0}")]
    Failed(String),

    #[error("Generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_displays_correctly() {
        let err = Error::Registry(RegistryError::Duplicate("search".into()));
        assert!(err.to_string().contains("search"));
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn invoke_error_displays_correctly() {
        let err = InvokeError::Timeout {
            capability: "calculator".into(),
            timeout_secs: 30,
        };
        assert!(err.to_string().contains("calculator"));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn generation_error_displays_correctly() {
        let err = GenerationError::Failed("connection reset".into());
        assert!(err.to_string().contains("connection reset"));
    }
}
