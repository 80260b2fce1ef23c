//! Error types for ubuntu-bug-triage
//!
//! One enum covers every way a triage run can fail. Uses thiserror for
//! ergonomic error handling.

use thiserror::Error;

/// Result type alias for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Error type for triage operations
#[derive(Error, Debug)]
pub enum TriageError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The team (or person) named as triage scope does not exist
    #[error("Team not found: {0}")]
    TeamNotFound(String),

    /// The source package named as triage scope does not exist
    #[error("No package with that name exists: {0}")]
    PackageNotFound(String),

    /// Any failure reported by the remote tracker
    #[error("Launchpad error: {0}")]
    Tracker(#[from] launchpad::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Output rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Anyhow errors (for more context)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl TriageError {
    /// Whether the error is one of the scope-resolution failures
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TriageError::TeamNotFound(_) | TriageError::PackageNotFound(_)
        )
    }
}
