// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error, non-success response or unreadable body
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Malformed document or missing required section/key
    #[error("Malformed document: {0}")]
    Structure(String),

    /// Cutlist failed its consistency checks
    #[error("Inconsistent cutlist: {0}")]
    Validation(String),

    /// The header index listed no candidate for the video
    #[error("No cutlist header available for '{video_key}'")]
    NoCutlistHeader { video_key: String },

    /// Every ranked candidate was tried and none validated
    #[error("No cutlist could be retrieved for '{video_key}'")]
    NoCutlistRetrieved { video_key: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
