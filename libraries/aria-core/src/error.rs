/// Core error types for Aria Player
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Aria Player
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Unrecognized audio quality name
    #[error("Unknown audio quality: {0}")]
    UnknownQuality(String),

    /// Unrecognized quality source name
    #[error("Unknown quality source: {0}")]
    UnknownQualitySource(String),
}
