//! Error types for the playback engine
//!
//! Store mutations never fail. These errors come from the edges: collaborator
//! calls, the player task channel, and configuration loading.

use thiserror::Error;

/// Playback engine errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A history, album-visit or preference collaborator failed
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// The player task has stopped and can no longer receive commands
    #[error("Player task is no longer running")]
    ChannelClosed,

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Domain-level error (e.g. an unknown quality name)
    #[error(transparent)]
    Core(#[from] aria_core::CoreError),
}

/// Result type for playback engine operations
pub type Result<T> = std::result::Result<T, PlayerError>;
