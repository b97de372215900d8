//! Error types for the coursecal feed.

use thiserror::Error;

/// Errors that can occur while setting the feed up.
///
/// Request handling never produces these: a missing export is a normal
/// outcome (`Option`), and filesystem failures are logged and treated
/// as absent rather than surfaced to clients.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for coursecal operations.
pub type FeedResult<T> = Result<T, FeedError>;
