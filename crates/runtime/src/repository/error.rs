//! Error types raised by repository implementations.

use game_core::MalformedState;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("snapshot repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] MalformedState),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
