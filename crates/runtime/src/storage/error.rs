//! Error types raised by storage implementations.

use thiserror::Error;

/// Errors surfaced by key-value store implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no home directory available for the default store location")]
    NoHomeDirectory,
}

pub type Result<T> = std::result::Result<T, StorageError>;
