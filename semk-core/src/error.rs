//! Error types for the RAM filesystem and editor.

use thiserror::Error;

/// Errors returned by filesystem and editor operations.
///
/// None of these are fatal: every operation reports its failure to the
/// caller and leaves the table unchanged.
#[derive(Error, Debug)]
pub enum SemkError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("File table full")]
    TableFull,

    #[error("Directory not empty: {0}")]
    NotEmpty(String),

    #[error("Is a directory: {0}")]
    IsDirectory(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Capacity exceeded ({capacity} bytes)")]
    CapacityExceeded { capacity: usize },

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Invalid entry handle: {0}")]
    InvalidHandle(u16),

    #[error("An editor session is already open")]
    SessionActive,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Lock poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for filesystem and editor operations.
pub type SemkResult<T> = Result<T, SemkError>;
