//! Common error types for Space84

use thiserror::Error;

/// Common result type for Space84 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the artist services
#[derive(Error, Debug)]
pub enum Error {
    /// Requested artist (or other resource) not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// File present but structurally invalid
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration loading or validation error, including a missing
    /// backing directory
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
