//! Error types for terraglobe

use thiserror::Error;

/// Main error type for terraglobe operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for terraglobe operations
pub type Result<T> = std::result::Result<T, Error>;
