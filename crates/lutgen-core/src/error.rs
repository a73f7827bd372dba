//! Error types for lutgen.

use thiserror::Error;

/// Main error type for lutgen operations.
#[derive(Error, Debug)]
pub enum LutGenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for lutgen operations.
pub type Result<T> = std::result::Result<T, LutGenError>;
