//! Export errors.

use lutgen_color::ColorError;
use thiserror::Error;

/// Errors raised while rendering, bundling or reading LUT files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid LUT file: {0}")]
    InvalidLut(String),

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Result type alias for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
