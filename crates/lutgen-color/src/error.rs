//! Color subsystem errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("image has no pixels")]
    EmptyImage,
    #[error("invalid lattice size {size}: must be between 2 and {max}")]
    InvalidLatticeSize { size: usize, max: usize },
    #[error("LUT entry count mismatch: expected {expected}, got {got}")]
    LutSizeMismatch { expected: usize, got: usize },
    #[error("LUT entry {index} is not a normalized color: {value:?}")]
    EntryOutOfRange { index: usize, value: [f32; 3] },
}
