//! lutgen Color - statistical color transfer, tone adjustments and 3D LUTs.

pub mod adjust;
pub mod error;
pub mod lut;
pub mod pipeline;
pub mod stats;
pub mod transfer;

pub use adjust::{apply_adjustments, Adjustments};
pub use error::ColorError;
pub use lut::{build_lut, LutBuilder, LutData, DEFAULT_LUT_SIZE, MAX_LUT_SIZE, MIN_LUT_SIZE};
pub use pipeline::GradingSession;
pub use stats::{compute_stats, ChannelStats, ColorStats};
pub use transfer::{transfer, transfer_to_reference, ChannelTransfer, ColorTransfer};
