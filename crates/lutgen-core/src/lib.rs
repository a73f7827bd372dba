//! lutgen Core - Foundation types for the LUT generator
//!
//! This crate provides the types shared by every stage of the pipeline:
//! - RGBA8 pixel buffers (`PixelBuffer`)
//! - Named RGB triples (`Rgb`)
//! - The workspace error type

pub mod buffer;
pub mod color;
pub mod error;

pub use buffer::PixelBuffer;
pub use color::Rgb;
pub use error::{LutGenError, Result};

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;
