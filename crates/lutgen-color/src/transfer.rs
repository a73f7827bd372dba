//! Statistical color transfer (per-channel mean/std matching).
//!
//! Each channel is remapped with the affine function
//! `(v - src.mean) * scale + ref.mean`, recentring the source distribution
//! on the reference mean and stretching it to the reference spread. The
//! preview path and the LUT lattice both evaluate the same [`ColorTransfer`].

use lutgen_core::{PixelBuffer, Rgb};
use tracing::debug;

use crate::error::ColorError;
use crate::stats::{compute_stats, ChannelStats, ColorStats};

/// Standard deviations at or below this are treated as a flat channel.
pub const DEGENERATE_STD: f64 = 1e-6;

/// Affine remap for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelTransfer {
    pub source_mean: f32,
    pub scale: f32,
    pub reference_mean: f32,
}

impl ChannelTransfer {
    /// Derive the remap from source and reference statistics.
    ///
    /// A flat source channel has no spread to rescale, so the scale is 1.
    /// When the reference is flat as well, its distribution is a single
    /// point and the scale is 0, collapsing the channel onto that value.
    pub fn new(source: &ChannelStats, reference: &ChannelStats) -> Self {
        let scale = if source.std > DEGENERATE_STD {
            reference.std / source.std
        } else if reference.std > DEGENERATE_STD {
            1.0
        } else {
            0.0
        };
        Self {
            source_mean: source.mean as f32,
            scale: scale as f32,
            reference_mean: reference.mean as f32,
        }
    }

    /// Remap a 0-255 value, clamped to [0, 255].
    #[inline]
    pub fn apply(&self, v: f32) -> f32 {
        ((v - self.source_mean) * self.scale + self.reference_mean).clamp(0.0, 255.0)
    }

    /// True when the source channel had no spread.
    pub fn is_degenerate(source: &ChannelStats) -> bool {
        source.std <= DEGENERATE_STD
    }
}

/// Remap for all three channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransfer {
    pub r: ChannelTransfer,
    pub g: ChannelTransfer,
    pub b: ChannelTransfer,
}

impl ColorTransfer {
    pub fn new(source: &ColorStats, reference: &ColorStats) -> Self {
        for (name, ch) in ["r", "g", "b"].iter().zip(source.channels()) {
            if ChannelTransfer::is_degenerate(ch) {
                debug!(
                    channel = *name,
                    mean = ch.mean,
                    "Flat source channel, scale not derived from std"
                );
            }
        }
        Self {
            r: ChannelTransfer::new(&source.r, &reference.r),
            g: ChannelTransfer::new(&source.g, &reference.g),
            b: ChannelTransfer::new(&source.b, &reference.b),
        }
    }

    /// Transform a color in the 0-255 domain. The result is clamped but
    /// not rounded.
    #[inline]
    pub fn apply(&self, c: Rgb) -> Rgb {
        Rgb::new(self.r.apply(c.r), self.g.apply(c.g), self.b.apply(c.b))
    }

    /// Transform every pixel of `image` into a new buffer. Alpha is kept.
    pub fn apply_image(&self, image: &PixelBuffer) -> PixelBuffer {
        image.map_rgb(|rgb| self.apply(Rgb::from_rgb8(rgb)).to_rgb8())
    }
}

/// Map `source` onto the reference distribution using precomputed stats.
pub fn transfer(
    source: &PixelBuffer,
    source_stats: &ColorStats,
    reference_stats: &ColorStats,
) -> PixelBuffer {
    ColorTransfer::new(source_stats, reference_stats).apply_image(source)
}

/// Compute the source statistics and transfer in one step.
pub fn transfer_to_reference(
    source: &PixelBuffer,
    reference_stats: &ColorStats,
) -> Result<PixelBuffer, ColorError> {
    let source_stats = compute_stats(source)?;
    Ok(transfer(source, &source_stats, reference_stats))
}
