//! 3D LUT construction and sampling.
//!
//! A [`LutData`] is an N×N×N lattice of normalized output colors. The
//! builder evaluates the color transfer followed by the tone adjustments at
//! every lattice point, so the table reproduces exactly the transform used
//! for the preview.

use lutgen_core::{PixelBuffer, Rgb};
use tracing::debug;

use crate::adjust::Adjustments;
use crate::error::ColorError;
use crate::stats::ColorStats;
use crate::transfer::ColorTransfer;

/// Lattice size used when none is requested.
pub const DEFAULT_LUT_SIZE: usize = 32;

/// Smallest usable lattice: two points per axis.
pub const MIN_LUT_SIZE: usize = 2;

/// Largest lattice the builder accepts.
pub const MAX_LUT_SIZE: usize = 256;

/// Check a lattice size against [`MIN_LUT_SIZE`]..=[`MAX_LUT_SIZE`].
pub fn validate_size(size: usize) -> Result<(), ColorError> {
    if !(MIN_LUT_SIZE..=MAX_LUT_SIZE).contains(&size) {
        return Err(ColorError::InvalidLatticeSize {
            size,
            max: MAX_LUT_SIZE,
        });
    }
    Ok(())
}

/// A cubic 3D lookup table with entries normalized to [0, 1].
///
/// Entries are stored red-fastest: index `r + g * N + b * N²`, which is the
/// row order of `.cube` and `.3dl` files.
#[derive(Debug, Clone, PartialEq)]
pub struct LutData {
    size: usize,
    data: Vec<Rgb>,
}

impl LutData {
    /// Wrap precomputed entries, checking the lattice size, the entry count
    /// and that every channel is a finite value in [0, 1].
    pub fn from_entries(size: usize, data: Vec<Rgb>) -> Result<Self, ColorError> {
        validate_size(size)?;
        let expected = size * size * size;
        if data.len() != expected {
            return Err(ColorError::LutSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        // NaN fails the range check too
        if let Some(index) = data
            .iter()
            .position(|e| !e.to_array().iter().all(|v| (0.0..=1.0).contains(v)))
        {
            return Err(ColorError::EntryOutOfRange {
                index,
                value: data[index].to_array(),
            });
        }
        Ok(Self { size, data })
    }

    /// Identity lattice: every point maps to itself.
    pub fn identity(size: usize) -> Result<Self, ColorError> {
        validate_size(size)?;
        let n = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(Rgb::new(r as f32 / n, g as f32 / n, b as f32 / n));
                }
            }
        }
        Ok(Self { size, data })
    }

    /// Points per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All entries, blue-outer, green-middle, red-inner.
    #[inline]
    pub fn entries(&self) -> &[Rgb] {
        &self.data
    }

    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + g * self.size + b * self.size * self.size
    }

    /// Entry at lattice coordinate `(r, g, b)`, or `None` when out of range.
    pub fn get(&self, r: usize, g: usize, b: usize) -> Option<Rgb> {
        if r >= self.size || g >= self.size || b >= self.size {
            return None;
        }
        Some(self.data[self.index(r, g, b)])
    }

    /// Look up a normalized color using trilinear interpolation.
    pub fn sample(&self, rgb: Rgb) -> Rgb {
        let s = self.size;
        let n = (s - 1) as f32;

        let coords = rgb.clamp(0.0, 1.0).map(|t| t * n);

        let r0 = (coords.r as usize).min(s - 2);
        let g0 = (coords.g as usize).min(s - 2);
        let b0 = (coords.b as usize).min(s - 2);
        let (r1, g1, b1) = (r0 + 1, g0 + 1, b0 + 1);
        let fr = coords.r - r0 as f32;
        let fg = coords.g - g0 as f32;
        let fb = coords.b - b0 as f32;

        let at = |r: usize, g: usize, b: usize| self.data[self.index(r, g, b)];

        let c00 = at(r0, g0, b0).lerp(at(r1, g0, b0), fr);
        let c10 = at(r0, g1, b0).lerp(at(r1, g1, b0), fr);
        let c01 = at(r0, g0, b1).lerp(at(r1, g0, b1), fr);
        let c11 = at(r0, g1, b1).lerp(at(r1, g1, b1), fr);
        let c0 = c00.lerp(c10, fg);
        let c1 = c01.lerp(c11, fg);
        c0.lerp(c1, fb)
    }

    /// Run every pixel of `image` through the table. Alpha is kept.
    pub fn apply_to_image(&self, image: &PixelBuffer) -> PixelBuffer {
        image.map_rgb(|rgb| {
            let input = Rgb::from_rgb8(rgb).map(|v| v / 255.0);
            self.sample(input).map(|v| v * 255.0).to_rgb8()
        })
    }
}

/// Builds a [`LutData`] from a pair of color statistics.
#[derive(Debug, Clone)]
pub struct LutBuilder {
    transfer: ColorTransfer,
    adjustments: Adjustments,
    size: usize,
}

impl LutBuilder {
    /// Start a builder for the transfer from `original` onto `reference`,
    /// with identity adjustments and [`DEFAULT_LUT_SIZE`].
    pub fn new(original: &ColorStats, reference: &ColorStats) -> Self {
        Self {
            transfer: ColorTransfer::new(original, reference),
            adjustments: Adjustments::NONE,
            size: DEFAULT_LUT_SIZE,
        }
    }

    /// Tone adjustments composed after the transfer.
    pub fn adjustments(mut self, adjustments: Adjustments) -> Self {
        self.adjustments = adjustments.clamped();
        self
    }

    /// Points per lattice axis.
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Output color for one 0-255 input, normalized to [0, 1].
    #[inline]
    fn evaluate(&self, input: Rgb) -> Rgb {
        let transferred = self.transfer.apply(input);
        self.adjustments
            .apply_rgb(transferred)
            .map(|v| v / 255.0)
    }

    /// Fill one blue slab (N² entries, green-major, red-minor).
    fn fill_slab(&self, axis: &[f32], b: usize, slab: &mut [Rgb]) {
        let n = axis.len();
        for g in 0..n {
            for r in 0..n {
                slab[r + g * n] = self.evaluate(Rgb::new(axis[r], axis[g], axis[b]));
            }
        }
    }

    /// Sample the transform at every lattice point.
    ///
    /// Fails with [`ColorError::InvalidLatticeSize`] before doing any work
    /// when the size is outside [`MIN_LUT_SIZE`]..=[`MAX_LUT_SIZE`].
    pub fn build(&self) -> Result<LutData, ColorError> {
        validate_size(self.size)?;
        let n = self.size;
        let axis: Vec<f32> = (0..n)
            .map(|i| i as f32 / (n - 1) as f32 * 255.0)
            .collect();

        let mut data = vec![Rgb::BLACK; n * n * n];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            data.par_chunks_mut(n * n)
                .enumerate()
                .for_each(|(b, slab)| self.fill_slab(&axis, b, slab));
        }

        #[cfg(not(feature = "parallel"))]
        for (b, slab) in data.chunks_mut(n * n).enumerate() {
            self.fill_slab(&axis, b, slab);
        }

        debug!(
            size = n,
            entries = data.len(),
            adjusted = !self.adjustments.is_identity(),
            "LUT lattice built"
        );

        Ok(LutData { size: n, data })
    }
}

/// Build a lattice in one call.
pub fn build_lut(
    original_stats: &ColorStats,
    reference_stats: &ColorStats,
    adjustments: &Adjustments,
    size: usize,
) -> Result<LutData, ColorError> {
    LutBuilder::new(original_stats, reference_stats)
        .adjustments(*adjustments)
        .size(size)
        .build()
}
