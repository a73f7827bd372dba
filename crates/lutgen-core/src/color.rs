//! RGB triples.
//!
//! The pipeline addresses channels by name only. `[f32; 3]` shows up solely
//! at file-format boundaries through [`Rgb::to_array`] / [`Rgb::from_array`].

use serde::{Deserialize, Serialize};

/// RGB color with 32-bit float components.
///
/// The value domain depends on the stage: 0-255 inside the processing
/// pipeline, 0-1 once stored in a LUT.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Create a new color from RGB components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// All three channels set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// 8-bit channels lifted to floats in the 0-255 domain.
    #[inline]
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f32,
            g: rgb[1] as f32,
            b: rgb[2] as f32,
        }
    }

    /// Round and clamp a 0-255 color back to 8-bit channels.
    #[inline]
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self {
            r: a[0],
            g: a[1],
            b: a[2],
        }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Apply `f` to each channel.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    /// Clamp every channel to `[lo, hi]`.
    #[inline]
    pub fn clamp(self, lo: f32, hi: f32) -> Self {
        self.map(|v| v.clamp(lo, hi))
    }

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// True when no channel is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    pub const BLACK: Self = Self::splat(0.0);
}
