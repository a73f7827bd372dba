//! Slider-driven tone adjustments.
//!
//! Six independent corrections applied in a fixed order:
//! brightness, contrast, saturation, temperature, tint, vibrance.
//! Each slider is an integer percentage in [-100, 100] and is a no-op at 0.
//! Work happens on 0-255 floats; the result is clamped once at the end of
//! the chain.

use lutgen_core::{PixelBuffer, Rgb};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Slider range limit (both directions).
pub const SLIDER_LIMIT: i32 = 100;

/// Midpoint contrast pivots around.
const CONTRAST_PIVOT: f32 = 128.0;

/// Channel shift at full temperature / tint deflection.
const SHIFT_AT_FULL: f32 = 10.0;

/// Rec. 601 luma weights used as the gray reference for saturation.
const GRAY_WEIGHTS: [f32; 3] = [0.2989, 0.5870, 0.1140];

/// RMS deviation from the channel average of a fully saturated primary or
/// secondary (e.g. 255, 0, 0). Normalizes the vibrance saturation measure
/// to [0, 1].
const VIBRANCE_RMS_MAX: f32 = 255.0 * std::f32::consts::SQRT_2 / 3.0;

/// User tone adjustments. All zero is the identity.
///
/// New sliders are added as named fields with their own formula in
/// [`Adjustments::apply_rgb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub brightness: i32,
    pub contrast: i32,
    pub saturation: i32,
    pub temperature: i32,
    pub tint: i32,
    pub vibrance: i32,
}

impl Adjustments {
    /// Identity adjustments.
    pub const NONE: Self = Self {
        brightness: 0,
        contrast: 0,
        saturation: 0,
        temperature: 0,
        tint: 0,
        vibrance: 0,
    };

    /// True when every slider is at zero.
    pub fn is_identity(&self) -> bool {
        *self == Self::NONE
    }

    /// Copy with every slider clamped to [-100, 100].
    pub fn clamped(&self) -> Self {
        let c = |v: i32| v.clamp(-SLIDER_LIMIT, SLIDER_LIMIT);
        let out = Self {
            brightness: c(self.brightness),
            contrast: c(self.contrast),
            saturation: c(self.saturation),
            temperature: c(self.temperature),
            tint: c(self.tint),
            vibrance: c(self.vibrance),
        };
        if out != *self {
            warn!(requested = ?self, "Adjustment sliders out of range, clamped");
        }
        out
    }

    /// Apply the adjustment chain to a 0-255 color.
    ///
    /// Intermediate values may leave [0, 255]; only the final result is
    /// clamped. Callers are expected to pass clamped sliders.
    pub fn apply_rgb(&self, c: Rgb) -> Rgb {
        let mut c = c;

        if self.brightness != 0 {
            let factor = 1.0 + self.brightness as f32 / 100.0;
            c = c.map(|v| v * factor);
        }

        if self.contrast != 0 {
            let factor = 1.0 + self.contrast as f32 / 100.0;
            c = c.map(|v| (v - CONTRAST_PIVOT) * factor + CONTRAST_PIVOT);
        }

        if self.saturation != 0 {
            let factor = 1.0 + self.saturation as f32 / 100.0;
            let gray = GRAY_WEIGHTS[0] * c.r + GRAY_WEIGHTS[1] * c.g + GRAY_WEIGHTS[2] * c.b;
            c = c.map(|v| gray + (v - gray) * factor);
        }

        if self.temperature != 0 {
            let shift = self.temperature as f32 / 100.0 * SHIFT_AT_FULL;
            c.r += shift;
            c.b -= shift;
        }

        if self.tint != 0 {
            c.g += self.tint as f32 / 100.0 * SHIFT_AT_FULL;
        }

        if self.vibrance != 0 {
            let avg = (c.r + c.g + c.b) / 3.0;
            let rms = (((c.r - avg).powi(2) + (c.g - avg).powi(2) + (c.b - avg).powi(2)) / 3.0)
                .sqrt();
            let sat = (rms / VIBRANCE_RMS_MAX).clamp(0.0, 1.0);
            let factor = 1.0 + self.vibrance as f32 / 100.0 * (1.0 - sat);
            c = c.map(|v| avg + (v - avg) * factor);
        }

        c.clamp(0.0, 255.0)
    }
}

/// Apply `adjustments` to every pixel of `image`, returning a new buffer.
///
/// Alpha is preserved. With all sliders at zero the output equals the input
/// exactly.
pub fn apply_adjustments(image: &PixelBuffer, adjustments: &Adjustments) -> PixelBuffer {
    let adj = adjustments.clamped();
    if adj.is_identity() {
        return image.clone();
    }
    image.map_rgb(|rgb| adj.apply_rgb(Rgb::from_rgb8(rgb)).to_rgb8())
}
