//! Grading session: one original/reference pair and its derived state.
//!
//! The session runs statistics, color transfer and the initial LUT build
//! once, then keeps the post-transfer image around. Slider changes are
//! applied to that cached base image and the LUT is rebuilt with the same
//! sliders, so what gets exported is what the preview shows.

use lutgen_core::PixelBuffer;
use tracing::info;

use crate::adjust::{apply_adjustments, Adjustments};
use crate::error::ColorError;
use crate::lut::{validate_size, LutBuilder, LutData};
use crate::stats::{compute_stats, ColorStats};
use crate::transfer::ColorTransfer;

/// State for one grading request.
#[derive(Debug, Clone)]
pub struct GradingSession {
    original_stats: ColorStats,
    reference_stats: ColorStats,
    /// Post-transfer, pre-adjustment image.
    base_image: PixelBuffer,
    adjustments: Adjustments,
    lut_size: usize,
    lut: LutData,
}

impl GradingSession {
    /// Analyze both images, transfer the original onto the reference and
    /// build the initial LUT with identity adjustments.
    pub fn process(
        original: &PixelBuffer,
        reference: &PixelBuffer,
        lut_size: usize,
    ) -> Result<Self, ColorError> {
        validate_size(lut_size)?;

        let original_stats = compute_stats(original)?;
        let reference_stats = compute_stats(reference)?;

        let base_image = ColorTransfer::new(&original_stats, &reference_stats).apply_image(original);
        let lut = LutBuilder::new(&original_stats, &reference_stats)
            .size(lut_size)
            .build()?;

        info!(
            width = original.width(),
            height = original.height(),
            lut_size,
            "Grading session processed"
        );

        Ok(Self {
            original_stats,
            reference_stats,
            base_image,
            adjustments: Adjustments::NONE,
            lut_size,
            lut,
        })
    }

    /// Current preview: the base image with the current adjustments.
    pub fn preview(&self) -> PixelBuffer {
        apply_adjustments(&self.base_image, &self.adjustments)
    }

    /// Replace the adjustments, rebuild the LUT and return the new preview.
    ///
    /// Sliders outside [-100, 100] are clamped.
    pub fn set_adjustments(&mut self, adjustments: Adjustments) -> Result<PixelBuffer, ColorError> {
        let adjustments = adjustments.clamped();
        self.lut = LutBuilder::new(&self.original_stats, &self.reference_stats)
            .adjustments(adjustments)
            .size(self.lut_size)
            .build()?;
        self.adjustments = adjustments;
        info!(adjustments = ?adjustments, "Adjustments updated");
        Ok(self.preview())
    }

    /// Back to identity adjustments.
    pub fn reset_adjustments(&mut self) -> Result<PixelBuffer, ColorError> {
        self.set_adjustments(Adjustments::NONE)
    }

    pub fn original_stats(&self) -> &ColorStats {
        &self.original_stats
    }

    pub fn reference_stats(&self) -> &ColorStats {
        &self.reference_stats
    }

    /// The cached post-transfer image.
    pub fn base_image(&self) -> &PixelBuffer {
        &self.base_image
    }

    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    /// LUT matching the current preview.
    pub fn lut(&self) -> &LutData {
        &self.lut
    }

    pub fn lut_size(&self) -> usize {
        self.lut_size
    }
}
