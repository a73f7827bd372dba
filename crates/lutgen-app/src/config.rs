//! Application configuration.
//!
//! Stored as JSON with every field optional; missing fields fall back to
//! the defaults below. Command-line flags are layered on top by `main`.

use std::path::Path;

use lutgen_color::{Adjustments, DEFAULT_LUT_SIZE, MAX_LUT_SIZE, MIN_LUT_SIZE};
use lutgen_core::{LutGenError, Result};
use lutgen_export::ExportOptions;
use serde::{Deserialize, Serialize};

/// JPEG quality used for preview images (matches a 0.95 browser export).
pub const DEFAULT_PREVIEW_QUALITY: u8 = 95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LutGenConfig {
    /// Points per LUT axis.
    pub lut_size: usize,
    /// Tone adjustments baked into the preview and the LUT.
    pub adjustments: Adjustments,
    /// Metadata for exported files.
    pub export: ExportOptions,
    /// JPEG quality for preview output, 1-100.
    pub preview_quality: u8,
}

impl Default for LutGenConfig {
    fn default() -> Self {
        Self {
            lut_size: DEFAULT_LUT_SIZE,
            adjustments: Adjustments::default(),
            export: ExportOptions::default(),
            preview_quality: DEFAULT_PREVIEW_QUALITY,
        }
    }
}

impl LutGenConfig {
    /// Parse from JSON text and validate.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| LutGenError::Serialization(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject values the pipeline can't use.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_LUT_SIZE..=MAX_LUT_SIZE).contains(&self.lut_size) {
            return Err(LutGenError::InvalidParameter(format!(
                "lut_size must be between {} and {}, got {}",
                MIN_LUT_SIZE, MAX_LUT_SIZE, self.lut_size
            )));
        }
        if !(1..=100).contains(&self.preview_quality) {
            return Err(LutGenError::InvalidParameter(format!(
                "preview_quality must be between 1 and 100, got {}",
                self.preview_quality
            )));
        }
        Ok(())
    }
}
