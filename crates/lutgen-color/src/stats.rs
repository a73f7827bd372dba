//! Per-channel descriptive statistics of an image.
//!
//! Channels are treated independently; no cross-channel covariance is
//! modeled. Accumulation goes through a 256-bin histogram per channel, which
//! gives exact integer sums and the same median a full sort would.

use lutgen_core::PixelBuffer;
use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// Statistics of one 8-bit channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub mean: f64,
    /// Population standard deviation, `sqrt(E[x²] - E[x]²)`.
    pub std: f64,
    pub min: u8,
    pub max: u8,
    /// Value at index `floor(n / 2)` of the sorted samples.
    pub median: u8,
}

impl ChannelStats {
    fn from_histogram(hist: &[u64; 256], total: u64) -> Self {
        let mut sum = 0u64;
        let mut sq_sum = 0u64;
        let mut min = None;
        let mut max = 0u8;
        for (v, &count) in hist.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let v64 = v as u64;
            sum += v64 * count;
            sq_sum += v64 * v64 * count;
            min.get_or_insert(v as u8);
            max = v as u8;
        }

        let median_index = total / 2;
        let mut cum = 0u64;
        let mut median = max;
        for (v, &count) in hist.iter().enumerate() {
            cum += count;
            if cum > median_index {
                median = v as u8;
                break;
            }
        }

        let n = total as f64;
        let mean = sum as f64 / n;
        // Rounding residue can push the variance a hair below zero.
        let variance = (sq_sum as f64 / n - mean * mean).max(0.0);

        Self {
            mean,
            std: variance.sqrt(),
            min: min.unwrap_or(0),
            max,
            median,
        }
    }
}

/// Per-channel statistics for R, G and B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStats {
    pub r: ChannelStats,
    pub g: ChannelStats,
    pub b: ChannelStats,
}

impl ColorStats {
    /// Channels in R, G, B order.
    pub fn channels(&self) -> [&ChannelStats; 3] {
        [&self.r, &self.g, &self.b]
    }
}

/// Compute mean, std, min, max and median for each RGB channel.
///
/// Alpha is ignored. An image with no pixels has no statistics and is
/// rejected with [`ColorError::EmptyImage`].
pub fn compute_stats(image: &PixelBuffer) -> Result<ColorStats, ColorError> {
    if image.is_empty() {
        return Err(ColorError::EmptyImage);
    }

    let mut hist = [[0u64; 256]; 3];
    for px in image.pixels() {
        hist[0][px[0] as usize] += 1;
        hist[1][px[1] as usize] += 1;
        hist[2][px[2] as usize] += 1;
    }

    let total = image.pixel_count() as u64;
    Ok(ColorStats {
        r: ChannelStats::from_histogram(&hist[0], total),
        g: ChannelStats::from_histogram(&hist[1], total),
        b: ChannelStats::from_histogram(&hist[2], total),
    })
}
