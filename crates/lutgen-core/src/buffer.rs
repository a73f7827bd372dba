//! RGBA8 pixel buffers in CPU memory.
//!
//! Every processing stage reads one buffer and allocates a fresh one for its
//! output, so a buffer handed to the pipeline is never modified behind the
//! caller's back.

use crate::error::{LutGenError, Result};
use crate::CHANNELS;

/// A rectangular grid of 8-bit RGBA pixels, row-major and tightly packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// `width * height * 4` bytes, no row padding.
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zeroed (transparent black) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// Wrap raw RGBA8 bytes, checking that the length matches the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(LutGenError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut buf = Self::new(width, height);
        for px in buf.pixels_mut() {
            *px = rgba;
        }
        buf
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when the buffer holds no pixels at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Raw interleaved RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixels viewed as `[r, g, b, a]` quads.
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }

    /// Mutable pixel quads.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        Some(self.pixels()[idx])
    }

    /// Build a new buffer of the same size by mapping the RGB part of each
    /// pixel. Alpha is copied verbatim.
    pub fn map_rgb<F>(&self, mut f: F) -> Self
    where
        F: FnMut([u8; 3]) -> [u8; 3],
    {
        let mut out = Self::new(self.width, self.height);
        for (dst, src) in out.pixels_mut().iter_mut().zip(self.pixels()) {
            let [r, g, b] = f([src[0], src[1], src[2]]);
            *dst = [r, g, b, src[3]];
        }
        out
    }

    /// Create a test pattern buffer (8 vertical color bars).
    pub fn test_pattern(width: u32, height: u32) -> Self {
        const BARS: [[u8; 4]; 8] = [
            [255, 255, 255, 255], // White
            [255, 255, 0, 255],   // Yellow
            [0, 255, 255, 255],   // Cyan
            [0, 255, 0, 255],     // Green
            [255, 0, 255, 255],   // Magenta
            [255, 0, 0, 255],     // Red
            [0, 0, 255, 255],     // Blue
            [0, 0, 0, 255],       // Black
        ];
        let mut buf = Self::new(width, height);
        let w = width as usize;
        for (i, px) in buf.pixels_mut().iter_mut().enumerate() {
            let x = i % w.max(1);
            *px = BARS[x * 8 / w.max(1)];
        }
        buf
    }

    /// Horizontal gradient: red ramps left to right, green top to bottom,
    /// blue is the inverse of red. Handy for tests that need spread in
    /// every channel.
    pub fn gradient(width: u32, height: u32) -> Self {
        let mut buf = Self::new(width, height);
        let w = width as usize;
        let h = height as usize;
        let ramp = |i: usize, n: usize| -> u8 {
            if n <= 1 {
                0
            } else {
                (i * 255 / (n - 1)) as u8
            }
        };
        for (i, px) in buf.pixels_mut().iter_mut().enumerate() {
            let x = i % w.max(1);
            let y = i / w.max(1);
            let r = ramp(x, w);
            *px = [r, ramp(y, h), 255 - r, 255];
        }
        buf
    }
}
