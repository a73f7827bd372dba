//! Autodesk/Lustre `.3dl` writer.
//!
//! Same row order as `.cube`, with each channel scaled to a 10-bit integer.

use std::fmt::Write as _;

use lutgen_color::LutData;

use crate::options::ExportOptions;

/// Largest code value of the 10-bit output range.
pub const THREE_DL_MAX: f32 = 1023.0;

/// Scale a normalized channel to a 10-bit code value, rounding half away
/// from zero.
#[inline]
pub fn to_code_value(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * THREE_DL_MAX).round() as u16
}

/// Render a 3D LUT as `.3dl` text.
pub fn to_3dl(lut: &LutData, options: &ExportOptions) -> String {
    let n = lut.size();
    let mut out = String::with_capacity(64 + n * n * n * 15);
    let _ = writeln!(out, "# Generated by {}", options.creator);
    let _ = writeln!(out, "3DMESH");
    let _ = writeln!(out, "Meshes {n} {n} {n}");
    out.push('\n');
    for e in lut.entries() {
        let _ = writeln!(
            out,
            "{} {} {}",
            to_code_value(e.r),
            to_code_value(e.g),
            to_code_value(e.b)
        );
    }
    out
}
