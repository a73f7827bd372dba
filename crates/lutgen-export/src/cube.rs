//! Adobe/Resolve `.cube` writer and reader.
//!
//! Rows are written blue-outer, green-middle, red-inner with six decimals,
//! which is the order every `.cube` consumer expects.

use std::fmt::Write as _;

use lutgen_color::LutData;
use lutgen_core::Rgb;

use crate::error::{ExportError, ExportResult};
use crate::options::ExportOptions;

/// Render a 3D LUT as `.cube` text.
pub fn to_cube(lut: &LutData, options: &ExportOptions) -> String {
    let n = lut.size();
    // ~27 bytes per row
    let mut out = String::with_capacity(64 + n * n * n * 27);
    let _ = writeln!(out, "# Generated by {}", options.creator);
    let _ = writeln!(out, "LUT_3D_SIZE {}", n);
    out.push('\n');
    for e in lut.entries() {
        let _ = writeln!(out, "{:.6} {:.6} {:.6}", e.r, e.g, e.b);
    }
    out
}

fn parse_triple(rest: &str, what: &str) -> ExportResult<[f32; 3]> {
    let vals: Vec<f32> = rest
        .split_whitespace()
        .map(|s| s.parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| ExportError::Parse(format!("bad {}: {}", what, e)))?;
    if vals.len() != 3 {
        return Err(ExportError::Parse(format!(
            "{} needs 3 values, got {}",
            what,
            vals.len()
        )));
    }
    Ok([vals[0], vals[1], vals[2]])
}

/// Parse a `.cube` file containing a 3D LUT.
///
/// Comments, `TITLE` and blank lines are skipped. `DOMAIN_MIN`/`DOMAIN_MAX`
/// are accepted only with the default [0, 1] domain since [`LutData`] has no
/// notion of a custom input range.
pub fn parse_cube(content: &str) -> ExportResult<LutData> {
    let mut size = None;
    let mut data = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("TITLE") {
            continue;
        }
        if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
            size = Some(
                rest.trim()
                    .parse::<usize>()
                    .map_err(|e| ExportError::Parse(format!("bad LUT_3D_SIZE: {}", e)))?,
            );
            continue;
        }
        if let Some(rest) = line.strip_prefix("DOMAIN_MIN") {
            if parse_triple(rest, "DOMAIN_MIN")? != [0.0; 3] {
                return Err(ExportError::InvalidLut(
                    "only the default DOMAIN_MIN 0 0 0 is supported".into(),
                ));
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix("DOMAIN_MAX") {
            if parse_triple(rest, "DOMAIN_MAX")? != [1.0; 3] {
                return Err(ExportError::InvalidLut(
                    "only the default DOMAIN_MAX 1 1 1 is supported".into(),
                ));
            }
            continue;
        }
        if line.starts_with("LUT_1D_SIZE") {
            return Err(ExportError::InvalidLut("expected 3D LUT, got 1D".into()));
        }

        let row = parse_triple(line, &format!("row on line {}", line_no + 1))?;
        data.push(Rgb::from_array(row));
    }

    let size = size.ok_or_else(|| ExportError::InvalidLut("missing LUT_3D_SIZE".into()))?;
    Ok(LutData::from_entries(size, data)?)
}
