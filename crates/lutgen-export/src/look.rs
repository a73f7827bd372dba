//! `.look` writer: a JSON document carrying metadata and the raw lattice.

use chrono::{DateTime, SecondsFormat, Utc};
use lutgen_color::LutData;
use serde::{Deserialize, Serialize};

use crate::error::ExportResult;
use crate::options::ExportOptions;

/// Metadata block of a `.look` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookMetadata {
    pub creator: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub created: String,
    pub description: String,
    /// Always `"3D"`.
    pub format: String,
    pub size: usize,
}

/// A full `.look` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookDocument {
    pub metadata: LookMetadata,
    /// Lattice nested blue, then green, then red; each leaf is `[r, g, b]`.
    pub data: Vec<Vec<Vec<[f32; 3]>>>,
}

impl LookDocument {
    pub fn new(lut: &LutData, options: &ExportOptions, created: DateTime<Utc>) -> Self {
        let n = lut.size();
        let data = lut
            .entries()
            .chunks(n * n)
            .map(|slab| {
                slab.chunks(n)
                    .map(|row| row.iter().map(|e| e.to_array()).collect())
                    .collect()
            })
            .collect();

        Self {
            metadata: LookMetadata {
                creator: options.creator.clone(),
                created: created.to_rfc3339_opts(SecondsFormat::Millis, true),
                description: options.description.clone(),
                format: "3D".into(),
                size: n,
            },
            data,
        }
    }
}

/// Render a 3D LUT as a pretty-printed `.look` JSON document.
pub fn to_look(
    lut: &LutData,
    options: &ExportOptions,
    created: DateTime<Utc>,
) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(&LookDocument::new(
        lut, options, created,
    ))?)
}
