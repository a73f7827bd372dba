//! Metadata written into exported files.

use serde::{Deserialize, Serialize};

/// Creator name stamped into file headers by default.
pub const DEFAULT_CREATOR: &str = "LUT Generator Pro";

/// Description stored in `.look` metadata by default.
pub const DEFAULT_DESCRIPTION: &str = "Custom color grading LUT";

/// Export metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Shown in the `# Generated by` header line and `.look` metadata.
    pub creator: String,
    pub description: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            creator: DEFAULT_CREATOR.into(),
            description: DEFAULT_DESCRIPTION.into(),
        }
    }
}
