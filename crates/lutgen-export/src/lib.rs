//! lutgen Export - LUT file formats and bundling.
//!
//! Writers for `.cube`, `.3dl` and `.look`, a `.cube` reader, and the zip
//! bundle that packages all three with a readme.

pub mod bundle;
pub mod cube;
pub mod error;
pub mod look;
pub mod options;
pub mod three_dl;

pub use bundle::{readme, ExportBundle, ExportFormat, BUNDLE_FILE_NAME, README_NAME};
pub use cube::{parse_cube, to_cube};
pub use error::{ExportError, ExportResult};
pub use look::{to_look, LookDocument, LookMetadata};
pub use options::ExportOptions;
pub use three_dl::to_3dl;
