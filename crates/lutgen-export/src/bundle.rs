//! Single-format export and the downloadable zip bundle.

use std::fmt;
use std::io::{Cursor, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Utc};
use lutgen_color::LutData;
use serde::{Deserialize, Serialize};
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::cube::to_cube;
use crate::error::{ExportError, ExportResult};
use crate::look::to_look;
use crate::options::ExportOptions;
use crate::three_dl::to_3dl;

/// Name of the plaintext readme inside the bundle.
pub const README_NAME: &str = "README.txt";

/// Default file name offered for the bundle.
pub const BUNDLE_FILE_NAME: &str = "custom-lut-pack.zip";

/// A LUT file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Cube,
    ThreeDl,
    Look,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Cube, Self::ThreeDl, Self::Look];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::ThreeDl => "3dl",
            Self::Look => "look",
        }
    }

    /// File name used inside the bundle.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Cube => "lut.cube",
            Self::ThreeDl => "lut.3dl",
            Self::Look => "lut.look",
        }
    }

    /// One-line description used in the readme.
    pub fn description(self) -> &'static str {
        match self {
            Self::Cube => "Industry standard format (DaVinci Resolve, Adobe products)",
            Self::ThreeDl => "High-end color grading format",
            Self::Look => "Advanced format with metadata",
        }
    }

    /// Render `lut` in this format.
    pub fn render(
        self,
        lut: &LutData,
        options: &ExportOptions,
        created: DateTime<Utc>,
    ) -> ExportResult<String> {
        match self {
            Self::Cube => Ok(to_cube(lut, options)),
            Self::ThreeDl => Ok(to_3dl(lut, options)),
            Self::Look => to_look(lut, options, created),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ext = s.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extension() == ext)
            .ok_or_else(|| ExportError::Parse(format!("unknown LUT format: {}", s)))
    }
}

/// Plaintext readme describing the bundled files.
pub fn readme(options: &ExportOptions, size: usize, created: DateTime<Utc>) -> String {
    let mut out = format!("{} - Custom Color Grading LUT\n\n", options.creator);
    out.push_str("This package contains your custom LUT in multiple formats:\n\n");
    for format in ExportFormat::ALL {
        out.push_str(&format!("- {}: {}\n", format.file_name(), format.description()));
    }
    out.push_str(&format!("\nLattice size: {size}x{size}x{size}\n"));
    out.push_str(&format!(
        "Generated on: {}\n",
        created.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out
}

/// Every export representation of one LUT.
#[derive(Debug, Clone)]
pub struct ExportBundle<'a> {
    lut: &'a LutData,
    options: ExportOptions,
    created: DateTime<Utc>,
}

impl<'a> ExportBundle<'a> {
    /// Bundle stamped with the current time.
    pub fn new(lut: &'a LutData, options: ExportOptions) -> Self {
        Self::with_timestamp(lut, options, Utc::now())
    }

    /// Bundle with an explicit generation time.
    pub fn with_timestamp(lut: &'a LutData, options: ExportOptions, created: DateTime<Utc>) -> Self {
        Self {
            lut,
            options,
            created,
        }
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Render a single format.
    pub fn render(&self, format: ExportFormat) -> ExportResult<String> {
        format.render(self.lut, &self.options, self.created)
    }

    /// `(file name, contents)` for every file in the bundle.
    pub fn files(&self) -> ExportResult<Vec<(&'static str, String)>> {
        let mut files = Vec::with_capacity(ExportFormat::ALL.len() + 1);
        for format in ExportFormat::ALL {
            files.push((format.file_name(), self.render(format)?));
        }
        files.push((
            README_NAME,
            readme(&self.options, self.lut.size(), self.created),
        ));
        Ok(files)
    }

    fn zip_options(&self) -> SimpleFileOptions {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let c = self.created;
        match zip::DateTime::from_date_and_time(
            c.year().clamp(1980, 2107) as u16,
            c.month() as u8,
            c.day() as u8,
            c.hour() as u8,
            c.minute() as u8,
            c.second() as u8,
        ) {
            Ok(stamp) => options.last_modified_time(stamp),
            Err(_) => options,
        }
    }

    /// Write all files into an in-memory zip archive.
    pub fn to_zip(&self) -> ExportResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in self.files()? {
            zip.start_file(name, self.zip_options())?;
            zip.write_all(contents.as_bytes())?;
        }
        let bytes = zip.finish()?.into_inner();
        info!(
            size = self.lut.size(),
            bytes = bytes.len(),
            "LUT bundle created"
        );
        Ok(bytes)
    }

    /// Write the zip archive to `path`.
    pub fn write_zip(&self, path: &Path) -> ExportResult<()> {
        let bytes = self.to_zip()?;
        std::fs::write(path, bytes)?;
        info!(path = %path.display(), "LUT bundle written");
        Ok(())
    }
}
