//! Integration tests for exporting a graded session.
//!
//! Exercises lutgen-color sessions through every lutgen-export writer and
//! the zip bundle.

use std::io::{Cursor, Read};

use lutgen_color::{Adjustments, GradingSession, LutData};
use lutgen_core::{PixelBuffer, Rgb};
use lutgen_export::{
    parse_cube, to_3dl, ExportBundle, ExportFormat, ExportOptions, LookDocument, README_NAME,
};
use zip::ZipArchive;

// ── Helpers ────────────────────────────────────────────────────

fn graded_session() -> GradingSession {
    let original = PixelBuffer::gradient(48, 48);
    let reference = PixelBuffer::test_pattern(64, 16);
    let mut session = GradingSession::process(&original, &reference, 9).unwrap();
    session
        .set_adjustments(Adjustments {
            contrast: 15,
            vibrance: 25,
            ..Adjustments::NONE
        })
        .unwrap();
    session
}

fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut text = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    text
}

// ── Bundle ─────────────────────────────────────────────────────

#[test]
fn bundle_holds_all_formats_and_readme() {
    let session = graded_session();
    let bundle = ExportBundle::new(session.lut(), ExportOptions::default());
    let mut archive = ZipArchive::new(Cursor::new(bundle.to_zip().unwrap())).unwrap();

    assert_eq!(archive.len(), 4);
    for format in ExportFormat::ALL {
        let text = read_entry(&mut archive, format.file_name());
        assert_eq!(text, bundle.render(format).unwrap());
    }
    let readme = read_entry(&mut archive, README_NAME);
    assert!(readme.contains("Lattice size: 9x9x9"));
}

#[test]
fn bundled_cube_parses_back_to_session_lut() {
    let session = graded_session();
    let bundle = ExportBundle::new(session.lut(), ExportOptions::default());
    let mut archive = ZipArchive::new(Cursor::new(bundle.to_zip().unwrap())).unwrap();

    let parsed = parse_cube(&read_entry(&mut archive, "lut.cube")).unwrap();
    assert_eq!(parsed.size(), session.lut().size());
    for (a, b) in parsed.entries().iter().zip(session.lut().entries()) {
        assert!((a.r - b.r).abs() < 1e-6);
        assert!((a.g - b.g).abs() < 1e-6);
        assert!((a.b - b.b).abs() < 1e-6);
    }
}

#[test]
fn parsed_cube_grades_like_the_session() {
    let session = graded_session();
    let text = ExportBundle::new(session.lut(), ExportOptions::default())
        .render(ExportFormat::Cube)
        .unwrap();
    let parsed = parse_cube(&text).unwrap();

    let image = PixelBuffer::gradient(48, 48);
    let a = parsed.apply_to_image(&image);
    let b = session.lut().apply_to_image(&image);
    for (p, q) in a.pixels().iter().zip(b.pixels()) {
        for c in 0..3 {
            assert!(p[c].abs_diff(q[c]) <= 1);
        }
    }
}

#[test]
fn look_data_mirrors_lattice() {
    let session = graded_session();
    let bundle = ExportBundle::new(session.lut(), ExportOptions::default());
    let doc: LookDocument =
        serde_json::from_str(&bundle.render(ExportFormat::Look).unwrap()).unwrap();

    let n = session.lut().size();
    assert_eq!(doc.metadata.size, n);
    for b in 0..n {
        for g in 0..n {
            for r in 0..n {
                let e = session.lut().get(r, g, b).unwrap();
                assert_eq!(doc.data[b][g][r], e.to_array());
            }
        }
    }
}

// ── .3dl ───────────────────────────────────────────────────────

#[test]
fn three_dl_scales_to_ten_bit() {
    let mut entries = LutData::identity(2).unwrap().entries().to_vec();
    entries[1] = Rgb::new(1.0, 0.0, 0.5);
    let lut = LutData::from_entries(2, entries).unwrap();

    let text = to_3dl(&lut, &ExportOptions::default());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "3DMESH");
    assert_eq!(lines[2], "Meshes 2 2 2");
    assert_eq!(lines[5], "1023 0 512");
    assert_eq!(lines.len(), 4 + 8);
}
