//! Integration tests for the grading pipeline.
//!
//! Exercises statistics, color transfer, adjustments and LUT building
//! across lutgen-core and lutgen-color.

use lutgen_color::{
    build_lut, compute_stats, Adjustments, ColorError, ColorTransfer, GradingSession, LutData,
    MAX_LUT_SIZE,
};
use lutgen_core::{PixelBuffer, Rgb};
use proptest::prelude::*;

// ── Helpers ────────────────────────────────────────────────────

/// Reference whose per-channel transfer from `PixelBuffer::gradient` never
/// leaves [0, 255], so the transform is affine over the whole cube.
fn soft_reference(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::gradient(width, height).map_rgb(|[r, g, b]| [r / 2 + 60, g, b / 2 + 100])
}

fn max_channel_diff(a: &PixelBuffer, b: &PixelBuffer) -> u8 {
    a.pixels()
        .iter()
        .zip(b.pixels())
        .flat_map(|(p, q)| (0..3).map(move |c| p[c].abs_diff(q[c])))
        .max()
        .unwrap_or(0)
}

fn assert_normalized(lut: &LutData) {
    for e in lut.entries() {
        assert!(e.is_finite(), "non-finite entry {:?}", e);
        for v in e.to_array() {
            assert!((0.0..=1.0).contains(&v), "entry out of range {:?}", e);
        }
    }
}

// ── Uniform images ─────────────────────────────────────────────

#[test]
fn uniform_pair_collapses_lattice_to_reference_mean() {
    let original = PixelBuffer::filled(8, 8, [10, 200, 90, 255]);
    let reference = PixelBuffer::filled(8, 8, [128, 64, 255, 255]);

    let session = GradingSession::process(&original, &reference, 2).unwrap();
    let expected = Rgb::new(128.0 / 255.0, 64.0 / 255.0, 1.0);
    for e in session.lut().entries() {
        assert!((e.r - expected.r).abs() < 1e-6);
        assert!((e.g - expected.g).abs() < 1e-6);
        assert!((e.b - expected.b).abs() < 1e-6);
    }

    assert!(session
        .preview()
        .pixels()
        .iter()
        .all(|p| *p == [128, 64, 255, 255]));
}

#[test]
fn flat_original_against_varied_reference_stays_finite() {
    let original = PixelBuffer::filled(16, 16, [90, 90, 90, 255]);
    let reference = PixelBuffer::gradient(16, 16);

    let session = GradingSession::process(&original, &reference, 9).unwrap();
    assert_normalized(session.lut());

    // Offset only: the flat channel lands on the reference mean
    let ref_stats = compute_stats(&reference).unwrap();
    let preview = session.preview();
    let p = preview.pixel(0, 0).unwrap();
    assert_eq!(p[0], ref_stats.r.mean.round() as u8);
}

#[test]
fn empty_reference_is_rejected() {
    let original = PixelBuffer::gradient(4, 4);
    let reference = PixelBuffer::new(0, 0);
    let err = GradingSession::process(&original, &reference, 8).unwrap_err();
    assert!(matches!(err, ColorError::EmptyImage));
}

#[test]
fn oversized_lattice_is_rejected_before_work() {
    let img = PixelBuffer::gradient(4, 4);
    let err = GradingSession::process(&img, &img, MAX_LUT_SIZE + 1).unwrap_err();
    assert!(matches!(err, ColorError::InvalidLatticeSize { .. }));
}

// ── Preview / LUT agreement ────────────────────────────────────

#[test]
fn lut_reproduces_transfer_preview() {
    let original = PixelBuffer::gradient(64, 64);
    let reference = soft_reference(64, 64);

    let session = GradingSession::process(&original, &reference, 33).unwrap();
    let via_lut = session.lut().apply_to_image(&original);
    assert!(max_channel_diff(&via_lut, &session.preview()) <= 1);
}

#[test]
fn lut_tracks_adjusted_preview() {
    let original = PixelBuffer::gradient(64, 64);
    let reference = soft_reference(64, 64);

    let mut session = GradingSession::process(&original, &reference, 32).unwrap();
    let preview = session
        .set_adjustments(Adjustments {
            brightness: 10,
            contrast: 20,
            ..Adjustments::NONE
        })
        .unwrap();

    let via_lut = session.lut().apply_to_image(&original);
    assert!(max_channel_diff(&via_lut, &preview) <= 5);
}

#[test]
fn reset_restores_unadjusted_lut() {
    let original = PixelBuffer::gradient(32, 32);
    let reference = PixelBuffer::test_pattern(32, 8);

    let mut session = GradingSession::process(&original, &reference, 8).unwrap();
    let initial = session.lut().clone();

    session
        .set_adjustments(Adjustments {
            saturation: -50,
            temperature: 30,
            ..Adjustments::NONE
        })
        .unwrap();
    assert_ne!(session.lut(), &initial);

    session.reset_adjustments().unwrap();
    assert_eq!(session.lut(), &initial);
    assert!(session.adjustments().is_identity());
}

#[test]
fn session_lut_matches_free_function() {
    let original = PixelBuffer::test_pattern(40, 10);
    let reference = PixelBuffer::gradient(20, 20);
    let adj = Adjustments {
        vibrance: 40,
        tint: -20,
        ..Adjustments::NONE
    };

    let mut session = GradingSession::process(&original, &reference, 12).unwrap();
    session.set_adjustments(adj).unwrap();

    let direct = build_lut(
        session.original_stats(),
        session.reference_stats(),
        &adj,
        12,
    )
    .unwrap();
    assert_eq!(session.lut(), &direct);
}

#[test]
fn parallel_lattice_matches_pointwise_transform() {
    let original = compute_stats(&PixelBuffer::gradient(30, 20)).unwrap();
    let reference = compute_stats(&PixelBuffer::test_pattern(48, 6)).unwrap();
    let adj = Adjustments {
        brightness: 12,
        contrast: -25,
        saturation: 40,
        temperature: 70,
        tint: -30,
        vibrance: 45,
    };
    let n = 33;
    let lut = build_lut(&original, &reference, &adj, n).unwrap();

    let transfer = ColorTransfer::new(&original, &reference);
    let axis = |i: usize| i as f32 / (n - 1) as f32 * 255.0;
    for (i, entry) in lut.entries().iter().enumerate() {
        let input = Rgb::new(axis(i % n), axis(i / n % n), axis(i / (n * n)));
        let expected = adj.apply_rgb(transfer.apply(input)).map(|v| v / 255.0);
        assert_eq!(*entry, expected, "lattice index {}", i);
    }
}

// ── Properties ─────────────────────────────────────────────────

fn wild_adjustments() -> impl Strategy<Value = Adjustments> {
    let s = -250i32..=250;
    (s.clone(), s.clone(), s.clone(), s.clone(), s.clone(), s).prop_map(
        |(brightness, contrast, saturation, temperature, tint, vibrance)| Adjustments {
            brightness,
            contrast,
            saturation,
            temperature,
            tint,
            vibrance,
        },
    )
}

proptest! {
    #[test]
    fn lut_entries_always_normalized(adj in wild_adjustments(), size in 2usize..10) {
        let original = PixelBuffer::test_pattern(16, 4);
        let reference = PixelBuffer::gradient(8, 8);
        let mut session = GradingSession::process(&original, &reference, size).unwrap();
        session.set_adjustments(adj).unwrap();

        prop_assert_eq!(session.lut().entries().len(), size * size * size);
        for e in session.lut().entries() {
            for v in e.to_array() {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn preview_keeps_dimensions_and_alpha(adj in wild_adjustments()) {
        let original = PixelBuffer::filled(5, 3, [40, 80, 120, 77]);
        let reference = PixelBuffer::gradient(6, 6);
        let mut session = GradingSession::process(&original, &reference, 4).unwrap();
        let preview = session.set_adjustments(adj).unwrap();

        prop_assert_eq!((preview.width(), preview.height()), (5, 3));
        prop_assert!(preview.pixels().iter().all(|p| p[3] == 77));
    }
}
