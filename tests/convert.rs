//! Tests for convert module

mod common;

use circuitmap::circular::circular_delta;
use circuitmap::{
    ArcLengthTable, Path, ProjectionConfig, convert_boundaries, convert_progress,
    map_progress_to_point,
};
use common::{approx_eq, hairpin, l_path, square};

#[test]
fn test_same_path_is_identity() {
    let path = l_path();
    let arc = ArcLengthTable::build(&path);
    for i in 0..=20 {
        let g = i as f64 / 20.0;
        let converted = convert_progress(g, &path, &arc, &path, &arc, None);
        assert!(approx_eq(converted, g, 1e-9), "g = {g}, got {converted}");
    }
}

#[test]
fn test_different_density_same_shape() {
    let coarse = square(2);
    let fine = square(25);
    let (ca, fa) = (ArcLengthTable::build(&coarse), ArcLengthTable::build(&fine));

    for i in 1..40 {
        let g = i as f64 / 40.0;
        let converted = convert_progress(g, &coarse, &ca, &fine, &fa, Some(g));
        assert!(approx_eq(converted, g, 1e-9), "g = {g}, got {converted}");
    }
}

#[test]
fn test_conversion_lands_on_same_physical_point() {
    // Display path starts its lap at a different corner of the same square
    let reference = square(10);
    let display = Path::from_xy(&[
        [100.0, 0.0],
        [100.0, 100.0],
        [0.0, 100.0],
        [0.0, 0.0],
        [100.0, 0.0],
    ]);
    let (ra, da) = (ArcLengthTable::build(&reference), ArcLengthTable::build(&display));

    let converted = convert_progress(0.6, &reference, &ra, &display, &da, None);
    assert!(approx_eq(converted, 0.35, 1e-9), "got {converted}");

    let physical = map_progress_to_point(0.6, &reference, Some(&ra));
    let on_display = map_progress_to_point(converted, &display, Some(&da));
    assert!(physical.distance_to(&on_display) < 1e-9);
}

#[test]
fn test_degenerate_target_returns_zero() {
    let source = l_path();
    let sa = ArcLengthTable::build(&source);
    let target = Path::from_xy(&[[1.0, 1.0]]);
    let ta = ArcLengthTable::build(&target);
    assert_eq!(convert_progress(0.5, &source, &sa, &target, &ta, None), 0.0);
}

#[test]
fn test_hint_forwarded_to_target_search() {
    // Source path: only the outbound straight of the hairpin, so progress on it
    // is unambiguous. The point 5 units off it at x = 250 is nearer the
    // return straight of the full circuit.
    let source = Path::from_xy(&[[0.0, 5.0], [500.0, 5.0]]);
    let sa = ArcLengthTable::build(&source);
    let target = hairpin();
    let ta = ArcLengthTable::build(&target);
    let outbound = 250.0 / ta.total_length();

    let unhinted = convert_progress(0.5, &source, &sa, &target, &ta, None);
    assert!(unhinted > 0.4);

    let hinted = convert_progress(0.5, &source, &sa, &target, &ta, Some(outbound));
    assert!(approx_eq(hinted, outbound, 1e-9), "got {hinted}");
}

#[test]
fn test_convert_boundaries_matches_pointwise() {
    let reference = square(10);
    let display = square(4);
    let (ra, da) = (ArcLengthTable::build(&reference), ArcLengthTable::build(&display));
    let boundaries = [0.0, 0.3, 0.55, 0.8];

    let converted = convert_boundaries(
        &ProjectionConfig::default(),
        &boundaries,
        &reference,
        &ra,
        &display,
        &da,
    );

    assert_eq!(converted.len(), boundaries.len());
    for (b, c) in boundaries.iter().zip(&converted) {
        // 0.0 and 1.0 are the same place on a closed circuit
        assert!(circular_delta(*b, *c).abs() < 1e-9, "{b} -> {c}");
    }
}
