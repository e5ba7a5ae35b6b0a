//! Tests for arc_length module

mod common;

use circuitmap::{ArcLengthTable, Path, Point, build_arc_lengths};
use common::{approx_eq, hairpin, l_path, square};

#[test]
fn test_l_path_arc_lengths() {
    assert_eq!(build_arc_lengths(l_path().points()), vec![0.0, 10.0, 20.0]);
}

#[test]
fn test_degenerate_paths_yield_single_zero() {
    assert_eq!(build_arc_lengths(&[]), vec![0.0]);
    assert_eq!(build_arc_lengths(&[Point::new(3.0, 4.0)]), vec![0.0]);

    let table = ArcLengthTable::build(&Path::default());
    assert_eq!(table.as_slice(), &[0.0]);
    assert_eq!(table.total_length(), 0.0);
}

#[test]
fn test_monotonic_and_total_matches_segment_sum() {
    for path in [square(10), hairpin(), l_path()] {
        let table = ArcLengthTable::build(&path);
        let lengths = table.as_slice();

        assert_eq!(lengths.len(), path.len());
        assert_eq!(lengths[0], 0.0);
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));

        let segment_sum: f64 = path
            .points()
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum();
        assert!(approx_eq(table.total_length(), segment_sum, 1e-9));
    }
}

#[test]
fn test_zero_length_segments_keep_table_flat() {
    let path = Path::from_xy(&[[0.0, 0.0], [0.0, 0.0], [3.0, 4.0], [3.0, 4.0]]);
    let table = ArcLengthTable::build(&path);
    assert_eq!(table.as_slice(), &[0.0, 0.0, 5.0, 5.0]);
    assert_eq!(table.segment_length(0), 0.0);
    assert_eq!(table.segment_length(1), 5.0);
    assert_eq!(table.segment_length(7), 0.0);
}

#[test]
fn test_build_is_deterministic() {
    let path = hairpin();
    assert_eq!(ArcLengthTable::build(&path), ArcLengthTable::build(&path));
    assert_eq!(
        build_arc_lengths(path.points()),
        build_arc_lengths(path.points())
    );
}

#[test]
fn test_square_total_length() {
    let table = ArcLengthTable::build(&square(10));
    assert_eq!(table.segment_count(), 40);
    assert!(approx_eq(table.total_length(), 400.0, 1e-9));
}
