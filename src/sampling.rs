//! Progress-to-point sampling.
//!
//! The inverse of projection: given progress around a path, find the point at
//! that fraction of the path's arc length (and optionally the direction of
//! travel there). Used to place vehicle markers on the display path.

use crate::arc_length::table_or_build;
use crate::{ArcLengthTable, Path, Point, PointAndTangent, Tangent};

/// Find the adjacent pair `(lo, lo + 1)` with `arc[lo] <= target <= arc[lo + 1]`.
///
/// Targets outside the table clamp to the first or last pair. Requires at
/// least two entries.
pub(crate) fn bracket(arc: &[f64], target: f64) -> (usize, usize) {
    debug_assert!(arc.len() >= 2);
    let mut lo = 0;
    let mut hi = arc.len() - 1;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if arc[mid] <= target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo, hi)
}

/// Clamp progress into `[0, 1]`, treating NaN as the start of the path.
#[inline]
fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Interpolated point and bracketing indices. Requires at least two points.
fn sample(path: &Path, arc: &ArcLengthTable, progress: f64) -> (Point, usize, usize) {
    let points = path.points();
    let lengths = arc.as_slice();
    let target = clamp_progress(progress) * arc.total_length();

    let (lo, hi) = bracket(lengths, target);
    let span = lengths[hi] - lengths[lo];
    let t = if span > 0.0 {
        ((target - lengths[lo]) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };

    (points[lo].lerp(&points[hi], t), lo, hi)
}

/// Point at `progress` along `path`.
///
/// Progress is clamped to `[0, 1]`. An empty path yields the origin and a
/// single-point path yields that point. Pass the path's precomputed table as
/// `arc_lengths`; `None` recomputes it on every call.
///
/// # Example
/// ```
/// use circuitmap::{Path, Point, map_progress_to_point};
///
/// let path = Path::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
/// assert_eq!(map_progress_to_point(0.75, &path, None), Point::new(10.0, 5.0));
/// ```
pub fn map_progress_to_point(
    progress: f64,
    path: &Path,
    arc_lengths: Option<&ArcLengthTable>,
) -> Point {
    match path.points() {
        [] => Point::ORIGIN,
        [only] => *only,
        _ => {
            let table = table_or_build(path, arc_lengths);
            sample(path, &table, progress).0
        }
    }
}

/// Point and unit tangent at `progress` along `path`.
///
/// Returns `None` for paths with fewer than 2 points. The tangent is the
/// direction of the bracketing segment, or [`Tangent::DEFAULT`] when that
/// segment has zero length.
pub fn point_and_tangent_at_progress(
    path: &Path,
    arc_lengths: &ArcLengthTable,
    progress: f64,
) -> Option<PointAndTangent> {
    if path.len() < 2 {
        return None;
    }
    let table = table_or_build(path, Some(arc_lengths));
    let (point, lo, hi) = sample(path, &table, progress);
    let points = path.points();

    Some(PointAndTangent {
        point,
        tangent: Tangent::between(&points[lo], &points[hi]),
    })
}
