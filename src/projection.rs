//! Point-to-progress projection.
//!
//! Maps a raw 2D position to normalized progress around a path by finding the
//! nearest segment (point-to-segment, not point-to-line) and measuring the
//! arc length to the projected point.
//!
//! Without a hint the whole path is scanned. With a hint (typically the
//! previous tick's progress) only a circular window of segments around the
//! hint is scanned, which keeps a vehicle on the correct side of a hairpin
//! when two distant sections of the circuit run close together.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::arc_length::table_or_build;
use crate::{ArcLengthTable, Path, Point};

/// Tuning for the hint window.
///
/// The defaults were tuned empirically against real circuit polylines; the
/// right values depend on polyline density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Minimum number of segments scanned around a hint.
    /// Default: 10
    pub min_window_segments: usize,

    /// Fraction of the path's segments scanned around a hint.
    /// Default: 0.15
    pub window_fraction: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            min_window_segments: 10,
            window_fraction: 0.15,
        }
    }
}

impl ProjectionConfig {
    /// Window size for a path with `segment_count` segments:
    /// `max(min_window_segments, ceil(window_fraction * segment_count))`,
    /// at least one segment and never more than the path has.
    pub fn window_size(&self, segment_count: usize) -> usize {
        let proportional = (self.window_fraction * segment_count as f64).ceil();
        let proportional = if proportional.is_finite() && proportional > 0.0 {
            proportional as usize
        } else {
            0
        };
        self.min_window_segments
            .max(proportional)
            .max(1)
            .min(segment_count)
    }

    /// A usable config has a finite `window_fraction` in `[0, 1]` and asks
    /// for a non-empty window.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.window_fraction)
            && (self.min_window_segments > 0 || self.window_fraction > 0.0)
    }
}

/// Projection of a point onto a single segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Parameter along the segment, in `[0, 1]`.
    pub t: f64,
    /// Squared distance from the query point to the projected point.
    pub distance_sq: f64,
    /// The projected point.
    pub point: Point,
}

/// Project `p` onto the segment `a -> b`, clamping to the segment's ends.
///
/// A zero-length segment projects everything onto `a` with `t = 0`.
#[inline]
pub fn project_onto_segment(p: &Point, a: &Point, b: &Point) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let point = a.lerp(b, t);
    SegmentProjection {
        t,
        distance_sq: p.distance_sq_to(&point),
        point,
    }
}

/// Full result of projecting a point onto a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Index of the nearest segment (`points[i] -> points[i + 1]`).
    pub segment_index: usize,
    /// Parameter along that segment, in `[0, 1]`.
    pub t: f64,
    /// Squared distance from the query point to the path.
    pub distance_sq: f64,
    /// Nearest point on the path.
    pub point: Point,
    /// Normalized arc-length progress of `point`, in `[0, 1]`.
    pub progress: f64,
}

/// Segment indices in a circular window centered on `hint_index`.
///
/// Yields `min(window_size, segment_count)` distinct indices, starting
/// `window_size / 2` segments before the hint and wrapping modulo
/// `segment_count`, so windows near the start of the path reach back over the
/// end.
///
/// # Example
/// ```
/// use circuitmap::windowed_segment_indices;
///
/// let idx: Vec<usize> = windowed_segment_indices(1, 4, 10).collect();
/// assert_eq!(idx, vec![9, 0, 1, 2]);
/// ```
pub fn windowed_segment_indices(
    hint_index: usize,
    window_size: usize,
    segment_count: usize,
) -> impl Iterator<Item = usize> {
    let window = window_size.min(segment_count);
    let start = if segment_count == 0 {
        0
    } else {
        let back = (window / 2) % segment_count;
        (hint_index % segment_count + segment_count - back) % segment_count
    };
    (0..window).map(move |k| (start + k) % segment_count)
}

/// Scan the given segments and keep the first strict minimum.
fn nearest_segment<I>(
    query: &Point,
    points: &[Point],
    segments: I,
) -> Option<(usize, SegmentProjection)>
where
    I: Iterator<Item = usize>,
{
    let mut best: Option<(usize, SegmentProjection)> = None;
    for i in segments {
        let proj = project_onto_segment(query, &points[i], &points[i + 1]);
        match best {
            Some((_, b)) if proj.distance_sq >= b.distance_sq => {}
            _ => best = Some((i, proj)),
        }
    }
    best
}

/// Project a point onto a path, returning the nearest segment and progress.
///
/// Returns `None` only for paths with fewer than 2 points. `arc_lengths`
/// should be the table for `path`; a table of the wrong length is rebuilt.
pub fn project(
    query: &Point,
    path: &Path,
    arc_lengths: &ArcLengthTable,
    hint_progress: Option<f64>,
    config: &ProjectionConfig,
) -> Option<Projection> {
    let points = path.points();
    let segment_count = path.segment_count();
    if segment_count == 0 {
        return None;
    }

    let arc_lengths = table_or_build(path, Some(arc_lengths));
    let total = arc_lengths.total_length();
    let hint = hint_progress.filter(|h| h.is_finite());

    let (segment_index, seg) = match hint {
        Some(h) => {
            let hint_index = arc_lengths.locate(h.clamp(0.0, 1.0) * total);
            let window = config.window_size(segment_count);
            trace!(
                "[Projection] Hinted scan: hint {:.4} -> segment {}, window {}",
                h, hint_index, window
            );
            nearest_segment(
                query,
                points,
                windowed_segment_indices(hint_index, window, segment_count),
            )
        }
        None => nearest_segment(query, points, 0..segment_count),
    }?;

    let progress = if total > 0.0 {
        let along = arc_lengths.as_slice()[segment_index]
            + seg.t * arc_lengths.segment_length(segment_index);
        (along / total).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some(Projection {
        segment_index,
        t: seg.t,
        distance_sq: seg.distance_sq,
        point: seg.point,
        progress: if progress.is_nan() { 0.0 } else { progress },
    })
}

/// Normalized progress of `(x, y)` around `path`, using the default window.
///
/// Pass the path's precomputed table as `arc_lengths`; `None` recomputes it on
/// every call and is only meant for one-off queries. Paths with fewer than 2
/// points return `0.0`.
///
/// # Example
/// ```
/// use circuitmap::{ArcLengthTable, Path, compute_track_progress};
///
/// let path = Path::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
/// let arc = ArcLengthTable::build(&path);
/// assert_eq!(compute_track_progress(5.0, 0.0, &path, Some(&arc), None), 0.25);
/// ```
pub fn compute_track_progress(
    x: f64,
    y: f64,
    path: &Path,
    arc_lengths: Option<&ArcLengthTable>,
    hint_progress: Option<f64>,
) -> f64 {
    compute_track_progress_with(
        &ProjectionConfig::default(),
        x,
        y,
        path,
        arc_lengths,
        hint_progress,
    )
}

/// [`compute_track_progress`] with an explicit window configuration.
pub fn compute_track_progress_with(
    config: &ProjectionConfig,
    x: f64,
    y: f64,
    path: &Path,
    arc_lengths: Option<&ArcLengthTable>,
    hint_progress: Option<f64>,
) -> f64 {
    if path.len() < 2 {
        return 0.0;
    }
    let table = table_or_build(path, arc_lengths);
    project(&Point::new(x, y), path, &table, hint_progress, config)
        .map(|p| p.progress)
        .unwrap_or(0.0)
}
