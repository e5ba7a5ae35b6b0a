//! Cumulative arc-length tables.
//!
//! Every projection and sampling query needs the running distance along a
//! path. The table is built once per path when a track is loaded and reused
//! for every subsequent query.

use std::borrow::Cow;

use log::{debug, trace};

use crate::{Path, Point};

/// Calculate cumulative distances along a polyline.
///
/// Returns a vector where `dist[i]` is the distance from the first point to
/// point `i`. Paths with 0 or 1 points yield `[0.0]`.
pub fn build_arc_lengths(points: &[Point]) -> Vec<f64> {
    if points.len() <= 1 {
        return vec![0.0];
    }

    let mut distances = Vec::with_capacity(points.len());
    distances.push(0.0);

    let mut total = 0.0;
    for w in points.windows(2) {
        total += w[0].distance_to(&w[1]);
        distances.push(total);
    }

    distances
}

/// Immutable cumulative arc-length table for one [`Path`].
///
/// Entry 0 is `0.0`, entries are non-decreasing and the last entry is the
/// total path length. The buffer is never exposed mutably.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    /// Build the table for a path.
    pub fn build(path: &Path) -> Self {
        let lengths = build_arc_lengths(path.points());
        debug!(
            "[ArcLength] Built table: {} points, total length {:.3}",
            path.len(),
            lengths.last().copied().unwrap_or(0.0)
        );
        Self { lengths }
    }

    /// Slow path used when a query is made without a precomputed table.
    pub(crate) fn build_fallback(path: &Path) -> Self {
        trace!(
            "[ArcLength] Recomputing table for {} points on query path",
            path.len()
        );
        Self {
            lengths: build_arc_lengths(path.points()),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Never true for tables built by [`ArcLengthTable::build`], which gives
    /// even an empty path the single entry `0.0`.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Total path length (last entry).
    pub fn total_length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Number of segments covered by the table.
    pub fn segment_count(&self) -> usize {
        self.lengths.len().saturating_sub(1)
    }

    /// Length of segment `i` (from point `i` to `i + 1`), or 0 when out of range.
    pub fn segment_length(&self, i: usize) -> f64 {
        match (self.lengths.get(i), self.lengths.get(i + 1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    /// Index of the segment containing arc-length `distance`.
    ///
    /// Returns the greatest segment index whose start distance is `<= distance`,
    /// clamped to `[0, segment_count - 1]`. Distances before the start map to
    /// segment 0 and distances past the end map to the last segment.
    pub fn locate(&self, distance: f64) -> usize {
        let segments = self.segment_count();
        if segments == 0 {
            return 0;
        }
        let at_or_before = self.lengths.partition_point(|&d| d <= distance);
        at_or_before.saturating_sub(1).min(segments - 1)
    }
}

impl AsRef<[f64]> for ArcLengthTable {
    fn as_ref(&self) -> &[f64] {
        &self.lengths
    }
}

/// Borrow the caller's table, or build one on the slow path.
///
/// A table whose length does not match the path belongs to some other path
/// and is rebuilt rather than trusted.
pub(crate) fn table_or_build<'a>(
    path: &Path,
    arc_lengths: Option<&'a ArcLengthTable>,
) -> Cow<'a, ArcLengthTable> {
    match arc_lengths {
        Some(table) if table.len() == path.len().max(1) => Cow::Borrowed(table),
        _ => Cow::Owned(ArcLengthTable::build_fallback(path)),
    }
}
