//! # Circuit Map
//!
//! Track-progress mapping for live vehicle positions on a racing circuit.
//!
//! This library provides:
//! - Cumulative arc-length tables for circuit polylines
//! - Projection of a raw 2D position onto the nearest segment, returning
//!   normalized progress (0-1) around the circuit
//! - Hint-windowed projection to disambiguate hairpins and chicanes where two
//!   distant sections of the track pass close to each other
//! - Progress-to-point sampling (with heading) on a display polyline
//! - Conversion of progress between two polylines of the same circuit
//! - Circular (wrap-around) progress arithmetic
//!
//! ## Features
//!
//! - **`parallel`** - Batch vehicle location with rayon
//! - **`synthetic`** - Seeded synthetic circuit generators for tests and benchmarks
//! - **`cli`** - Debug command-line tool for track definition files
//!
//! ## Quick Start
//!
//! ```rust
//! use circuitmap::{ArcLengthTable, Path, Point, compute_track_progress, map_progress_to_point};
//!
//! let path = Path::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
//! let arc = ArcLengthTable::build(&path);
//!
//! let progress = compute_track_progress(5.0, 0.0, &path, Some(&arc), None);
//! assert!((progress - 0.25).abs() < 1e-12);
//!
//! let point = map_progress_to_point(progress, &path, Some(&arc));
//! assert_eq!(point, Point::new(5.0, 0.0));
//! ```

use geo::{Coord, LineString, algorithm::simplify::Simplify};
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{CircuitMapError, OptionExt, Result};

// Cumulative arc-length tables
pub mod arc_length;
pub use arc_length::{ArcLengthTable, build_arc_lengths};

// Point-to-progress projection (with optional hint window)
pub mod projection;
pub use projection::{
    Projection, ProjectionConfig, compute_track_progress, compute_track_progress_with,
    windowed_segment_indices,
};

// Progress-to-point sampling
pub mod sampling;
pub use sampling::{map_progress_to_point, point_and_tangent_at_progress};

// Progress conversion between two paths of the same circuit
pub mod convert;
pub use convert::{convert_boundaries, convert_progress, convert_progress_with};

// Wrap-around progress arithmetic
pub mod circular;
pub use circular::forward_distance;

// Session-level track geometry (reference + display paths)
pub mod track;
pub use track::{TrackDefinition, TrackGeometry, TrackPair, VehicleSample, VehicleTracker};

// Synthetic circuit generators for testing and benchmarking
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A point in a planar coordinate system.
///
/// Reference and display paths use different coordinate systems; points from
/// one are never compared against the other directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin, returned when sampling an empty path.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_sq_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// Linear interpolation towards `other` by `t`.
    #[inline]
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for Coord {
    fn from(p: Point) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

impl From<Coord> for Point {
    fn from(c: Coord) -> Self {
        Point::new(c.x, c.y)
    }
}

/// Unit direction vector along a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tangent {
    pub dx: f64,
    pub dy: f64,
}

impl Tangent {
    /// Direction used when a segment has zero length.
    pub const DEFAULT: Tangent = Tangent { dx: 1.0, dy: 0.0 };

    /// Normalized direction from `from` to `to`, or [`Tangent::DEFAULT`] if the
    /// two points coincide.
    pub fn between(from: &Point, to: &Point) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len > 0.0 {
            Tangent {
                dx: dx / len,
                dy: dy / len,
            }
        } else {
            Tangent::DEFAULT
        }
    }

    /// Heading angle in radians, measured from the +x axis.
    pub fn heading_radians(&self) -> f64 {
        self.dy.atan2(self.dx)
    }
}

impl Default for Tangent {
    fn default() -> Self {
        Tangent::DEFAULT
    }
}

/// A point on a path together with the path direction at that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointAndTangent {
    pub point: Point,
    pub tangent: Tangent,
}

/// Axis-aligned bounding box of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from points. Returns `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;

        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// An ordered polyline approximating a (conceptually closed) circuit.
///
/// The point buffer is owned and never mutated after construction, so a
/// `Path` can be shared freely between threads handling different vehicles.
/// Paths with 0 or 1 points are valid degenerate inputs for every query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Wrap a point buffer without validation.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a path from `[x, y]` pairs.
    pub fn from_xy(coords: &[[f64; 2]]) -> Self {
        coords.iter().copied().map(Point::from).collect()
    }

    /// Build a path, rejecting non-finite coordinates.
    ///
    /// # Example
    /// ```
    /// use circuitmap::{Path, Point};
    ///
    /// assert!(Path::try_from_points(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).is_ok());
    /// assert!(Path::try_from_points(vec![Point::new(f64::NAN, 0.0)]).is_err());
    /// ```
    pub fn try_from_points(points: Vec<Point>) -> Result<Self> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(CircuitMapError::InvalidCoordinate {
                index,
                x: p.x,
                y: p.y,
            });
        }
        Ok(Self { points })
    }

    /// All points, in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Number of segments (`len - 1`, or 0 for degenerate paths).
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Douglas-Peucker simplification, e.g. to derive a lighter display path.
    ///
    /// Endpoints are always kept. Paths with fewer than 3 points are returned
    /// unchanged.
    pub fn simplify(&self, tolerance: f64) -> Path {
        if self.points.len() < 3 {
            return self.clone();
        }
        let line: LineString = self.points.iter().copied().map(Coord::from).collect();
        let simplified = line.simplify(&tolerance);
        simplified.0.into_iter().map(Point::from).collect()
    }
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        Path::new(points)
    }
}

impl FromIterator<Point> for Path {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Path::new(iter.into_iter().collect())
    }
}
