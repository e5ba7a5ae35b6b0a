//! Session-level track geometry.
//!
//! A track is loaded once per session as two polylines of the same circuit:
//! the reference path (live positions are measured against it) and the
//! display path (markers are drawn on it). Arc-length tables are built here,
//! once, and every per-tick query borrows them.
//!
//! Everything in this module is immutable after construction except
//! [`VehicleTracker`], which carries one vehicle's previous progress between
//! ticks. A [`TrackPair`] can be shared across threads behind an `Arc`.

use std::fs;
use std::sync::Arc;

use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::circular::{is_between, wrap_progress};
use crate::error::{CircuitMapError, OptionExt, Result};
use crate::projection::project;
use crate::sampling::point_and_tangent_at_progress;
use crate::{
    ArcLengthTable, Path, Point, PointAndTangent, ProjectionConfig, Tangent, convert_boundaries,
    map_progress_to_point,
};

/// A path bundled with its arc-length table.
#[derive(Debug, Clone)]
pub struct TrackGeometry {
    path: Path,
    arc_lengths: ArcLengthTable,
}

impl TrackGeometry {
    /// Build the arc-length table for `path`.
    pub fn new(path: Path) -> Self {
        let arc_lengths = ArcLengthTable::build(&path);
        Self { path, arc_lengths }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn arc_lengths(&self) -> &ArcLengthTable {
        &self.arc_lengths
    }

    pub fn total_length(&self) -> f64 {
        self.arc_lengths.total_length()
    }

    /// Progress of `(x, y)` on this path. Degenerate paths yield `0.0`.
    pub fn progress_at(
        &self,
        x: f64,
        y: f64,
        hint_progress: Option<f64>,
        config: &ProjectionConfig,
    ) -> f64 {
        project(
            &Point::new(x, y),
            &self.path,
            &self.arc_lengths,
            hint_progress,
            config,
        )
        .map(|p| p.progress)
        .unwrap_or(0.0)
    }

    pub fn point_at(&self, progress: f64) -> Point {
        map_progress_to_point(progress, &self.path, Some(&self.arc_lengths))
    }

    pub fn point_and_tangent_at(&self, progress: f64) -> Option<PointAndTangent> {
        point_and_tangent_at_progress(&self.path, &self.arc_lengths, progress)
    }
}

/// Where one vehicle is on the circuit for one telemetry tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleSample {
    /// Progress on the reference path, in `[0, 1]`.
    pub progress: f64,
    /// Index of the sector containing `progress`, if the track has sectors.
    pub sector: Option<usize>,
    /// Marker position on the display path.
    pub point: Point,
    /// Direction of travel on the display path.
    pub tangent: Tangent,
}

/// Reference and display geometry for one circuit.
#[derive(Debug, Clone)]
pub struct TrackPair {
    name: String,
    reference: TrackGeometry,
    display: TrackGeometry,
    /// Sector boundaries in reference-path progress, ascending.
    sectors: Vec<f64>,
    /// The same boundaries expressed on the display path.
    display_sectors: Vec<f64>,
    config: ProjectionConfig,
}

impl TrackPair {
    /// Build both arc-length tables and convert sector boundaries onto the
    /// display path.
    ///
    /// Boundaries are wrapped into `[0, 1)`, sorted and deduplicated, so `1.0`
    /// merges with `0.0`. They are not otherwise validated (see
    /// [`TrackDefinition::into_pair`] for the validating route).
    pub fn new(
        name: impl Into<String>,
        reference: Path,
        display: Path,
        mut sectors: Vec<f64>,
        config: ProjectionConfig,
    ) -> Self {
        let name = name.into();
        let reference = TrackGeometry::new(reference);
        let display = TrackGeometry::new(display);

        for boundary in sectors.iter_mut() {
            *boundary = wrap_progress(*boundary);
        }
        sectors.sort_by(f64::total_cmp);
        sectors.dedup();

        // The start/finish boundary can land on 1.0 of a closed display path
        let display_sectors = convert_boundaries(
            &config,
            &sectors,
            reference.path(),
            reference.arc_lengths(),
            display.path(),
            display.arc_lengths(),
        )
        .into_iter()
        .map(wrap_progress)
        .collect();

        debug!(
            "[Track] Loaded '{}': reference {} pts ({:.1}), display {} pts ({:.1}), {} sectors",
            name,
            reference.path().len(),
            reference.total_length(),
            display.path().len(),
            display.total_length(),
            sectors.len()
        );

        Self {
            name,
            reference,
            display,
            sectors,
            display_sectors,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &TrackGeometry {
        &self.reference
    }

    pub fn display(&self) -> &TrackGeometry {
        &self.display
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Sector boundaries in reference-path progress.
    pub fn sectors(&self) -> &[f64] {
        &self.sectors
    }

    /// Sector boundaries in display-path progress, for drawing sector markers.
    /// Index `i` corresponds to `sectors()[i]`; every value is in `[0, 1)`.
    pub fn display_sectors(&self) -> &[f64] {
        &self.display_sectors
    }

    /// Locate a vehicle from a raw reference-space position.
    ///
    /// `hint_progress` should be the vehicle's progress from the previous
    /// tick when known.
    pub fn locate(&self, x: f64, y: f64, hint_progress: Option<f64>) -> VehicleSample {
        let progress = self.reference.progress_at(x, y, hint_progress, &self.config);
        let (point, tangent) = match self.display.point_and_tangent_at(progress) {
            Some(pt) => (pt.point, pt.tangent),
            None => (self.display.point_at(progress), Tangent::DEFAULT),
        };

        VehicleSample {
            progress,
            sector: sector_of(progress, &self.sectors),
            point,
            tangent,
        }
    }

    /// Locate many vehicles at once. Each query is `(x, y, hint_progress)`.
    pub fn locate_many(&self, queries: &[(f64, f64, Option<f64>)]) -> Vec<VehicleSample> {
        #[cfg(feature = "parallel")]
        let samples: Vec<VehicleSample> = queries
            .par_iter()
            .map(|&(x, y, hint)| self.locate(x, y, hint))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let samples: Vec<VehicleSample> = queries
            .iter()
            .map(|&(x, y, hint)| self.locate(x, y, hint))
            .collect();

        samples
    }
}

/// Index of the sector containing `progress`.
///
/// `boundaries` must be ascending. Sector `i` spans `[boundaries[i],
/// boundaries[i + 1])`; the last sector wraps across the start/finish line
/// back to `boundaries[0]`. Boundaries that wrap onto the same place (`0.0`
/// and `1.0`) leave an empty sector; when every sector is empty the whole lap
/// is sector 0. Returns `None` when there are no boundaries.
pub fn sector_of(progress: f64, boundaries: &[f64]) -> Option<usize> {
    match boundaries.len() {
        0 => None,
        1 => Some(0),
        n => (0..n)
            .find(|&i| is_between(boundaries[i], boundaries[(i + 1) % n], progress))
            .or(Some(0)),
    }
}

/// Per-vehicle continuity between ticks.
///
/// Feeds each tick's progress back as the next tick's hint so projection
/// stays on the section of the circuit the vehicle is actually driving.
#[derive(Debug, Clone)]
pub struct VehicleTracker {
    track: Arc<TrackPair>,
    last_progress: Option<f64>,
}

impl VehicleTracker {
    pub fn new(track: Arc<TrackPair>) -> Self {
        Self {
            track,
            last_progress: None,
        }
    }

    /// Progress from the most recent update, if any.
    pub fn last_progress(&self) -> Option<f64> {
        self.last_progress
    }

    /// Locate the vehicle for a new telemetry sample.
    pub fn update(&mut self, x: f64, y: f64) -> VehicleSample {
        let sample = self.track.locate(x, y, self.last_progress);
        self.last_progress = Some(sample.progress);
        sample
    }

    /// Forget continuity, e.g. after a telemetry gap or a pit-lane exit.
    pub fn reset(&mut self) {
        self.last_progress = None;
    }
}

// ============================================================================
// Track definitions
// ============================================================================

/// Serialized track definition, as loaded from JSON.
///
/// ```json
/// {
///   "name": "Demo",
///   "reference": [[0, 0], [100, 0], [100, 50], [0, 50]],
///   "display": [[0, 0], [200, 0], [200, 100], [0, 100]],
///   "sectors": [0.0, 0.33, 0.66],
///   "projection": { "min_window_segments": 10, "window_fraction": 0.15 }
/// }
/// ```
///
/// `display` defaults to the reference path, and `display_simplify_tolerance`
/// derives a simplified display path from whichever path is used for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDefinition {
    pub name: String,
    pub reference: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Vec<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_simplify_tolerance: Option<f64>,
    #[serde(default)]
    pub sectors: Vec<f64>,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

impl TrackDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Validate the definition and build its [`TrackPair`].
    ///
    /// Both paths need at least two finite points, every sector boundary
    /// must lie in `[0, 1]` and the projection window must be non-empty.
    pub fn into_pair(self) -> Result<TrackPair> {
        let reference = validated_path(&self.name, "reference", &self.reference)?;
        let display = match &self.display {
            Some(coords) => validated_path(&self.name, "display", coords)?,
            None => reference.clone(),
        };
        let display = match self.display_simplify_tolerance {
            Some(tolerance) if tolerance > 0.0 => display.simplify(tolerance),
            _ => display,
        };

        if let Some((index, &value)) = self
            .sectors
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            warn!(
                "[Track] Rejecting '{}': sector boundary {} = {}",
                self.name, index, value
            );
            return Err(CircuitMapError::InvalidSectorBoundary { index, value });
        }

        if !self.projection.is_valid() {
            warn!(
                "[Track] Rejecting '{}': projection config {:?}",
                self.name, self.projection
            );
            return Err(CircuitMapError::InvalidProjectionConfig {
                min_window_segments: self.projection.min_window_segments,
                window_fraction: self.projection.window_fraction,
            });
        }

        Ok(TrackPair::new(
            self.name,
            reference,
            display,
            self.sectors,
            self.projection,
        ))
    }
}

fn validated_path(track: &str, role: &str, coords: &[[f64; 2]]) -> Result<Path> {
    let path = Path::try_from_points(coords.iter().copied().map(Point::from).collect())
        .inspect_err(|e| warn!("[Track] Rejecting '{}' {} path: {}", track, role, e))?;
    (path.len() >= 2)
        .then_some(path)
        .ok_or_insufficient_points(&format!("{track}/{role}"), coords.len(), 2)
}
