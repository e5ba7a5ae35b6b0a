//! Progress conversion between two paths of the same circuit.
//!
//! The reference path and the display path are digitized independently, so
//! equal progress on each does not mean the same physical place. Conversion
//! goes through physical space: sample the point on the source path, then
//! project it onto the target path.

use crate::projection::project;
use crate::{ArcLengthTable, Path, ProjectionConfig, map_progress_to_point};

/// Express `source_progress` on `source_path` as progress on `target_path`.
///
/// `hint_progress` is forwarded to the target-side projection. Degenerate
/// target paths yield `0.0`.
///
/// # Example
/// ```
/// use circuitmap::{ArcLengthTable, Path, convert_progress};
///
/// let source = Path::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
/// // Same circuit, with an extra point on the first straight
/// let target = Path::from_xy(&[[0.0, 0.0], [2.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
/// let (sa, ta) = (ArcLengthTable::build(&source), ArcLengthTable::build(&target));
///
/// let p = convert_progress(0.25, &source, &sa, &target, &ta, None);
/// assert!((p - 0.25).abs() < 1e-12);
/// ```
pub fn convert_progress(
    source_progress: f64,
    source_path: &Path,
    source_arc: &ArcLengthTable,
    target_path: &Path,
    target_arc: &ArcLengthTable,
    hint_progress: Option<f64>,
) -> f64 {
    convert_progress_with(
        &ProjectionConfig::default(),
        source_progress,
        source_path,
        source_arc,
        target_path,
        target_arc,
        hint_progress,
    )
}

/// [`convert_progress`] with an explicit window configuration.
pub fn convert_progress_with(
    config: &ProjectionConfig,
    source_progress: f64,
    source_path: &Path,
    source_arc: &ArcLengthTable,
    target_path: &Path,
    target_arc: &ArcLengthTable,
    hint_progress: Option<f64>,
) -> f64 {
    let physical = map_progress_to_point(source_progress, source_path, Some(source_arc));
    project(&physical, target_path, target_arc, hint_progress, config)
        .map(|p| p.progress)
        .unwrap_or(0.0)
}

/// Convert a list of boundaries (e.g. sector splits) between paths.
///
/// Both paths run the same direction from roughly the same start line, so
/// each boundary's source progress is a good estimate of where it lands on the
/// target and is used as the hint. This keeps a boundary placed just before a
/// hairpin from snapping to the far side of it.
pub fn convert_boundaries(
    config: &ProjectionConfig,
    boundaries: &[f64],
    source_path: &Path,
    source_arc: &ArcLengthTable,
    target_path: &Path,
    target_arc: &ArcLengthTable,
) -> Vec<f64> {
    boundaries
        .iter()
        .map(|&b| {
            convert_progress_with(
                config,
                b,
                source_path,
                source_arc,
                target_path,
                target_arc,
                Some(b),
            )
        })
        .collect()
}
