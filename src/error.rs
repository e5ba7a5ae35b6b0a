//! Error types for loading and validating track data.
//!
//! The geometric kernel itself never fails: degenerate input maps to a
//! sentinel result. Errors only arise when building tracks from external
//! definitions.

use thiserror::Error;

/// Errors raised while loading or validating track geometry.
#[derive(Debug, Error)]
pub enum CircuitMapError {
    #[error("invalid coordinate at index {index}: ({x}, {y})")]
    InvalidCoordinate { index: usize, x: f64, y: f64 },

    #[error("sector boundary {index} out of range [0, 1]: {value}")]
    InvalidSectorBoundary { index: usize, value: f64 },

    #[error(
        "projection window is empty or invalid: min_window_segments = {min_window_segments}, window_fraction = {window_fraction}"
    )]
    InvalidProjectionConfig {
        min_window_segments: usize,
        window_fraction: f64,
    },

    #[error("path '{name}' has {point_count} points, at least {minimum_required} required")]
    InsufficientPoints {
        name: String,
        point_count: usize,
        minimum_required: usize,
    },

    #[error("failed to parse track definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CircuitMapError>;

/// Convert an `Option` into a `Result` carrying an insufficient-points error.
pub trait OptionExt<T> {
    fn ok_or_insufficient_points(
        self,
        name: &str,
        point_count: usize,
        minimum_required: usize,
    ) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_insufficient_points(
        self,
        name: &str,
        point_count: usize,
        minimum_required: usize,
    ) -> Result<T> {
        self.ok_or_else(|| CircuitMapError::InsufficientPoints {
            name: name.to_string(),
            point_count,
            minimum_required,
        })
    }
}
