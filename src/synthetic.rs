//! Synthetic circuit generator for testing and benchmarking.
//!
//! Generates closed circuit polylines with known shapes, plus an independently
//! digitized display path for each, so conversion and hairpin handling can be
//! checked against ground truth.
//!
//! Feature-gated behind `synthetic` — not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use circuitmap::synthetic::{CircuitPattern, SyntheticScenario};
//!
//! let scenario = SyntheticScenario {
//!     pattern: CircuitPattern::Oval,
//!     reference_points: 200,
//!     display_points: 150,
//!     display_noise_sigma: 0.5,
//!     seed: 42,
//! };
//!
//! let track = scenario.generate();
//! assert_eq!(track.reference.len(), 201);
//! assert_eq!(track.display.len(), 151);
//! ```

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{ArcLengthTable, Path, Point, map_progress_to_point};

// ============================================================================
// Types
// ============================================================================

/// Shape of the generated circuit.
#[derive(Debug, Clone, Copy)]
pub enum CircuitPattern {
    /// Ellipse with 400 x 250 radii.
    Oval,
    /// Ellipse with a seeded, smooth radial wobble. Never self-intersects.
    Winding,
    /// Two long parallel straights joined by a tight hairpin, so the outbound
    /// and return straights run close together but far apart in arc length.
    Hairpin(HairpinConfig),
}

/// Geometry of a hairpin circuit.
#[derive(Debug, Clone, Copy)]
pub struct HairpinConfig {
    /// Length of each straight.
    pub straight_length: f64,
    /// Distance between the outbound and return straights.
    pub gap: f64,
    /// Points per straight.
    pub points_per_straight: usize,
    /// Points in the hairpin turn.
    pub turn_points: usize,
}

impl Default for HairpinConfig {
    fn default() -> Self {
        Self {
            straight_length: 500.0,
            gap: 8.0,
            points_per_straight: 50,
            turn_points: 12,
        }
    }
}

/// Scenario configuration for generating a synthetic track.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    /// Circuit shape.
    pub pattern: CircuitPattern,
    /// Segments in the reference path (the path is closed, so it has one
    /// more point). Ignored for `Hairpin`, whose density comes from its config.
    pub reference_points: usize,
    /// Segments in the re-digitized display path.
    pub display_points: usize,
    /// Gaussian noise added to display points, in path units.
    pub display_noise_sigma: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

/// A generated reference/display pair.
#[derive(Debug, Clone)]
pub struct SyntheticTrack {
    pub reference: Path,
    pub display: Path,
}

// ============================================================================
// Generators
// ============================================================================

/// Closed ellipse centered on the origin, starting at `(rx, 0)` and running
/// counter-clockwise. The first point is repeated at the end.
pub fn oval(segments: usize, rx: f64, ry: f64) -> Path {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let theta = 2.0 * PI * (i % segments) as f64 / segments as f64;
            Point::new(rx * theta.cos(), ry * theta.sin())
        })
        .collect()
}

/// Closed ellipse whose radius wobbles smoothly by up to 15%.
fn winding(segments: usize, rng: &mut StdRng) -> Path {
    let segments = segments.max(3);
    let lobes: [(f64, f64, f64); 3] = [
        (2.0, rng.gen_range(0.03..0.06), rng.gen_range(0.0..(2.0 * PI))),
        (3.0, rng.gen_range(0.02..0.05), rng.gen_range(0.0..(2.0 * PI))),
        (5.0, rng.gen_range(0.01..0.04), rng.gen_range(0.0..(2.0 * PI))),
    ];

    (0..=segments)
        .map(|i| {
            let theta = 2.0 * PI * (i % segments) as f64 / segments as f64;
            let wobble: f64 = lobes
                .iter()
                .map(|(k, amp, phase)| amp * (k * theta + phase).sin())
                .sum();
            let r = 1.0 + wobble;
            Point::new(400.0 * r * theta.cos(), 250.0 * r * theta.sin())
        })
        .collect()
}

/// Hairpin circuit.
///
/// Outbound straight along `y = 0` from the origin, a semicircular hairpin
/// at `x = straight_length`, a return straight along `y = gap`, then a wide
/// loop below the straights back to the origin.
pub fn hairpin(config: &HairpinConfig) -> Path {
    let length = config.straight_length;
    let gap = config.gap;
    let n = config.points_per_straight.max(2);
    let turn = config.turn_points.max(2);

    let mut points = Vec::with_capacity(2 * n + turn + 4);

    // Outbound straight
    for i in 0..n {
        points.push(Point::new(length * i as f64 / n as f64, 0.0));
    }

    // Hairpin: semicircle around (length, gap / 2)
    let radius = gap / 2.0;
    for i in 0..=turn {
        let angle = -PI / 2.0 + PI * i as f64 / turn as f64;
        points.push(Point::new(
            length + radius * angle.cos(),
            radius + radius * angle.sin(),
        ));
    }

    // Return straight
    for i in 1..=n {
        points.push(Point::new(length * (1.0 - i as f64 / n as f64), gap));
    }

    // Loop back underneath to the start
    let depth = length / 2.0;
    points.push(Point::new(-depth / 2.0, gap));
    points.push(Point::new(-depth / 2.0, -depth));
    points.push(Point::new(0.0, -depth));
    points.push(points[0]);

    Path::new(points)
}

/// Add Gaussian noise to every point except the closing point, which is kept
/// equal to the (noisy) first point.
pub fn jitter(path: &Path, sigma: f64, rng: &mut StdRng) -> Path {
    if sigma <= 0.0 || path.is_empty() {
        return path.clone();
    }

    let closed = path.len() > 1 && path.points().first() == path.points().last();
    let mut points: Vec<Point> = path
        .points()
        .iter()
        .map(|p| {
            // Box-Muller transform for Gaussian noise
            let u1: f64 = rng.gen_range(0.0001..1.0);
            let u2: f64 = rng.r#gen();
            let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
            let z1 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).sin();
            Point::new(p.x + z0 * sigma, p.y + z1 * sigma)
        })
        .collect();

    if closed {
        let last = points.len() - 1;
        points[last] = points[0];
    }
    Path::new(points)
}

/// Resample `path` to `segments` evenly spaced segments by arc length.
pub fn redigitize(path: &Path, segments: usize) -> Path {
    let arc = ArcLengthTable::build(path);
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| map_progress_to_point(i as f64 / segments as f64, path, Some(&arc)))
        .collect()
}

// ============================================================================
// Scenario Implementation
// ============================================================================

impl SyntheticScenario {
    /// Generate a reference path and an independently digitized display path.
    pub fn generate(&self) -> SyntheticTrack {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let reference = match self.pattern {
            CircuitPattern::Oval => oval(self.reference_points, 400.0, 250.0),
            CircuitPattern::Winding => winding(self.reference_points, &mut rng),
            CircuitPattern::Hairpin(config) => hairpin(&config),
        };

        let display = jitter(
            &redigitize(&reference, self.display_points),
            self.display_noise_sigma,
            &mut rng,
        );

        SyntheticTrack { reference, display }
    }

    /// Plain oval, lightly perturbed display path.
    pub fn oval() -> Self {
        Self {
            pattern: CircuitPattern::Oval,
            reference_points: 400,
            display_points: 300,
            display_noise_sigma: 0.5,
            seed: 42,
        }
    }

    /// Winding circuit, dense reference path.
    pub fn winding() -> Self {
        Self {
            pattern: CircuitPattern::Winding,
            reference_points: 2000,
            display_points: 800,
            display_noise_sigma: 1.0,
            seed: 7,
        }
    }

    /// Default hairpin circuit.
    pub fn hairpin() -> Self {
        Self {
            pattern: CircuitPattern::Hairpin(HairpinConfig::default()),
            reference_points: 0,
            display_points: 400,
            display_noise_sigma: 0.0,
            seed: 1,
        }
    }
}
