//! Shared fixtures for integration tests.
#![allow(dead_code)]

use circuitmap::{Path, Point};

pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// L-shaped path: arc lengths [0, 10, 20].
pub fn l_path() -> Path {
    Path::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]])
}

/// Closed 100 x 100 square, counter-clockwise from the origin, with
/// `per_side` equal segments on each side.
pub fn square(per_side: usize) -> Path {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ];
    let mut points = Vec::with_capacity(4 * per_side + 1);
    for side in 0..4 {
        let a = corners[side];
        let b = corners[(side + 1) % 4];
        for i in 0..per_side {
            points.push(a.lerp(&b, i as f64 / per_side as f64));
        }
    }
    points.push(corners[0]);
    Path::new(points)
}

/// Circuit with a hairpin: outbound straight along y = 0 (x from 0 to 500,
/// 10-unit segments), a semicircular turn, a return straight along y = 8,
/// then a wide loop back to the origin underneath.
///
/// Point indices: outbound 0..=49, turn 50..=62, return 63..=112, loop
/// 113..=116. The return straight is only 8 units from the outbound one but
/// roughly 500 units further along the circuit.
pub fn hairpin() -> Path {
    let mut points = Vec::new();
    for i in 0..50 {
        points.push(Point::new(10.0 * i as f64, 0.0));
    }
    for i in 0..=12 {
        let angle = -std::f64::consts::FRAC_PI_2 + std::f64::consts::PI * i as f64 / 12.0;
        points.push(Point::new(500.0 + 4.0 * angle.cos(), 4.0 + 4.0 * angle.sin()));
    }
    for i in 1..=50 {
        points.push(Point::new(500.0 - 10.0 * i as f64, 8.0));
    }
    points.push(Point::new(-125.0, 8.0));
    points.push(Point::new(-125.0, -250.0));
    points.push(Point::new(0.0, -250.0));
    points.push(Point::new(0.0, 0.0));
    Path::new(points)
}
