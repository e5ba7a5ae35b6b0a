//! Tests for circular module

mod common;

use circuitmap::circular::{circular_delta, is_between, wrap_progress};
use circuitmap::forward_distance;
use common::approx_eq;

#[test]
fn test_forward_distance_wraps() {
    assert!(approx_eq(forward_distance(0.9, 0.05), 0.15, 1e-12));
}

#[test]
fn test_forward_distance_without_wrap() {
    assert!(approx_eq(forward_distance(0.2, 0.7), 0.5, 1e-12));
    assert_eq!(forward_distance(0.4, 0.4), 0.0);
}

#[test]
fn test_forward_distance_is_complementary() {
    for (a, b) in [(0.1, 0.6), (0.95, 0.05), (0.3, 0.31)] {
        let there = forward_distance(a, b);
        let back = forward_distance(b, a);
        assert!(approx_eq(there + back, 1.0, 1e-12));
    }
}

#[test]
fn test_wrap_progress() {
    assert_eq!(wrap_progress(0.25), 0.25);
    assert_eq!(wrap_progress(1.0), 0.0);
    assert!(approx_eq(wrap_progress(1.25), 0.25, 1e-12));
    assert!(approx_eq(wrap_progress(-0.25), 0.75, 1e-12));
    assert_eq!(wrap_progress(f64::NAN), 0.0);
    assert!(wrap_progress(-1e-18) < 1.0);
}

#[test]
fn test_circular_delta_takes_short_way() {
    assert!(approx_eq(circular_delta(0.95, 0.05), 0.1, 1e-12));
    assert!(approx_eq(circular_delta(0.05, 0.95), -0.1, 1e-12));
    assert!(approx_eq(circular_delta(0.2, 0.4), 0.2, 1e-12));
    assert!(approx_eq(circular_delta(0.0, 1.0), 0.0, 1e-12));
}

#[test]
fn test_is_between() {
    assert!(is_between(0.2, 0.5, 0.3));
    assert!(is_between(0.2, 0.5, 0.2));
    assert!(!is_between(0.2, 0.5, 0.5));
    // Arc across the start/finish line
    assert!(is_between(0.9, 0.1, 0.95));
    assert!(is_between(0.9, 0.1, 0.05));
    assert!(!is_between(0.9, 0.1, 0.5));
}
