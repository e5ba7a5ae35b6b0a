//! Tests for synthetic circuits (requires the `synthetic` feature)

use circuitmap::circular::circular_delta;
use circuitmap::synthetic::{SyntheticScenario, hairpin, oval, redigitize};
use circuitmap::{ArcLengthTable, ProjectionConfig, TrackPair, convert_progress};

#[test]
fn test_oval_is_closed() {
    let path = oval(100, 400.0, 250.0);
    assert_eq!(path.len(), 101);
    assert_eq!(path.points().first(), path.points().last());
}

#[test]
fn test_scenarios_are_deterministic() {
    let a = SyntheticScenario::winding().generate();
    let b = SyntheticScenario::winding().generate();
    assert_eq!(a.reference, b.reference);
    assert_eq!(a.display, b.display);
}

#[test]
fn test_redigitize_keeps_length() {
    let path = oval(1000, 400.0, 250.0);
    let resampled = redigitize(&path, 1000);
    let original = ArcLengthTable::build(&path).total_length();
    let total = ArcLengthTable::build(&resampled).total_length();
    assert!((original - total).abs() / original < 1e-3);
}

#[test]
fn test_conversion_to_noisy_display_path() {
    let track = SyntheticScenario::oval().generate();
    let ra = ArcLengthTable::build(&track.reference);
    let da = ArcLengthTable::build(&track.display);

    for i in 0..50 {
        let g = i as f64 / 50.0;
        let converted = convert_progress(g, &track.reference, &ra, &track.display, &da, Some(g));
        // Display noise is 0.5 units on a ~2000 unit circuit
        assert!(circular_delta(g, converted).abs() < 0.005, "g = {g}: {converted}");
    }
}

#[test]
fn test_hairpin_scenario_sectors() {
    let track = SyntheticScenario::hairpin().generate();
    let pair = TrackPair::new(
        "Hairpin",
        track.reference,
        track.display,
        vec![0.0, 0.2, 0.4, 0.6, 0.8],
        ProjectionConfig::default(),
    );
    for (r, d) in pair.sectors().iter().zip(pair.display_sectors()) {
        assert!(circular_delta(*r, *d).abs() < 0.01, "{r} -> {d}");
    }
}

#[test]
fn test_hairpin_generator_shape() {
    let path = hairpin(&Default::default());
    assert_eq!(path.len(), 50 + 13 + 50 + 4);
    assert_eq!(path.points().first(), path.points().last());
}
