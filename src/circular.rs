//! Wrap-around arithmetic on progress values.
//!
//! Progress on a closed circuit is circular: 1.0 and 0.0 are the same place
//! (the start/finish line).

/// Forward distance from `base` to `target`, wrapping past 1.0 back to 0.0.
///
/// # Example
/// ```
/// use circuitmap::forward_distance;
///
/// assert!((forward_distance(0.9, 0.05) - 0.15).abs() < 1e-12);
/// assert!((forward_distance(0.2, 0.3) - 0.1).abs() < 1e-12);
/// ```
#[inline]
pub fn forward_distance(base: f64, target: f64) -> f64 {
    let d = target - base;
    if d >= 0.0 { d } else { d + 1.0 }
}

/// Wrap any progress value into `[0, 1)`. NaN maps to 0.
pub fn wrap_progress(progress: f64) -> f64 {
    if !progress.is_finite() {
        return 0.0;
    }
    let wrapped = progress.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Signed shortest difference from `from` to `to`, in `(-0.5, 0.5]`.
///
/// Positive when `to` is ahead of `from`.
pub fn circular_delta(from: f64, to: f64) -> f64 {
    let d = forward_distance(wrap_progress(from), wrap_progress(to));
    if d > 0.5 { d - 1.0 } else { d }
}

/// Whether `progress` lies in the half-open arc `[start, end)`, going forward
/// from `start`. Arcs with `start > end` cross the start/finish line.
pub fn is_between(start: f64, end: f64, progress: f64) -> bool {
    let (start, end, p) = (wrap_progress(start), wrap_progress(end), wrap_progress(progress));
    if start <= end {
        start <= p && p < end
    } else {
        p >= start || p < end
    }
}
