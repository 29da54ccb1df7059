//! Mapping joint angles onto progress percentages.

use crate::{AngleDomain, PercentDirection};

/// Linearly map `value` from `domain` onto `target`
///
/// The result is not clamped; values outside the domain extrapolate.
/// A zero-width domain maps everything to `target.0`.
pub fn interpolate(value: f32, domain: (f32, f32), target: (f32, f32)) -> f32 {
    let (a, b) = domain;
    let (lo, hi) = target;
    let span = b - a;
    if span == 0.0 || !span.is_finite() {
        return lo;
    }
    lo + (value - a) * (hi - lo) / span
}

/// Progress percentage for an angle, clamped to [0, 100] and rounded
///
/// The state machine detects extremes on integer boundaries, so the
/// percentage is rounded to the nearest whole number here.
pub fn progress_percentage(angle: f32, domain: AngleDomain, direction: PercentDirection) -> u8 {
    let target = direction.target_range();
    let raw = interpolate(angle, domain.as_tuple(), target);
    let value = if raw.is_nan() { target.0 } else { raw };
    value.clamp(0.0, 100.0).round() as u8
}
