//! Joint angle calculation.
//!
//! The angle at a vertex is the difference between the orientations of the
//! two segments leaving it, folded into [0, 180] degrees.

use crate::Landmark;

/// Segments shorter than this are treated as coincident points
const MIN_SEGMENT_LENGTH: f32 = 1e-6;

/// Angle returned when either segment has zero length
pub const DEGENERATE_ANGLE: f32 = 0.0;

/// Calculate the angle at `p2` between `p2→p1` and `p2→p3`, in degrees
///
/// Only `x` and `y` are used. Returns [`DEGENERATE_ANGLE`] instead of NaN when
/// `p2` coincides with either neighbour or a coordinate is not finite.
pub fn joint_angle(p1: &Landmark, p2: &Landmark, p3: &Landmark) -> f32 {
    let v1 = (p1.x - p2.x, p1.y - p2.y);
    let v2 = (p3.x - p2.x, p3.y - p2.y);

    let len1 = v1.0.hypot(v1.1);
    let len2 = v2.0.hypot(v2.1);

    if !(len1 >= MIN_SEGMENT_LENGTH && len2 >= MIN_SEGMENT_LENGTH) {
        return DEGENERATE_ANGLE;
    }

    let radians = v2.1.atan2(v2.0) - v1.1.atan2(v1.0);
    let mut degrees = radians.to_degrees().abs();
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }

    if degrees.is_finite() {
        degrees
    } else {
        DEGENERATE_ANGLE
    }
}
