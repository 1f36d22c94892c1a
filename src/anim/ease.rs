//! Per-segment easing for the path parameterizer.
//!
//! Within one path segment the local fraction `u` in `[0, 1]` is remapped by a
//! sine S-curve blend controlled by a single `deceleration` knob in `[-1, 1]`:
//! positive values slow dots down as they approach a vertex, negative values
//! speed them up. Zero is the identity (constant speed within the segment).

use std::f64::consts::PI;

/// Sine S-curve: 0 at the segment endpoints, steepest at the midpoint.
pub fn s_curve(u: f64) -> f64 {
    ((PI * (u - 0.5)).sin() + 1.0) / 2.0
}

/// Functional inverse of [`s_curve`]: steepest at the endpoints, flat at the
/// midpoint. Used for the "accelerate into vertices" emphasis so that segment
/// boundaries still map exactly onto vertices.
pub fn s_curve_inverse(u: f64) -> f64 {
    0.5 + (2.0 * u - 1.0).clamp(-1.0, 1.0).asin() / PI
}

/// Remap a local segment fraction by the deceleration blend.
///
/// `deceleration` is clamped to `[-1, 1]`. For every value of the knob the
/// endpoints and the midpoint are fixed: `apply(0, d) == 0`, `apply(1, d) == 1`
/// and `apply(0.5, d) == 0.5`.
pub fn apply(u: f64, deceleration: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    let d = deceleration.clamp(-1.0, 1.0);
    if d == 0.0 {
        u
    } else if d > 0.0 {
        u * (1.0 - d) + s_curve(u) * d
    } else {
        u * (1.0 + d) + s_curve_inverse(u) * -d
    }
}
