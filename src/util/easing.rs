//! Easing curve for transition interpolation.
//!
//! Every dancer's local progress passes through this curve before it is
//! used to lerp between formations.

/// Cubic ease-in-out: slow start, fast middle, slow arrival.
///
/// `4t³` below 0.5, `1 - (-2t + 2)³ / 2` above. Input is clamped to
/// `[0, 1]`; the output is in the same range.
#[inline]
#[must_use]
pub fn cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}
