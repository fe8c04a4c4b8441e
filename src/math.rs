//! Small scalar and vector helpers.

use glam::Vec3;

/// Vectors shorter than this normalize to zero.
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// Hermite smoothstep of `x` between `edge0` and `edge1`.
///
/// Edges may be given in either order: `smoothstep(0.45, 0.0, d)` is 1 at
/// `d = 0` and 0 at `d >= 0.45`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Normalize `v`, returning zero for near-zero or non-finite input.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > NORMALIZE_EPSILON && len.is_finite() {
        v / len
    } else {
        Vec3::ZERO
    }
}
