//! Vector math helpers over [`glam::Vec2`].
//!
//! Pure functions, no state. Degenerate input never produces NaN: normalizing
//! a zero-length (or non-finite) vector yields [`Vec2::ZERO`].

pub use glam::Vec2;

/// `a - b`.
#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

/// Euclidean length of `v`.
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    magnitude(subtract(b, a))
}

/// Unit vector in the direction of `v`, or the zero vector when `v` has no
/// usable direction.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let length = magnitude(v);
    if length.is_finite() && length > f32::EPSILON {
        v / length
    } else {
        Vec2::ZERO
    }
}

/// `v` rotated 90 degrees counter-clockwise.
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Unsigned angle between two vectors in degrees, `None` if either is zero.
pub fn angle_between_deg(a: Vec2, b: Vec2) -> Option<f32> {
    let (a, b) = (normalize(a), normalize(b));
    if a == Vec2::ZERO || b == Vec2::ZERO {
        return None;
    }
    Some(a.dot(b).clamp(-1.0, 1.0).acos().to_degrees())
}
