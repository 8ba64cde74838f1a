//! Fundamental geometric types.
//!
//! The playfield is a fixed 2-D plane in pixel units: x grows rightward,
//! y grows downward, the ground line sits near the bottom edge.

/// 2-D point / vector in playfield units.
pub type Vec2 = glam::DVec2;

/// Linear interpolation between two scalar endpoints.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Point on the straight segment `start -> target` at normalized progress `t`.
/// Progress may exceed 1.0 for entities that have overshot their target.
pub fn along(start: Vec2, target: Vec2, t: f64) -> Vec2 {
    start + (target - start) * t
}
