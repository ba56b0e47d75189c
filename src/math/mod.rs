pub mod arc_2d;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance below which two positions are treated as the same plotter location.
pub const COINCIDENT_DISTANCE: f64 = 1e-9;

/// Returns `true` when `a` and `b` are the same location within [`COINCIDENT_DISTANCE`].
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    nalgebra::distance(a, b) <= COINCIDENT_DISTANCE
}

/// Linear interpolation between two points: `a + (b - a) * t`.
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}
