mod arc;
mod bezier;
mod line;
mod sine;

pub use arc::CircularArc;
pub use bezier::{Biarc, CubicBezier, InflectionPoints};
pub use line::LineSegment;
pub use sine::{SineStrategy, SineWave};

use crate::math::Point2;

/// Trait for parametric 2D curves traversed over `t` in `[0, 1]`.
pub trait Curve2d {
    /// Evaluates the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point2;

    /// The point the pen starts from when drawing the curve.
    fn start_point(&self) -> Point2;

    /// The point the pen rests at after drawing the curve.
    fn end_point(&self) -> Point2;

    /// Samples `resolution + 1` points at uniform parameters, endpoints included.
    ///
    /// A resolution of zero is treated as one.
    fn sample(&self, resolution: usize) -> Vec<Point2> {
        let n = resolution.max(1);
        #[allow(clippy::cast_precision_loss)]
        let step = 1.0 / n as f64;
        (0..=n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 * step;
                self.point_at(t)
            })
            .collect()
    }
}
