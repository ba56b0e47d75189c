use crate::error::Result;
use crate::geometry::{CircularArc, CubicBezier, Curve2d, Shape, SineStrategy};
use crate::math::arc_2d::arc_subdivision_count;
use crate::math::Point2;

use super::{Polyline, TessellationParams};

/// Tessellates a shape into a polyline for preview.
pub struct TessellateShape<'a> {
    shape: &'a Shape,
    params: TessellationParams,
}

impl<'a> TessellateShape<'a> {
    /// Creates a new `TessellateShape` operation.
    #[must_use]
    pub fn new(shape: &'a Shape, params: TessellationParams) -> Self {
        Self { shape, params }
    }

    /// Executes the tessellation, returning a polyline from the shape's start
    /// to its end.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if the parameters are invalid.
    pub fn execute(&self) -> Result<Polyline> {
        self.params.validate()?;
        let points = match self.shape {
            Shape::Line(line) => vec![line.start_point(), line.end_point()],
            Shape::Arc(arc) => arc_points(arc, &self.params),
            Shape::Bezier(bezier) => bezier_points(bezier, &self.params),
            Shape::Sine(sine) => {
                let mut points = vec![sine.start_point()];
                for bezier in sine.to_beziers(SineStrategy::Eighth) {
                    points.extend(bezier_points(&bezier, &self.params).into_iter().skip(1));
                }
                points
            }
        };
        Ok(Polyline { points })
    }
}

/// Samples an arc finely enough that no chord strays more than the tolerance.
pub(super) fn arc_points(arc: &CircularArc, params: &TessellationParams) -> Vec<Point2> {
    let n = params.clamp_segments(arc_subdivision_count(
        arc.radius(),
        arc.sweep_angle().abs(),
        params.tolerance,
    ));
    pinned_sample(arc, n)
}

fn bezier_points(bezier: &CubicBezier, params: &TessellationParams) -> Vec<Point2> {
    // Uniform steps bound the chord error by 3/4 of the largest second
    // difference of the control points, over n².
    let m = f64::max(
        (bezier.p1().coords - bezier.c1().coords * 2.0 + bezier.c2().coords).norm(),
        (bezier.c1().coords - bezier.c2().coords * 2.0 + bezier.p2().coords).norm(),
    );
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (0.75 * m / params.tolerance).sqrt().ceil() as u32;
    pinned_sample(bezier, params.clamp_segments(n))
}

/// Uniform sample with the exact endpoints in place of the evaluated ones.
fn pinned_sample(curve: &dyn Curve2d, segments: u32) -> Vec<Point2> {
    let mut points = curve.sample(segments as usize);
    if let Some(first) = points.first_mut() {
        *first = curve.start_point();
    }
    if let Some(last) = points.last_mut() {
        *last = curve.end_point();
    }
    points
}
