use crate::math::Point2;

use super::curve::{CircularArc, CubicBezier, Curve2d, LineSegment, SineWave};

/// A drawable shape.
///
/// The set of variants is closed; compilers match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Line(LineSegment),
    Arc(CircularArc),
    Bezier(CubicBezier),
    Sine(SineWave),
}

impl Shape {
    fn as_curve(&self) -> &dyn Curve2d {
        match self {
            Self::Line(line) => line,
            Self::Arc(arc) => arc,
            Self::Bezier(bezier) => bezier,
            Self::Sine(sine) => sine,
        }
    }

    /// Where drawing this shape starts.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.as_curve().start_point()
    }

    /// Where the pen rests after drawing this shape.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.as_curve().end_point()
    }

    /// Evaluates the shape at `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.as_curve().point_at(t)
    }

    /// Dense uniform sample for preview, `resolution + 1` points.
    #[must_use]
    pub fn sample(&self, resolution: usize) -> Vec<Point2> {
        self.as_curve().sample(resolution)
    }
}

impl From<LineSegment> for Shape {
    fn from(line: LineSegment) -> Self {
        Self::Line(line)
    }
}

impl From<CircularArc> for Shape {
    fn from(arc: CircularArc) -> Self {
        Self::Arc(arc)
    }
}

impl From<CubicBezier> for Shape {
    fn from(bezier: CubicBezier) -> Self {
        Self::Bezier(bezier)
    }
}

impl From<SineWave> for Shape {
    fn from(sine: SineWave) -> Self {
        Self::Sine(sine)
    }
}
