use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{line_line_intersect_2d, rotate_cw};
use crate::math::{lerp, points_coincide, Point2, Vector2};
use crate::motion::MotionInstruction;

use super::Curve2d;

/// A line through two distinct points.
///
/// For drawing it is the segment from `p1` to `p2`; for intersection it
/// stands for the infinite line through both points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    p1: Point2,
    p2: Point2,
}

impl LineSegment {
    /// Creates a new line segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidCurve` if the points coincide.
    pub fn new(p1: Point2, p2: Point2) -> Result<Self> {
        if points_coincide(&p1, &p2) {
            return Err(GeometryError::InvalidCurve("line segment has zero length".into()).into());
        }
        Ok(Self { p1, p2 })
    }

    /// Returns the first defining point.
    #[must_use]
    pub fn p1(&self) -> &Point2 {
        &self.p1
    }

    /// Returns the second defining point.
    #[must_use]
    pub fn p2(&self) -> &Point2 {
        &self.p2
    }

    /// Returns the (non-normalized) direction `p2 - p1`.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.p2 - self.p1
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.p1, &self.p2)
    }

    /// Intersects the infinite lines through `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParallelLines` if the lines are parallel or coincident.
    pub fn intersect(&self, other: &LineSegment) -> Result<Point2> {
        let d2 = other.direction();
        let (_, u) = line_line_intersect_2d(&self.p1, &self.direction(), &other.p1, &d2)
            .ok_or(GeometryError::ParallelLines)?;
        Ok(other.p1 + d2 * u)
    }

    /// Returns the line through `p` perpendicular to this one.
    #[must_use]
    pub fn perpendicular_at(&self, p: &Point2) -> LineSegment {
        // The rotated direction has the same non-zero length, so the points are distinct.
        LineSegment {
            p1: *p,
            p2: p + rotate_cw(&self.direction()),
        }
    }

    /// Motion for this segment, assuming the pen is at `p1`.
    #[must_use]
    pub fn to_motion(&self) -> Vec<MotionInstruction> {
        vec![MotionInstruction::linear_to(&self.p2)]
    }
}

impl Curve2d for LineSegment {
    fn point_at(&self, t: f64) -> Point2 {
        lerp(&self.p1, &self.p2, t)
    }

    fn start_point(&self) -> Point2 {
        self.p1
    }

    fn end_point(&self) -> Point2 {
        self.p2
    }
}
