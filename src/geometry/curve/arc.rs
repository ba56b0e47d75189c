use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{arc_point_at, sweep_from_angles};
use crate::math::{Point2, TOLERANCE};
use crate::motion::MotionInstruction;

use super::Curve2d;

/// Largest accepted relative difference between the start and end radius.
const RADIUS_REL_TOLERANCE: f64 = 1e-6;

/// A circular arc from `p1` to `p2` about `center`.
///
/// When `clockwise` is set the arc is traversed with increasing `atan2`
/// angle (positive sweep); otherwise with decreasing angle. Radius and angles
/// are derived once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    p1: Point2,
    p2: Point2,
    center: Point2,
    clockwise: bool,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    sweep: f64,
}

impl CircularArc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `p1` - Start point
    /// * `p2` - End point
    /// * `center` - Center of the arc circle
    /// * `clockwise` - Traversal direction, see the type documentation
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the start point lies on the
    /// center, or if `p1` and `p2` are not the same distance from `center`.
    pub fn new(p1: Point2, p2: Point2, center: Point2, clockwise: bool) -> Result<Self> {
        let radius = nalgebra::distance(&p1, &center);
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        let end_radius = nalgebra::distance(&p2, &center);
        if (radius - end_radius).abs() > RADIUS_REL_TOLERANCE * radius.max(end_radius) {
            return Err(GeometryError::Degenerate(format!(
                "arc endpoints are not equidistant from center ({radius} vs {end_radius})"
            ))
            .into());
        }

        let start_angle = (p1.y - center.y).atan2(p1.x - center.x);
        let end_angle = (p2.y - center.y).atan2(p2.x - center.x);
        let sweep = sweep_from_angles(start_angle, end_angle, clockwise);

        Ok(Self {
            p1,
            p2,
            center,
            clockwise,
            radius,
            start_angle,
            end_angle,
            sweep,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius, measured from the start point.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn clockwise(&self) -> bool {
        self.clockwise
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Signed sweep; positive exactly when the arc is `clockwise`.
    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        self.sweep
    }

    /// Motion for this arc, assuming the pen is at `p1`.
    ///
    /// The center is addressed relative to the start point.
    #[must_use]
    pub fn to_motion(&self) -> Vec<MotionInstruction> {
        let rel = self.center - self.p1;
        vec![MotionInstruction::ArcMove {
            x: self.p2.x,
            y: self.p2.y,
            i: rel.x,
            j: rel.y,
            clockwise: self.clockwise,
        }]
    }
}

impl Curve2d for CircularArc {
    fn point_at(&self, t: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, t)
    }

    fn start_point(&self) -> Point2 {
        self.p1
    }

    fn end_point(&self) -> Point2 {
        self.p2
    }
}
