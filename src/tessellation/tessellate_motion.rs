use crate::error::Result;
use crate::geometry::CircularArc;
use crate::math::{Point2, Vector2};
use crate::motion::MotionInstruction;

use super::tessellate_shape::arc_points;
use super::{Polyline, TessellationParams};

/// Reconstructs the strokes a plotter draws from a motion stream.
///
/// The pen starts at `start`, lowered. Each pen-down run becomes one
/// polyline; runs with fewer than two points are omitted. Travel while the
/// pen is up only moves the position.
pub struct TessellateMotion<'a> {
    start: Point2,
    instructions: &'a [MotionInstruction],
    params: TessellationParams,
}

impl<'a> TessellateMotion<'a> {
    /// Creates a new `TessellateMotion` operation.
    #[must_use]
    pub fn new(
        start: Point2,
        instructions: &'a [MotionInstruction],
        params: TessellationParams,
    ) -> Self {
        Self {
            start,
            instructions,
            params,
        }
    }

    /// Executes the reconstruction, returning strokes in drawing order.
    ///
    /// # Errors
    ///
    /// - `TessellationError::InvalidParameters` if the parameters are invalid
    /// - `GeometryError::Degenerate` if an arc move does not describe a valid arc
    pub fn execute(&self) -> Result<Vec<Polyline>> {
        self.params.validate()?;

        let mut strokes = Vec::new();
        let mut cursor = self.start;
        let mut current = Some(Polyline {
            points: vec![self.start],
        });

        for instruction in self.instructions {
            match *instruction {
                MotionInstruction::PenUp => {
                    if let Some(stroke) = current.take() {
                        push_stroke(&mut strokes, stroke);
                    }
                }
                MotionInstruction::PenDown => {
                    if current.is_none() {
                        current = Some(Polyline { points: vec![cursor] });
                    }
                }
                MotionInstruction::LinearMove { x, y } => {
                    cursor = Point2::new(x, y);
                    if let Some(stroke) = current.as_mut() {
                        stroke.points.push(cursor);
                    }
                }
                MotionInstruction::ArcMove { x, y, i, j, clockwise } => {
                    let target = Point2::new(x, y);
                    if let Some(stroke) = current.as_mut() {
                        let center = cursor + Vector2::new(i, j);
                        let arc = CircularArc::new(cursor, target, center, clockwise)?;
                        stroke.points.extend(arc_points(&arc, &self.params).into_iter().skip(1));
                    }
                    cursor = target;
                }
            }
        }
        if let Some(stroke) = current {
            push_stroke(&mut strokes, stroke);
        }
        Ok(strokes)
    }
}

fn push_stroke(strokes: &mut Vec<Polyline>, stroke: Polyline) {
    if stroke.points.len() >= 2 {
        strokes.push(stroke);
    }
}
