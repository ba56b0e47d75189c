use crate::diagnostics::{CompileEvent, Diagnostics, NoDiagnostics};
use crate::error::Result;
use crate::geometry::{CubicBezier, Shape};
use crate::math::{points_coincide, Point2};
use crate::motion::MotionInstruction;

use super::{ArcPiece, BiarcApproximation, CompileOptions};

/// Compiles an ordered drawing into one position-continuous motion stream.
///
/// The pen is assumed to rest at the first shape's start. Whenever the next
/// shape starts elsewhere, a travel move (`PenUp`, `LinearMove`, `PenDown`)
/// is inserted. Moves that would not change the pen position are dropped.
#[derive(Debug, Clone, Default)]
pub struct PathCompiler {
    options: CompileOptions,
}

impl PathCompiler {
    /// Creates a new compiler.
    ///
    /// # Errors
    ///
    /// Returns `CompileError::InvalidInput` if the options are invalid.
    pub fn new(options: CompileOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles `shapes` in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while converting a shape.
    pub fn compile(&self, shapes: &[Shape]) -> Result<Vec<MotionInstruction>> {
        self.compile_with(shapes, &mut NoDiagnostics)
    }

    /// Compiles `shapes` in order, reporting decisions to `diagnostics`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while converting a shape.
    pub fn compile_with(
        &self,
        shapes: &[Shape],
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<Vec<MotionInstruction>> {
        let Some(first) = shapes.first() else {
            return Ok(Vec::new());
        };
        let mut cursor = first.start_point();
        let mut out = Vec::new();

        for shape in shapes {
            let start = shape.start_point();
            if !points_coincide(&start, &cursor) {
                diagnostics.record(CompileEvent::TravelInserted { from: cursor, to: start });
                out.push(MotionInstruction::PenUp);
                out.push(MotionInstruction::linear_to(&start));
                out.push(MotionInstruction::PenDown);
                cursor = start;
            }

            for instruction in self.shape_motion(shape, diagnostics)? {
                match instruction.target() {
                    Some(target) if points_coincide(&target, &cursor) => {
                        diagnostics.record(CompileEvent::ZeroLengthMoveDropped { at: target });
                    }
                    Some(target) => {
                        cursor = target;
                        out.push(instruction);
                    }
                    None => out.push(instruction),
                }
            }
            cursor = shape.end_point();
        }

        Ok(out)
    }

    /// Motion for one shape, assuming the pen is at its start.
    fn shape_motion(
        &self,
        shape: &Shape,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<Vec<MotionInstruction>> {
        match shape {
            Shape::Line(line) => Ok(line.to_motion()),
            Shape::Arc(arc) => Ok(arc.to_motion()),
            Shape::Bezier(bezier) => self.curve_motion(bezier, diagnostics),
            Shape::Sine(sine) => {
                let mut out = Vec::new();
                for bezier in sine.to_beziers(self.options.sine_strategy) {
                    out.extend(self.curve_motion(&bezier, diagnostics)?);
                }
                Ok(out)
            }
        }
    }

    fn curve_motion(
        &self,
        bezier: &CubicBezier,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<Vec<MotionInstruction>> {
        let pieces = BiarcApproximation::new(*bezier, &self.options).execute(diagnostics)?;
        Ok(pieces.iter().flat_map(ArcPiece::to_motion).collect())
    }
}

/// Replays `instructions` from `start` and returns the final pen position.
#[must_use]
pub fn final_position(start: Point2, instructions: &[MotionInstruction]) -> Point2 {
    instructions
        .iter()
        .rev()
        .find_map(MotionInstruction::target)
        .unwrap_or(start)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{CircularArc, LineSegment, SineWave};
    use crate::operations::DepthFallback;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Shape {
        LineSegment::new(Point2::new(x1, y1), Point2::new(x2, y2)).unwrap().into()
    }

    #[test]
    fn single_line_needs_no_travel() {
        let out = PathCompiler::default().compile(&[line(0.0, 0.0, 10.0, 0.0)]).unwrap();
        assert_eq!(out, vec![MotionInstruction::LinearMove { x: 10.0, y: 0.0 }]);
    }

    #[test]
    fn single_arc_is_one_arc_move() {
        let arc = CircularArc::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(0.0, 5.0),
            false,
        )
        .unwrap();
        let out = PathCompiler::default().compile(&[arc.into()]).unwrap();
        assert_eq!(
            out,
            vec![MotionInstruction::ArcMove {
                x: 0.0,
                y: 10.0,
                i: 0.0,
                j: 5.0,
                clockwise: false,
            }]
        );
    }

    #[test]
    fn empty_drawing() {
        assert!(PathCompiler::default().compile(&[]).unwrap().is_empty());
    }

    #[test]
    fn connected_shapes_flow_without_travel() {
        let out = PathCompiler::default()
            .compile(&[line(0.0, 0.0, 1.0, 0.0), line(1.0, 0.0, 1.0, 1.0)])
            .unwrap();
        assert_eq!(
            out,
            vec![
                MotionInstruction::LinearMove { x: 1.0, y: 0.0 },
                MotionInstruction::LinearMove { x: 1.0, y: 1.0 },
            ]
        );
    }

    #[test]
    fn disjoint_shapes_get_travel_moves() {
        let mut events = Vec::new();
        let out = PathCompiler::default()
            .compile_with(&[line(0.0, 0.0, 1.0, 0.0), line(5.0, 5.0, 6.0, 5.0)], &mut events)
            .unwrap();
        assert_eq!(
            out,
            vec![
                MotionInstruction::LinearMove { x: 1.0, y: 0.0 },
                MotionInstruction::PenUp,
                MotionInstruction::LinearMove { x: 5.0, y: 5.0 },
                MotionInstruction::PenDown,
                MotionInstruction::LinearMove { x: 6.0, y: 5.0 },
            ]
        );
        assert_eq!(
            events,
            vec![CompileEvent::TravelInserted {
                from: Point2::new(1.0, 0.0),
                to: Point2::new(5.0, 5.0),
            }]
        );
    }

    #[test]
    fn zero_sweep_arc_is_dropped() {
        let p = Point2::new(1.0, 0.0);
        let arc = CircularArc::new(p, p, Point2::origin(), true).unwrap();
        let mut events = Vec::new();
        let out = PathCompiler::default()
            .compile_with(&[line(0.0, 0.0, 1.0, 0.0), arc.into()], &mut events)
            .unwrap();
        assert_eq!(out, vec![MotionInstruction::LinearMove { x: 1.0, y: 0.0 }]);
        assert_eq!(events, vec![CompileEvent::ZeroLengthMoveDropped { at: p }]);
    }

    #[test]
    fn bezier_compiles_to_arcs_ending_at_its_end() {
        let bezier = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(4.0, 3.0),
            Point2::new(6.0, 1.0),
        );
        let out = PathCompiler::default().compile(&[bezier.into()]).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| matches!(i, MotionInstruction::ArcMove { .. })));
        assert_eq!(final_position(Point2::origin(), &out), Point2::new(6.0, 1.0));
    }

    #[test]
    fn no_consecutive_moves_to_same_point() {
        let sine: Shape = SineWave::new(Point2::new(2.0, 0.0), 1.0, 4.0).unwrap().into();
        let shapes = [
            line(0.0, 0.0, 2.0, 0.0),
            sine,
            line(6.0, 0.0, 6.0, 3.0),
            line(0.0, 3.0, 1.0, 3.0),
        ];
        let out = PathCompiler::default().compile(&shapes).unwrap();
        let mut previous = Point2::origin();
        for target in out.iter().filter_map(MotionInstruction::target) {
            assert!(!points_coincide(&previous, &target), "repeated move to {target}");
            previous = target;
        }
    }

    #[test]
    fn each_shape_ends_where_the_next_begins() {
        let shapes = [
            line(0.0, 0.0, 2.0, 0.0),
            SineWave::new(Point2::new(2.0, 0.0), 1.0, 4.0).unwrap().into(),
            line(8.0, 1.0, 9.0, 1.0),
        ];
        let compiler = PathCompiler::default();
        let mut position = shapes[0].start_point();
        for (n, shape) in shapes.iter().enumerate() {
            let out = compiler.compile(std::slice::from_ref(shape)).unwrap();
            position = final_position(position, &out);
            assert_eq!(position, shape.end_point(), "shape {n} ends elsewhere");
        }
    }

    #[test]
    fn tiny_quarter_circle_still_becomes_arcs() {
        let r = 1e-5;
        let k = r * 0.552_284_749_8;
        let bezier = CubicBezier::new(
            Point2::new(r, 0.0),
            Point2::new(r, k),
            Point2::new(k, r),
            Point2::new(0.0, r),
        );
        let compiler = PathCompiler::new(CompileOptions {
            flatness_tolerance: 0.0,
            ..CompileOptions::default()
        })
        .unwrap();
        assert_eq!(compiler.options().max_split_depth, 8);

        let mut events = Vec::new();
        let out = compiler.compile_with(&[bezier.into()], &mut events).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| matches!(i, MotionInstruction::ArcMove { .. })));
        assert!(events.is_empty(), "unexpected events {events:?}");
    }

    #[test]
    fn cusp_compiles_at_any_scale() {
        for scale in [1.0, 30.0] {
            let cusp = CubicBezier::new(
                Point2::new(0.0, 0.0),
                Point2::new(scale, scale),
                Point2::new(0.0, scale),
                Point2::new(scale, 0.0),
            );
            let out = PathCompiler::default().compile(&[cusp.into()]).unwrap();
            assert!(!out.is_empty());
            assert!(out.iter().all(|i| matches!(i, MotionInstruction::ArcMove { .. })));
            assert_eq!(final_position(Point2::origin(), &out), Point2::new(scale, 0.0));
        }
    }

    #[test]
    fn depth_errors_propagate() {
        let u_curve = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        );
        let compiler = PathCompiler::new(CompileOptions {
            max_split_depth: 0,
            depth_fallback: DepthFallback::Error,
            ..CompileOptions::default()
        })
        .unwrap();
        assert!(compiler.compile(&[u_curve.into()]).is_err());
    }
}
