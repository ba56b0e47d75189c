use crate::diagnostics::{CompileEvent, Diagnostics};
use crate::error::{CompileError, GeometryError, PlotError, Result};
use crate::geometry::{CircularArc, CubicBezier, Curve2d, LineSegment};
use crate::motion::MotionInstruction;

use super::{CompileOptions, DepthFallback};

/// One piece of a curve approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcPiece {
    Arc(CircularArc),
    Chord(LineSegment),
}

impl ArcPiece {
    /// Motion for this piece, assuming the pen is at its start.
    #[must_use]
    pub fn to_motion(&self) -> Vec<MotionInstruction> {
        match self {
            Self::Arc(arc) => arc.to_motion(),
            Self::Chord(line) => line.to_motion(),
        }
    }

    #[must_use]
    pub fn as_curve(&self) -> &dyn Curve2d {
        match self {
            Self::Arc(arc) => arc,
            Self::Chord(line) => line,
        }
    }
}

/// Approximates a cubic curve by circular arcs.
///
/// # Algorithm
///
/// 1. A curve that is flat within tolerance becomes its chord.
/// 2. The curve is split at its interior inflection points so every piece
///    has a single winding direction.
/// 3. Each piece is replaced by a biarc. When the end tangents of a piece
///    are parallel or meet behind it, the piece is bisected and both halves
///    are retried, up to `max_split_depth` levels. Past that depth the
///    configured [`DepthFallback`] applies.
///
/// Any other geometry error is returned to the caller.
#[derive(Debug)]
pub struct BiarcApproximation<'a> {
    curve: CubicBezier,
    options: &'a CompileOptions,
}

impl<'a> BiarcApproximation<'a> {
    /// Creates a new approximation operation.
    #[must_use]
    pub fn new(curve: CubicBezier, options: &'a CompileOptions) -> Self {
        Self { curve, options }
    }

    /// Executes the approximation, returning pieces in drawing order.
    ///
    /// Consecutive pieces share endpoints; the first starts at the curve's
    /// start and the last ends at its end. Zero-length chords are omitted.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InvalidCurve` if a control point of the curve
    ///   coincides with its endpoint
    /// - `CompileError::UnboundedRecursion` if the depth cap is reached and
    ///   the fallback is [`DepthFallback::Error`]
    /// - `GeometryError` if a biarc construction degenerates for any reason
    ///   other than its end tangents
    pub fn execute(&self, diagnostics: &mut dyn Diagnostics) -> Result<Vec<ArcPiece>> {
        let mut pieces = Vec::new();

        if self.curve.is_flat(self.options.flatness_tolerance) {
            diagnostics.record(CompileEvent::FlatCurve {
                start: self.curve.start_point(),
                end: self.curve.end_point(),
            });
            push_chord(&mut pieces, &self.curve);
            return Ok(pieces);
        }
        if !self.curve.has_end_tangents() {
            return Err(GeometryError::InvalidCurve(
                "control point coincides with its endpoint, tangent is undefined".into(),
            )
            .into());
        }

        for t in self.curve.inflection_points().iter() {
            diagnostics.record(CompileEvent::InflectionSplit { t });
        }
        for segment in self.curve.split_at_inflections() {
            self.approximate(&segment, 0, diagnostics, &mut pieces)?;
        }
        Ok(pieces)
    }

    fn approximate(
        &self,
        segment: &CubicBezier,
        depth: u32,
        diagnostics: &mut dyn Diagnostics,
        pieces: &mut Vec<ArcPiece>,
    ) -> Result<()> {
        if segment.is_flat(self.options.flatness_tolerance) {
            push_chord(pieces, segment);
            return Ok(());
        }

        match segment.to_biarc() {
            Ok(biarc) => {
                pieces.push(ArcPiece::Arc(biarc.first));
                pieces.push(ArcPiece::Arc(biarc.second));
                Ok(())
            }
            Err(PlotError::Geometry(
                GeometryError::ParallelTangents | GeometryError::TangentsDiverge,
            )) => {
                if depth >= self.options.max_split_depth {
                    return match self.options.depth_fallback {
                        DepthFallback::Chord => {
                            diagnostics.record(CompileEvent::ChordFallback {
                                depth,
                                start: segment.start_point(),
                                end: segment.end_point(),
                            });
                            push_chord(pieces, segment);
                            Ok(())
                        }
                        DepthFallback::Error => {
                            Err(CompileError::UnboundedRecursion { depth }.into())
                        }
                    };
                }
                diagnostics.record(CompileEvent::Bisected { depth });
                let (head, tail) = segment.split_at(0.5);
                self.approximate(&head, depth + 1, diagnostics, pieces)?;
                self.approximate(&tail, depth + 1, diagnostics, pieces)
            }
            Err(err) => Err(err),
        }
    }
}

/// Pushes the chord of `segment`. Zero-length chords are dropped.
fn push_chord(pieces: &mut Vec<ArcPiece>, segment: &CubicBezier) {
    if let Ok(chord) = LineSegment::new(segment.start_point(), segment.end_point()) {
        pieces.push(ArcPiece::Chord(chord));
    }
}
