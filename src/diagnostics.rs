//! Caller-supplied diagnostics for the compiler.
//!
//! Nothing in the crate logs globally. Operations that make non-obvious
//! decisions (subdividing a curve, falling back to a chord, inserting a travel
//! move) report them through a [`Diagnostics`] sink passed in by the caller.

use crate::math::Point2;

/// A decision taken while compiling shapes into motion.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileEvent {
    /// A pen-up travel move was inserted to reach the next shape.
    TravelInserted { from: Point2, to: Point2 },
    /// A cubic curve was flat enough to be drawn as its chord.
    FlatCurve { start: Point2, end: Point2 },
    /// A cubic curve was split at an interior inflection parameter.
    InflectionSplit { t: f64 },
    /// The end tangents of a curve were parallel or met behind it; it was bisected.
    Bisected { depth: u32 },
    /// Subdivision reached the depth cap and a chord was emitted instead.
    ChordFallback { depth: u32, start: Point2, end: Point2 },
    /// A move to the current pen position was dropped.
    ZeroLengthMoveDropped { at: Point2 },
}

/// Receives [`CompileEvent`]s.
pub trait Diagnostics {
    /// Records one event.
    fn record(&mut self, event: CompileEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn record(&mut self, _event: CompileEvent) {}
}

/// Collects events in order, for a result-carried trace.
impl Diagnostics for Vec<CompileEvent> {
    fn record(&mut self, event: CompileEvent) {
        self.push(event);
    }
}

/// Forwards events to `tracing` as structured events.
///
/// Fallbacks that lose fidelity are reported at `warn`, everything else at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&mut self, event: CompileEvent) {
        match event {
            CompileEvent::TravelInserted { from, to } => {
                tracing::debug!(
                    from.x = from.x,
                    from.y = from.y,
                    to.x = to.x,
                    to.y = to.y,
                    "travel move"
                );
            }
            CompileEvent::FlatCurve { start, end } => {
                tracing::debug!(
                    start.x = start.x,
                    start.y = start.y,
                    end.x = end.x,
                    end.y = end.y,
                    "flat curve drawn as chord"
                );
            }
            CompileEvent::InflectionSplit { t } => {
                tracing::debug!(t, "split at inflection point");
            }
            CompileEvent::Bisected { depth } => {
                tracing::debug!(depth, "no biarc apex, bisecting");
            }
            CompileEvent::ChordFallback { depth, start, end } => {
                tracing::warn!(
                    depth,
                    start.x = start.x,
                    start.y = start.y,
                    end.x = end.x,
                    end.y = end.y,
                    "subdivision depth reached, emitting chord"
                );
            }
            CompileEvent::ZeroLengthMoveDropped { at } => {
                tracing::debug!(x = at.x, y = at.y, "dropped zero-length move");
            }
        }
    }
}
