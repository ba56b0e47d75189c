//! The ordered instruction stream consumed by a plotter transport.

pub mod gcode;

pub use gcode::{GcodeConfig, GcodeWriter, Units};

use crate::math::Point2;

/// One machine-motion primitive.
///
/// Coordinates are in drawing units. Arc center offsets `i`/`j` are relative
/// to the arc's start point, i.e. the pen position before the move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionInstruction {
    PenUp,
    PenDown,
    LinearMove { x: f64, y: f64 },
    ArcMove {
        x: f64,
        y: f64,
        i: f64,
        j: f64,
        clockwise: bool,
    },
}

impl MotionInstruction {
    /// Creates a linear move to `p`.
    #[must_use]
    pub fn linear_to(p: &Point2) -> Self {
        Self::LinearMove { x: p.x, y: p.y }
    }

    /// Returns the position a move ends at, or `None` for pen changes.
    #[must_use]
    pub fn target(&self) -> Option<Point2> {
        match *self {
            Self::LinearMove { x, y } | Self::ArcMove { x, y, .. } => Some(Point2::new(x, y)),
            Self::PenUp | Self::PenDown => None,
        }
    }

    /// Returns `true` for linear and arc moves.
    #[must_use]
    pub fn is_move(&self) -> bool {
        self.target().is_some()
    }
}
