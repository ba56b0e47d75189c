mod biarc;
mod compile;

pub use biarc::{ArcPiece, BiarcApproximation};
pub use compile::{final_position, PathCompiler};

use crate::error::{CompileError, Result};
use crate::geometry::SineStrategy;

/// What to do when bisecting a curve reaches [`CompileOptions::max_split_depth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthFallback {
    /// Draw the remaining piece as a straight chord.
    #[default]
    Chord,
    /// Fail with `CompileError::UnboundedRecursion`.
    Error,
}

/// Parameters controlling curve-to-motion compilation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompileOptions {
    /// How many times a curve may be bisected while searching for a biarc.
    pub max_split_depth: u32,
    /// Curves whose control points are this close to the chord are drawn as lines.
    pub flatness_tolerance: f64,
    /// Decomposition used for sine waves.
    pub sine_strategy: SineStrategy,
    pub depth_fallback: DepthFallback,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_split_depth: 8,
            flatness_tolerance: 1e-4,
            sine_strategy: SineStrategy::Eighth,
            depth_fallback: DepthFallback::Chord,
        }
    }
}

impl CompileOptions {
    /// Checks that the options are usable.
    ///
    /// # Errors
    ///
    /// Returns `CompileError::InvalidInput` if the flatness tolerance is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.flatness_tolerance.is_finite() || self.flatness_tolerance < 0.0 {
            return Err(CompileError::InvalidInput(format!(
                "flatness tolerance must be a non-negative number, got {}",
                self.flatness_tolerance
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CompileOptions::default();
        assert_eq!(options.max_split_depth, 8);
        assert_eq!(options.sine_strategy, SineStrategy::Eighth);
        assert_eq!(options.depth_fallback, DepthFallback::Chord);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn negative_tolerance_rejected() {
        let options = CompileOptions {
            flatness_tolerance: -1.0,
            ..CompileOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
