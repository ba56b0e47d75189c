mod tessellate_motion;
mod tessellate_shape;

pub use tessellate_motion::TessellateMotion;
pub use tessellate_shape::TessellateShape;

use crate::error::{Result, TessellationError};
use crate::math::Point2;

/// Parameters controlling preview tessellation quality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationParams {
    /// Maximum allowed deviation from the true geometry.
    pub tolerance: f64,
    /// Minimum number of segments for curves.
    pub min_segments: u32,
    /// Maximum number of segments for curves.
    pub max_segments: u32,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}

impl TessellationParams {
    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if the tolerance is not
    /// positive or the segment bounds are empty.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(TessellationError::InvalidParameters(
                "tolerance must be positive".to_owned(),
            )
            .into());
        }
        if self.min_segments == 0 || self.min_segments > self.max_segments {
            return Err(TessellationError::InvalidParameters(format!(
                "segment bounds {}..={} are invalid",
                self.min_segments, self.max_segments
            ))
            .into());
        }
        Ok(())
    }

    fn clamp_segments(&self, n: u32) -> u32 {
        n.clamp(self.min_segments, self.max_segments)
    }
}

/// A polyline approximation of a curve or stroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(TessellationParams::default().validate().is_ok());
    }

    #[test]
    fn bad_params_rejected() {
        let zero_tol = TessellationParams {
            tolerance: 0.0,
            ..TessellationParams::default()
        };
        assert!(zero_tol.validate().is_err());
        let nan_tol = TessellationParams {
            tolerance: f64::NAN,
            ..TessellationParams::default()
        };
        assert!(nan_tol.validate().is_err());
        let inverted = TessellationParams {
            min_segments: 10,
            max_segments: 2,
            ..TessellationParams::default()
        };
        assert!(inverted.validate().is_err());
    }
}
