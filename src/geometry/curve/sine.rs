use std::f64::consts::{FRAC_1_SQRT_2, PI, TAU};

use crate::error::{GeometryError, Result};
use crate::math::Point2;

use super::{CubicBezier, Curve2d};

/// Control point x offset of the two-segment fit, as a fraction of the wavelength.
const HALF_FIT_X: f64 = 0.205_165;
/// Control point height of the two-segment fit, as a fraction of the amplitude.
const HALF_FIT_Y: f64 = 1.335_837;

/// `(sin θ, cos θ)` at the quarter-period breakpoints of the first half period.
const QUARTER_TABLE: [(f64, f64); 3] = [(0.0, 1.0), (1.0, 0.0), (0.0, -1.0)];

/// `(sin θ, cos θ)` at the eighth-period breakpoints of the first half period.
const EIGHTH_TABLE: [(f64, f64); 5] = [
    (0.0, 1.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (1.0, 0.0),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (0.0, -1.0),
];

/// How a sine period is reduced to cubic curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SineStrategy {
    /// Four segments, one per quarter period, interpolating value and slope
    /// at the extrema and zero crossings. Coarsest.
    Quarter,
    /// Two segments, one per half period, with least-squares fitted control
    /// points. Close to the sine on its own, but the biarc joins are poorer.
    Half,
    /// Eight segments, one per eighth period. Every segment keeps a single
    /// curvature sign, so it is the default for motion output.
    #[default]
    Eighth,
}

impl SineStrategy {
    /// Number of cubic segments produced for one period.
    #[must_use]
    pub fn segment_count(self) -> usize {
        match self {
            Self::Quarter => 4,
            Self::Half => 2,
            Self::Eighth => 8,
        }
    }
}

/// One period of `y = amplitude * sin(2π (x - origin.x) / wavelength)`,
/// offset by `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineWave {
    origin: Point2,
    amplitude: f64,
    wavelength: f64,
}

impl SineWave {
    /// Creates a new sine wave.
    ///
    /// # Errors
    ///
    /// - `GeometryError::ParameterOutOfRange` if `wavelength` is not positive and finite
    /// - `GeometryError::InvalidCurve` if `amplitude` is not finite
    pub fn new(origin: Point2, amplitude: f64, wavelength: f64) -> Result<Self> {
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "wavelength",
                value: wavelength,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        if !amplitude.is_finite() {
            return Err(GeometryError::InvalidCurve(format!(
                "sine amplitude {amplitude} is not finite"
            ))
            .into());
        }
        Ok(Self {
            origin,
            amplitude,
            wavelength,
        })
    }

    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    #[must_use]
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    #[must_use]
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Reduces the period to cubic curves, in drawing order.
    #[must_use]
    pub fn to_beziers(&self, strategy: SineStrategy) -> Vec<CubicBezier> {
        match strategy {
            SineStrategy::Quarter => self.hermite_segments(&QUARTER_TABLE),
            SineStrategy::Half => self.half_segments(),
            SineStrategy::Eighth => self.hermite_segments(&EIGHTH_TABLE),
        }
    }

    /// Cubic Hermite segments between the breakpoints of `table`.
    ///
    /// `table` covers the first half period; the second half is its point
    /// reflection (`sin(θ + π) = -sin θ`, `cos(θ + π) = -cos θ`).
    fn hermite_segments(&self, table: &[(f64, f64)]) -> Vec<CubicBezier> {
        let per_half = table.len() - 1;
        let total = 2 * per_half;
        #[allow(clippy::cast_precision_loss)]
        let theta_step = PI / per_half as f64;
        // Control handles sit a third of the way along each segment.
        let handle = theta_step / 3.0;
        let dx = self.wavelength * handle / TAU;

        let breakpoint = |index: usize| -> (Point2, f64) {
            let (sin, cos) = if index <= per_half {
                table[index]
            } else {
                let (sin, cos) = table[index - per_half];
                (-sin, -cos)
            };
            #[allow(clippy::cast_precision_loss)]
            let x = self.origin.x + self.wavelength * index as f64 / total as f64;
            (Point2::new(x, self.origin.y + self.amplitude * sin), cos)
        };

        (0..total)
            .map(|k| {
                let (p1, cos1) = breakpoint(k);
                let (p2, cos2) = breakpoint(k + 1);
                let c1 = Point2::new(p1.x + dx, p1.y + self.amplitude * handle * cos1);
                let c2 = Point2::new(p2.x - dx, p2.y - self.amplitude * handle * cos2);
                CubicBezier::new(p1, c1, c2, p2)
            })
            .collect()
    }

    fn half_segments(&self) -> Vec<CubicBezier> {
        let half = self.wavelength * 0.5;
        let reach = self.wavelength * HALF_FIT_X;
        let height = self.amplitude * HALF_FIT_Y;
        [1.0, -1.0]
            .iter()
            .enumerate()
            .map(|(i, sign)| {
                #[allow(clippy::cast_precision_loss)]
                let x0 = self.origin.x + half * i as f64;
                let y = self.origin.y + sign * height;
                CubicBezier::new(
                    Point2::new(x0, self.origin.y),
                    Point2::new(x0 + reach, y),
                    Point2::new(x0 + half - reach, y),
                    Point2::new(x0 + half, self.origin.y),
                )
            })
            .collect()
    }
}

impl Curve2d for SineWave {
    fn point_at(&self, t: f64) -> Point2 {
        Point2::new(
            self.origin.x + t * self.wavelength,
            self.origin.y + self.amplitude * (TAU * t).sin(),
        )
    }

    fn start_point(&self) -> Point2 {
        self.origin
    }

    fn end_point(&self) -> Point2 {
        Point2::new(self.origin.x + self.wavelength, self.origin.y)
    }
}
