//! 2D circular arc math utilities.
//!
//! Angles are `atan2` angles measured about the arc center. A positive sweep
//! increases the angle; arcs flagged `clockwise` always carry a positive sweep.
use std::f64::consts::{PI, TAU};

use super::Point2;

/// Signed sweep from `start_angle` to `end_angle` traversed in the direction
/// given by `clockwise`.
///
/// The raw difference is wrapped by a full turn when its sign disagrees with
/// the requested direction, so the result is never the short way round by
/// accident. Equal angles give a zero sweep.
#[must_use]
pub fn sweep_from_angles(start_angle: f64, end_angle: f64, clockwise: bool) -> f64 {
    let sweep = end_angle - start_angle;
    if sweep < 0.0 && clockwise {
        sweep + TAU
    } else if sweep > 0.0 && !clockwise {
        sweep - TAU
    } else {
        sweep
    }
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Computes the number of line segments needed to approximate an arc
/// within the given tolerance.
#[must_use]
pub fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> u32 {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // From the sagitta formula: sagitta = r * (1 - cos(θ/2))
    // For a given tolerance: θ = 2 * acos(1 - tolerance/r)
    let max_angle = if tolerance >= radius {
        PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as u32;
    n.max(1)
}
