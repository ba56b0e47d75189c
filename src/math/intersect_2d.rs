use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
/// Parallelism is judged on the sine of the angle between the directions, so
/// the test does not depend on the length of `d1` or `d2`.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    let scale = d1.norm() * d2.norm();
    if scale <= 0.0 || cross.abs() <= TOLERANCE * scale {
        return None;
    }
    let delta = p2 - p1;
    let t = delta.perp(d2) / cross;
    let u = delta.perp(d1) / cross;
    Some((t, u))
}

/// Rotates a direction by -90 degrees: `(dx, dy) -> (dy, -dx)`.
#[must_use]
pub fn rotate_cw(d: &Vector2) -> Vector2 {
    Vector2::new(d.y, -d.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn crossing_axes() {
        let (t, u) = line_line_intersect_2d(
            &Point2::new(-1.0, 0.0),
            &Vector2::new(2.0, 0.0),
            &Point2::new(0.0, -3.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(u, 3.0);
    }

    #[test]
    fn parallel_lines_do_not_meet() {
        let hit = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 1.0),
            &Point2::new(0.0, 1.0),
            &Vector2::new(-3.0, -3.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn parallel_test_is_scale_free() {
        // Nearly parallel but clearly distinct directions, with tiny vectors.
        let hit = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1e-6, 0.0),
            &Point2::new(0.0, 1.0),
            &Vector2::new(1e-6, 1e-7),
        );
        assert!(hit.is_some());
    }

    #[test]
    fn short_perpendicular_lines_meet() {
        let (t, u) = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1e-6, 0.0),
            &Point2::new(0.0, 0.0),
            &Vector2::new(0.0, 1e-6),
        )
        .unwrap();
        assert_relative_eq!(t, 0.0);
        assert_relative_eq!(u, 0.0);
    }

    #[test]
    fn zero_direction_never_meets() {
        let hit = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::zeros(),
            &Point2::new(0.0, 1.0),
            &Vector2::new(1.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn rotation_is_perpendicular() {
        let d = Vector2::new(3.0, 4.0);
        let r = rotate_cw(&d);
        assert_relative_eq!(d.dot(&r), 0.0);
        assert_eq!(r, Vector2::new(4.0, -3.0));
    }
}
