use crate::error::{GeometryError, PlotError, Result};
use crate::math::{lerp, points_coincide, Point2, Vector2, TOLERANCE};

use super::{CircularArc, Curve2d, LineSegment};

/// Inflection parameters closer than this to either end are ignored.
const PARAM_EPSILON: f64 = 1e-9;

/// A cubic Bézier curve with endpoints `p1`, `p2` and control points `c1`, `c2`.
///
/// The winding of the control polygon is computed once at construction and
/// used as the traversal direction of the arcs produced by [`Self::to_biarc`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    p1: Point2,
    c1: Point2,
    c2: Point2,
    p2: Point2,
    clockwise: bool,
}

/// Interior inflection parameters of a cubic, in ascending order.
///
/// A slot is `None` when there is no corresponding root in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InflectionPoints {
    pub first: Option<f64>,
    pub second: Option<f64>,
}

impl InflectionPoints {
    fn from_roots(mut roots: Vec<f64>) -> Self {
        roots.retain(|t| *t > PARAM_EPSILON && *t < 1.0 - PARAM_EPSILON);
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|a, b| (*a - *b).abs() < PARAM_EPSILON);
        Self {
            first: roots.first().copied(),
            second: roots.get(1).copied(),
        }
    }

    /// Iterates over the present parameters, ascending.
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        self.first.into_iter().chain(self.second)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// Two circular arcs meeting tangentially at a shared join point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biarc {
    pub first: CircularArc,
    pub second: CircularArc,
}

impl Biarc {
    /// The point where the two arcs meet.
    #[must_use]
    pub fn join(&self) -> Point2 {
        self.first.end_point()
    }
}

impl CubicBezier {
    /// Creates a new cubic curve.
    #[must_use]
    pub fn new(p1: Point2, c1: Point2, c2: Point2, p2: Point2) -> Self {
        let clockwise = control_polygon_area2(&[p1, c1, c2, p2]) < 0.0;
        Self {
            p1,
            c1,
            c2,
            p2,
            clockwise,
        }
    }

    #[must_use]
    pub fn p1(&self) -> &Point2 {
        &self.p1
    }

    #[must_use]
    pub fn c1(&self) -> &Point2 {
        &self.c1
    }

    #[must_use]
    pub fn c2(&self) -> &Point2 {
        &self.c2
    }

    #[must_use]
    pub fn p2(&self) -> &Point2 {
        &self.p2
    }

    /// Winding of the control polygon; the arc direction used by [`Self::to_biarc`].
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    /// Splits the curve at `t` by de Casteljau subdivision.
    ///
    /// Both halves share the point `point_at(t)`.
    #[must_use]
    pub fn split_at(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let p0 = lerp(&self.p1, &self.c1, t);
        let p1 = lerp(&self.c1, &self.c2, t);
        let p2 = lerp(&self.c2, &self.p2, t);

        let p01 = lerp(&p0, &p1, t);
        let p12 = lerp(&p1, &p2, t);

        let dp = lerp(&p01, &p12, t);

        (
            CubicBezier::new(self.p1, p0, p01, dp),
            CubicBezier::new(dp, p12, p2, self.p2),
        )
    }

    /// Finds the parameters in `(0, 1)` where the curvature changes sign.
    ///
    /// With `A = c1 - p1`, `B = c2 - c1 - A` and `C = p2 - c2 - A - 2B`, the
    /// inflections are the roots of `a t² + b t + c` where `a = B × C`,
    /// `b = A × C` and `c = A × B`. A vanishing `a` leaves a linear equation,
    /// which is solved directly; if `b` vanishes too there is no root.
    #[must_use]
    pub fn inflection_points(&self) -> InflectionPoints {
        let a_vec = self.c1 - self.p1;
        let b_vec = self.c2 - self.c1 - a_vec;
        let c_vec = self.p2 - self.c2 - a_vec - b_vec * 2.0;

        let a = b_vec.perp(&c_vec);
        let b = a_vec.perp(&c_vec);
        let c = a_vec.perp(&b_vec);

        // a, b and c are all quadratic in the coordinates.
        let scale = a_vec.norm_squared() + b_vec.norm_squared() + c_vec.norm_squared();
        let eps = TOLERANCE * scale;

        if a.abs() <= eps {
            if b.abs() <= eps {
                return InflectionPoints::default();
            }
            return InflectionPoints::from_roots(vec![-c / b]);
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return InflectionPoints::default();
        }
        // Numerically stable form: q = -(b + sign(b) * sqrt(d)) / 2.
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let mut roots = vec![q / a];
        if q.abs() > eps {
            roots.push(c / q);
        }
        InflectionPoints::from_roots(roots)
    }

    /// Splits the curve at its interior inflection points.
    ///
    /// Every returned piece has a curvature of constant sign. A curve without
    /// inflections is returned as a single piece.
    #[must_use]
    pub fn split_at_inflections(&self) -> Vec<CubicBezier> {
        let mut pieces = Vec::with_capacity(3);
        let mut rest = *self;
        let mut consumed = 0.0;
        for t in self.inflection_points().iter() {
            // Map the global parameter onto what remains of the curve.
            let local = (t - consumed) / (1.0 - consumed);
            let (head, tail) = rest.split_at(local);
            pieces.push(head);
            rest = tail;
            consumed = t;
        }
        pieces.push(rest);
        pieces
    }

    /// Returns `true` when neither control point coincides with its endpoint.
    #[must_use]
    pub fn has_end_tangents(&self) -> bool {
        !points_coincide(&self.p1, &self.c1) && !points_coincide(&self.p2, &self.c2)
    }

    /// Returns `true` when both control points lie within `tolerance` of the chord.
    #[must_use]
    pub fn is_flat(&self, tolerance: f64) -> bool {
        let chord = self.p2 - self.p1;
        let len = chord.norm();
        let off_chord = |c: &Point2| -> f64 {
            let v = c - self.p1;
            if len <= TOLERANCE {
                v.norm()
            } else {
                chord.perp(&v).abs() / len
            }
        };
        off_chord(&self.c1) <= tolerance && off_chord(&self.c2) <= tolerance
    }

    /// Approximates the curve by two tangent-continuous circular arcs.
    ///
    /// The join point is the incenter of the triangle formed by the endpoints
    /// and the intersection `V` of the end tangents. Each arc center lies on
    /// the normal at its endpoint and on the perpendicular bisector of the
    /// chord from that endpoint to the join point.
    ///
    /// Only meaningful for curves without interior inflection points; see
    /// [`Self::split_at_inflections`]. When a control point coincides with its
    /// endpoint, as on either side of a cusp, the tangent there is taken
    /// towards the next distinct control point.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InvalidCurve` if every other control point coincides
    ///   with an endpoint
    /// - `GeometryError::ParallelTangents` if the end tangents never meet
    /// - `GeometryError::TangentsDiverge` if they meet behind an endpoint
    /// - any other `GeometryError` if the construction degenerates
    pub fn to_biarc(&self) -> Result<Biarc> {
        let tangent1 = Self::tangent_line(&self.p1, [&self.c1, &self.c2, &self.p2], "start")?;
        let tangent2 = Self::tangent_line(&self.p2, [&self.c2, &self.c1, &self.p1], "end")?;

        let v = tangent1.intersect(&tangent2).map_err(|err| match err {
            PlotError::Geometry(GeometryError::ParallelLines) => {
                GeometryError::ParallelTangents.into()
            }
            other => other,
        })?;
        if !ahead_of(&self.p1, &tangent1.direction(), &v)
            || !ahead_of(&self.p2, &tangent2.direction(), &v)
        {
            return Err(GeometryError::TangentsDiverge.into());
        }

        // Incenter: vertices weighted by the length of the opposite side.
        let l_p1 = nalgebra::distance(&self.p2, &v);
        let l_p2 = nalgebra::distance(&self.p1, &v);
        let l_v = nalgebra::distance(&self.p1, &self.p2);
        let g = Point2::from(
            (self.p1.coords * l_p1 + self.p2.coords * l_p2 + v.coords * l_v) / (l_p1 + l_p2 + l_v),
        );

        let q1 = Self::arc_center(&tangent1, &self.p1, &g)?;
        let q2 = Self::arc_center(&tangent2, &self.p2, &g)?;

        Ok(Biarc {
            first: CircularArc::new(self.p1, g, q1, self.clockwise)?,
            second: CircularArc::new(g, self.p2, q2, self.clockwise)?,
        })
    }

    /// Tangent line at `end`, towards the first of `towards` distinct from it.
    fn tangent_line(end: &Point2, towards: [&Point2; 3], which: &str) -> Result<LineSegment> {
        let Some(next) = towards.into_iter().find(|p| !points_coincide(end, p)) else {
            return Err(GeometryError::InvalidCurve(format!(
                "all control points coincide with the {which} point, tangent is undefined"
            ))
            .into());
        };
        LineSegment::new(*end, *next)
    }

    /// Center of the circle tangent to `tangent` at `end` that passes through `join`.
    fn arc_center(tangent: &LineSegment, end: &Point2, join: &Point2) -> Result<Point2> {
        let normal = tangent.perpendicular_at(end);
        let midpoint = lerp(end, join, 0.5);
        let bisector = LineSegment::new(*end, *join)?.perpendicular_at(&midpoint);
        normal.intersect(&bisector)
    }
}

impl Curve2d for CubicBezier {
    fn point_at(&self, t: f64) -> Point2 {
        let mt = 1.0 - t;
        let coords = self.p1.coords * (mt * mt * mt)
            + self.c1.coords * (3.0 * mt * mt * t)
            + self.c2.coords * (3.0 * mt * t * t)
            + self.p2.coords * (t * t * t);
        Point2::from(coords)
    }

    fn start_point(&self) -> Point2 {
        self.p1
    }

    fn end_point(&self) -> Point2 {
        self.p2
    }
}

/// Shoelace sum over the closed control polygon: `Σ (x₂ - x₁)(y₂ + y₁)`.
fn control_polygon_area2(points: &[Point2; 4]) -> f64 {
    (0..4)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % 4];
            (b.x - a.x) * (b.y + a.y)
        })
        .sum()
}

/// `true` when `p` lies strictly in front of `origin` along `dir`.
fn ahead_of(origin: &Point2, dir: &Vector2, p: &Point2) -> bool {
    (p - origin).dot(dir) > 0.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn bez(pts: [(f64, f64); 4]) -> CubicBezier {
        let [a, b, c, d] = pts.map(|(x, y)| Point2::new(x, y));
        CubicBezier::new(a, b, c, d)
    }

    /// Quarter circle of radius 10 about the origin, counter-clockwise in y-up.
    fn quarter_circle() -> CubicBezier {
        let k = 10.0 * 0.552_284_749_8;
        bez([(10.0, 0.0), (10.0, k), (k, 10.0), (0.0, 10.0)])
    }

    #[test]
    fn winding_from_control_polygon() {
        assert!(quarter_circle().is_clockwise());
        assert!(!bez([(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)]).is_clockwise());
    }

    #[test]
    fn point_at_endpoints() {
        let c = bez([(0.0, 0.0), (1.0, 3.0), (2.0, -1.0), (5.0, 2.0)]);
        assert_eq!(c.point_at(0.0), Point2::new(0.0, 0.0));
        assert_eq!(c.point_at(1.0), Point2::new(5.0, 2.0));
    }

    #[test]
    fn split_reproduces_parent() {
        let c = bez([(0.0, 0.0), (1.0, 3.0), (2.0, -1.0), (5.0, 2.0)]);
        for &t in &[0.1, 0.3, 0.5, 0.77] {
            let (left, right) = c.split_at(t);
            assert_eq!(left.end_point(), right.start_point());
            assert_abs_diff_eq!(left.end_point(), c.point_at(t), epsilon = 1e-10);
            for i in 0..=10 {
                let s = f64::from(i) / 10.0;
                assert_abs_diff_eq!(left.point_at(s), c.point_at(s * t), epsilon = 1e-9);
                assert_abs_diff_eq!(
                    right.point_at(s),
                    c.point_at(t + s * (1.0 - t)),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn symmetric_s_curve_has_single_inflection() {
        let c = bez([(0.0, 0.0), (1.0, 2.0), (3.0, -2.0), (4.0, 0.0)]);
        let inflections = c.inflection_points();
        assert_relative_eq!(inflections.first.unwrap(), 0.5, epsilon = 1e-12);
        assert_eq!(inflections.second, None);
        assert_eq!(inflections.len(), 1);
    }

    #[test]
    fn two_inflections_ascending() {
        let c = bez([(0.0, 0.0), (0.0, 1.0), (-2.0, 1.0), (4.0, 0.0)]);
        let inflections = c.inflection_points();
        let sqrt5 = 5.0_f64.sqrt();
        assert_relative_eq!(inflections.first.unwrap(), (5.0 - sqrt5) / 10.0, epsilon = 1e-9);
        assert_relative_eq!(inflections.second.unwrap(), (5.0 + sqrt5) / 10.0, epsilon = 1e-9);
    }

    #[test]
    fn arch_has_no_inflection() {
        let c = bez([(0.0, 0.0), (3.0, 4.0), (-1.0, 4.0), (2.0, 0.0)]);
        assert!(c.inflection_points().is_empty());
        assert!(quarter_circle().inflection_points().is_empty());
    }

    #[test]
    fn straight_curve_has_no_inflection() {
        let c = bez([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert!(c.inflection_points().is_empty());
        assert!(c.is_flat(1e-9));
    }

    #[test]
    fn split_at_inflections_gives_constant_winding() {
        let c = bez([(0.0, 0.0), (0.0, 1.0), (-2.0, 1.0), (4.0, 0.0)]);
        let pieces = c.split_at_inflections();
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].start_point(), c.start_point());
        assert_eq!(pieces[2].end_point(), c.end_point());
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].end_point(), pair[1].start_point());
        }
        for piece in &pieces {
            assert!(piece.inflection_points().is_empty());
        }
        let first = (5.0 - 5.0_f64.sqrt()) / 10.0;
        assert_abs_diff_eq!(pieces[1].start_point(), c.point_at(first), epsilon = 1e-9);
    }

    #[test]
    fn biarc_of_quarter_circle_is_the_circle() {
        let c = quarter_circle();
        let biarc = c.to_biarc().unwrap();

        assert_eq!(biarc.first.start_point(), *c.p1());
        assert_eq!(biarc.second.end_point(), *c.p2());
        assert_eq!(biarc.first.end_point(), biarc.second.start_point());

        let half = 50.0_f64.sqrt();
        assert_abs_diff_eq!(biarc.join(), Point2::new(half, half), epsilon = 1e-9);
        for arc in [biarc.first, biarc.second] {
            assert_abs_diff_eq!(*arc.center(), Point2::origin(), epsilon = 1e-9);
            assert_relative_eq!(arc.radius(), 10.0, epsilon = 1e-9);
            assert!(arc.clockwise());
            assert!(arc.sweep_angle() > 0.0);
        }
    }

    #[test]
    fn join_lies_on_both_circles() {
        let c = bez([(0.0, 0.0), (1.0, 2.0), (4.0, 3.0), (6.0, 1.0)]);
        assert!(c.inflection_points().is_empty());
        let biarc = c.to_biarc().unwrap();
        let g = biarc.join();
        for arc in [biarc.first, biarc.second] {
            let distance = nalgebra::distance(arc.center(), &g);
            assert_relative_eq!(distance, arc.radius(), epsilon = 1e-9);
        }
        assert_eq!(biarc.first.start_point(), *c.p1());
        assert_eq!(biarc.second.end_point(), *c.p2());
    }

    #[test]
    fn biarc_stays_close_to_gentle_curve() {
        let c = bez([(0.0, 0.0), (1.0, 2.0), (4.0, 3.0), (6.0, 1.0)]);
        let biarc = c.to_biarc().unwrap();
        for arc in [biarc.first, biarc.second] {
            let mid = arc.point_at(0.5);
            let nearest = (0..=1000)
                .map(|i| nalgebra::distance(&c.point_at(f64::from(i) / 1000.0), &mid))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 0.2, "arc midpoint {mid} is {nearest} from the curve");
        }
    }

    #[test]
    fn parallel_tangents_are_reported() {
        let c = bez([(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let err = c.to_biarc().unwrap_err();
        assert_eq!(err.as_geometry(), Some(&GeometryError::ParallelTangents));
    }

    #[test]
    fn diverging_tangents_are_reported() {
        let c = bez([(0.0, 0.0), (-5.0, 10.0), (15.0, 10.0), (10.0, 0.0)]);
        let err = c.to_biarc().unwrap_err();
        assert_eq!(err.as_geometry(), Some(&GeometryError::TangentsDiverge));
    }

    #[test]
    fn coincident_control_point_takes_next_tangent() {
        let c = bez([(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert!(!c.has_end_tangents());
        let biarc = c.to_biarc().unwrap();
        assert_abs_diff_eq!(biarc.join().x, 1.0, epsilon = 1e-12);
        assert_eq!(biarc.second.end_point(), *c.p2());
    }

    #[test]
    fn halves_at_a_cusp_have_biarcs() {
        let c = bez([(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)]);
        let inflections = c.inflection_points();
        assert_relative_eq!(inflections.first.unwrap(), 0.5, epsilon = 1e-12);
        assert_eq!(inflections.second, None);

        let pieces = c.split_at_inflections();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].c2(), pieces[0].p2());
        assert_eq!(pieces[1].c1(), pieces[1].p1());
        for piece in &pieces {
            let biarc = piece.to_biarc().unwrap();
            assert_eq!(biarc.first.start_point(), *piece.p1());
            assert_eq!(biarc.second.end_point(), *piece.p2());
        }
    }

    #[test]
    fn point_curve_has_no_tangent() {
        let c = bez([(1.0, 1.0); 4]);
        let err = c.to_biarc().unwrap_err();
        assert!(matches!(err.as_geometry(), Some(GeometryError::InvalidCurve(_))));
    }

    #[test]
    fn flatness_tolerance() {
        let c = bez([(0.0, 0.0), (1.0, 0.01), (2.0, -0.01), (3.0, 0.0)]);
        assert!(c.is_flat(0.02));
        assert!(!c.is_flat(0.001));
    }
}
