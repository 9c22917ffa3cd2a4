//! Line segments, orientation and segment intersection.

use super::coord::Coord;
use num_traits::Float;
use std::cmp::Ordering;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points turn left (positive area).
    CounterClockwise,
    /// Points turn right (negative area).
    Clockwise,
    /// Points lie on one line.
    Collinear,
}

/// Computes the orientation of the triangle `a`, `b`, `c`.
///
/// Uses the sign of the cross product `(b - a) x (c - a)` with no tolerance.
/// `CounterClockwise` means `c` lies to the left of the directed line `a -> b`.
#[inline]
pub fn orient2d<F: Float>(a: Coord<F>, b: Coord<F>, c: Coord<F>) -> Orientation {
    let det = (b - a).cross(c - a);
    if det > F::zero() {
        Orientation::CounterClockwise
    } else if det < F::zero() {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// A line segment between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<F> {
    pub start: Coord<F>,
    pub end: Coord<F>,
}

impl<F: Float> Segment<F> {
    /// Creates a new segment.
    #[inline]
    pub fn new(start: Coord<F>, end: Coord<F>) -> Self {
        Self { start, end }
    }

    /// Direction vector from start to end.
    #[inline]
    pub fn direction(self) -> Coord<F> {
        self.end - self.start
    }

    /// Length of the segment.
    #[inline]
    pub fn length(self) -> F {
        self.start.distance(self.end)
    }

    /// Returns `true` if start and end coincide.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }

    /// Point at parameter `t` (0 = start, 1 = end).
    #[inline]
    pub fn point_at(self, t: F) -> Coord<F> {
        self.start.lerp(self.end, t)
    }

    /// Closest point on the segment to `p`.
    pub fn closest_point(self, p: Coord<F>) -> Coord<F> {
        let v = self.direction();
        let len_sq = v.dot(v);
        if len_sq == F::zero() {
            return self.start;
        }
        let t = ((p - self.start).dot(v) / len_sq).max(F::zero()).min(F::one());
        self.point_at(t)
    }

    /// Euclidean distance from `p` to the segment.
    #[inline]
    pub fn distance_to_point(self, p: Coord<F>) -> F {
        p.distance(self.closest_point(p))
    }

    /// Returns `true` if `p` lies exactly on the segment.
    #[inline]
    pub fn contains(self, p: Coord<F>) -> bool {
        on_segment(p, self.start, self.end)
    }
}

/// Result of intersecting two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    /// The segments do not meet.
    None,
    /// The segments meet in a single point.
    ///
    /// When the segments touch at an endpoint, this is that endpoint's exact
    /// input coordinate.
    Point(Coord<F>),
    /// The segments are collinear and share the sub-segment between the two
    /// coordinates, which are always input endpoints.
    Collinear(Coord<F>, Coord<F>),
}

/// Intersects segment `p1 p2` with segment `q1 q2`.
///
/// Classifies proper crossings, touching at endpoints and collinear overlap.
/// The result does not depend on the order of the arguments or on the
/// direction of either segment.
///
/// # Example
///
/// ```
/// use planum::primitives::{segment_intersection, Coord, SegmentIntersection};
///
/// let hit = segment_intersection(
///     Coord::new(0.0, 0.0),
///     Coord::new(4.0, 0.0),
///     Coord::new(2.0, 0.0),
///     Coord::new(6.0, 0.0),
/// );
/// assert_eq!(
///     hit,
///     SegmentIntersection::Collinear(Coord::new(2.0, 0.0), Coord::new(4.0, 0.0))
/// );
/// ```
pub fn segment_intersection<F: Float>(
    p1: Coord<F>,
    p2: Coord<F>,
    q1: Coord<F>,
    q2: Coord<F>,
) -> SegmentIntersection<F> {
    let (p1, p2) = ordered(p1, p2);
    let (q1, q2) = ordered(q1, q2);
    // Evaluate every pair in one canonical order so computed crossing points
    // are bit-identical no matter which operand comes first.
    let ((p1, p2), (q1, q2)) = if (p1.lex_cmp(&q1)).then_with(|| p2.lex_cmp(&q2)) == Ordering::Greater
    {
        ((q1, q2), (p1, p2))
    } else {
        ((p1, p2), (q1, q2))
    };

    if !envelopes_overlap(p1, p2, q1, q2) {
        return SegmentIntersection::None;
    }

    if p1 == p2 {
        return if on_segment(p1, q1, q2) {
            SegmentIntersection::Point(p1)
        } else {
            SegmentIntersection::None
        };
    }
    if q1 == q2 {
        return if on_segment(q1, p1, p2) {
            SegmentIntersection::Point(q1)
        } else {
            SegmentIntersection::None
        };
    }

    let o1 = orient2d(p1, p2, q1);
    let o2 = orient2d(p1, p2, q2);
    let o3 = orient2d(q1, q2, p1);
    let o4 = orient2d(q1, q2, p2);

    if (o1 == Orientation::Collinear && o2 == Orientation::Collinear)
        || (o3 == Orientation::Collinear && o4 == Orientation::Collinear)
    {
        return collinear_overlap(p1, p2, q1, q2);
    }

    if o1 == o2 || o3 == o4 {
        return SegmentIntersection::None;
    }

    // Touching: an endpoint lies on the other segment.
    if o1 == Orientation::Collinear {
        return SegmentIntersection::Point(q1);
    }
    if o2 == Orientation::Collinear {
        return SegmentIntersection::Point(q2);
    }
    if o3 == Orientation::Collinear {
        return SegmentIntersection::Point(p1);
    }
    if o4 == Orientation::Collinear {
        return SegmentIntersection::Point(p2);
    }

    SegmentIntersection::Point(proper_crossing(p1, p2, q1, q2))
}

/// Returns `true` if `p` lies on the closed segment `a b`.
#[inline]
pub(crate) fn on_segment<F: Float>(p: Coord<F>, a: Coord<F>, b: Coord<F>) -> bool {
    if p == a || p == b {
        return true;
    }
    in_envelope(p, a, b) && orient2d(a, b, p) == Orientation::Collinear
}

#[inline]
fn in_envelope<F: Float>(p: Coord<F>, a: Coord<F>, b: Coord<F>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

#[inline]
fn envelopes_overlap<F: Float>(p1: Coord<F>, p2: Coord<F>, q1: Coord<F>, q2: Coord<F>) -> bool {
    p1.x.max(p2.x) >= q1.x.min(q2.x)
        && q1.x.max(q2.x) >= p1.x.min(p2.x)
        && p1.y.max(p2.y) >= q1.y.min(q2.y)
        && q1.y.max(q2.y) >= p1.y.min(p2.y)
}

#[inline]
fn ordered<F: Float>(a: Coord<F>, b: Coord<F>) -> (Coord<F>, Coord<F>) {
    if a.lex_cmp(&b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}

/// Overlap of two collinear segments whose endpoints are lexicographically ordered.
fn collinear_overlap<F: Float>(
    p1: Coord<F>,
    p2: Coord<F>,
    q1: Coord<F>,
    q2: Coord<F>,
) -> SegmentIntersection<F> {
    let start = if p1.lex_cmp(&q1) == Ordering::Less { q1 } else { p1 };
    let end = if p2.lex_cmp(&q2) == Ordering::Greater { q2 } else { p2 };
    match start.lex_cmp(&end) {
        Ordering::Greater => SegmentIntersection::None,
        Ordering::Equal => SegmentIntersection::Point(start),
        Ordering::Less => SegmentIntersection::Collinear(start, end),
    }
}

/// Crossing point of two segments known to cross properly.
///
/// The computed point is clamped into both envelopes so round-off can never
/// push it off either segment's extent.
fn proper_crossing<F: Float>(p1: Coord<F>, p2: Coord<F>, q1: Coord<F>, q2: Coord<F>) -> Coord<F> {
    let d1 = p2 - p1;
    let d2 = q2 - q1;
    let t = (q1 - p1).cross(d2) / d1.cross(d2);
    let c = p1 + d1 * t;

    let min_x = p1.x.min(p2.x).max(q1.x.min(q2.x));
    let max_x = p1.x.max(p2.x).min(q1.x.max(q2.x));
    let min_y = p1.y.min(p2.y).max(q1.y.min(q2.y));
    let max_y = p1.y.max(p2.y).min(q1.y.max(q2.y));
    Coord::new(c.x.max(min_x).min(max_x), c.y.max(min_y).min(max_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    #[test]
    fn test_orient2d() {
        assert_eq!(
            orient2d(c(0.0, 0.0), c(1.0, 0.0), c(0.5, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orient2d(c(0.0, 0.0), c(1.0, 0.0), c(0.5, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orient2d(c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)),
            Orientation::Collinear
        );
    }

    #[test]
    fn test_orient2d_has_no_hidden_tolerance() {
        assert_eq!(
            orient2d(c(0.0, 0.0), c(1.0, 0.0), c(0.5, 1e-300)),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn test_proper_crossing() {
        match segment_intersection(c(0.0, 0.0), c(2.0, 2.0), c(0.0, 2.0), c(2.0, 0.0)) {
            SegmentIntersection::Point(p) => {
                assert_relative_eq!(p.x, 1.0);
                assert_relative_eq!(p.y, 1.0);
            }
            other => panic!("expected a crossing, got {other:?}"),
        }
    }

    #[test]
    fn test_crossing_is_symmetric() {
        let a = (c(0.1, 0.3), c(7.3, 2.9));
        let b = (c(0.7, 4.1), c(5.9, -1.3));
        let ab = segment_intersection(a.0, a.1, b.0, b.1);
        let ba = segment_intersection(b.1, b.0, a.1, a.0);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_touching_returns_exact_endpoint() {
        let t = segment_intersection(c(0.0, 0.0), c(10.0, 0.0), c(3.3, 0.0), c(3.3, 5.0));
        assert_eq!(t, SegmentIntersection::Point(c(3.3, 0.0)));

        let t = segment_intersection(c(0.0, 0.0), c(5.0, 5.0), c(5.0, 5.0), c(10.0, 0.0));
        assert_eq!(t, SegmentIntersection::Point(c(5.0, 5.0)));
    }

    #[test]
    fn test_no_intersection() {
        assert_eq!(
            segment_intersection(c(0.0, 0.0), c(1.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)),
            SegmentIntersection::None
        );
        assert_eq!(
            segment_intersection(c(0.0, 0.0), c(4.0, 4.0), c(6.0, 4.0), c(10.0, 0.0)),
            SegmentIntersection::None
        );
    }

    #[test]
    fn test_collinear_cases() {
        assert_eq!(
            segment_intersection(c(0.0, 0.0), c(5.0, 0.0), c(10.0, 0.0), c(15.0, 0.0)),
            SegmentIntersection::None
        );
        assert_eq!(
            segment_intersection(c(0.0, 0.0), c(5.0, 0.0), c(5.0, 0.0), c(10.0, 0.0)),
            SegmentIntersection::Point(c(5.0, 0.0))
        );
        assert_eq!(
            segment_intersection(c(0.0, 0.0), c(10.0, 0.0), c(8.0, 0.0), c(2.0, 0.0)),
            SegmentIntersection::Collinear(c(2.0, 0.0), c(8.0, 0.0))
        );
        assert_eq!(
            segment_intersection(c(0.0, 10.0), c(0.0, 0.0), c(0.0, 5.0), c(0.0, 15.0)),
            SegmentIntersection::Collinear(c(0.0, 5.0), c(0.0, 10.0))
        );
    }

    #[test]
    fn test_degenerate_segment() {
        assert_eq!(
            segment_intersection(c(1.0, 1.0), c(1.0, 1.0), c(0.0, 0.0), c(2.0, 2.0)),
            SegmentIntersection::Point(c(1.0, 1.0))
        );
        assert_eq!(
            segment_intersection(c(1.0, 2.0), c(1.0, 2.0), c(0.0, 0.0), c(2.0, 2.0)),
            SegmentIntersection::None
        );
    }

    #[test]
    fn test_segment_distance() {
        let s = Segment::new(c(0.0, 0.0), c(10.0, 0.0));
        assert_relative_eq!(s.distance_to_point(c(5.0, 3.0)), 3.0);
        assert_relative_eq!(s.distance_to_point(c(-4.0, 3.0)), 5.0);
        assert!(s.contains(c(7.5, 0.0)));
        assert!(!s.contains(c(10.5, 0.0)));
    }
}
