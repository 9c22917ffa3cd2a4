//! Ring primitives: signed area, point-in-ring location and validation.
//!
//! A ring is a closed coordinate sequence (first == last) with at least four
//! coordinates and three distinct vertices. Counter-clockwise rings have
//! positive signed area.

use super::coord::{Coord, OrdCoord};
use super::segment::{on_segment, orient2d, segment_intersection, Orientation, SegmentIntersection};
use crate::bounds::{sweep_pairs, Bound};
use crate::error::{PlanumError, RingDefect};
use num_traits::Float;
use std::collections::BTreeSet;

/// Location of a point relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    /// Row/column index in an intersection matrix.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }
}

/// Returns `true` if the sequence has at least one coordinate and first == last.
#[inline]
pub fn is_closed<F: Float>(ring: &[Coord<F>]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => first == last,
        _ => false,
    }
}

/// Computes the signed area of a ring with the shoelace formula.
///
/// Positive for counter-clockwise rings, negative for clockwise ones. The
/// closing segment is implied when the ring is not explicitly closed.
///
/// # Example
///
/// ```
/// use planum::primitives::{signed_area, Coord};
///
/// let square = [
///     Coord::new(0.0, 0.0),
///     Coord::new(2.0, 0.0),
///     Coord::new(2.0, 2.0),
///     Coord::new(0.0, 2.0),
///     Coord::new(0.0, 0.0),
/// ];
/// assert_eq!(signed_area(&square), 4.0);
/// ```
pub fn signed_area<F: Float>(ring: &[Coord<F>]) -> F {
    let n = ring.len();
    if n < 3 {
        return F::zero();
    }
    // Translate to the first vertex to keep products small.
    let origin = ring[0];
    let mut twice = F::zero();
    for i in 0..n {
        let a = ring[i] - origin;
        let b = ring[(i + 1) % n] - origin;
        twice = twice + a.cross(b);
    }
    twice / (F::one() + F::one())
}

/// Locates a point against a ring.
///
/// Points on a ring segment are on the `Boundary`. Otherwise the crossing
/// number decides between `Interior` and `Exterior`; ring orientation does
/// not matter.
pub fn locate_in_ring<F: Float>(p: Coord<F>, ring: &[Coord<F>]) -> Location {
    let mut inside = false;
    for (a, b) in ring_segments(ring) {
        if on_segment(p, a, b) {
            return Location::Boundary;
        }
        if a.y <= p.y {
            if b.y > p.y && orient2d(a, b, p) == Orientation::CounterClockwise {
                inside = !inside;
            }
        } else if b.y <= p.y && orient2d(a, b, p) == Orientation::Clockwise {
            inside = !inside;
        }
    }
    if inside {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Iterates the segments of a ring, adding the closing segment when the
/// sequence is not explicitly closed.
pub(crate) fn ring_segments<F: Float>(
    ring: &[Coord<F>],
) -> impl Iterator<Item = (Coord<F>, Coord<F>)> + '_ {
    let closing = if ring.len() > 1 && !is_closed(ring) {
        Some((ring[ring.len() - 1], ring[0]))
    } else {
        None
    };
    ring.windows(2).map(|w| (w[0], w[1])).chain(closing)
}

/// Removes consecutive duplicate coordinates.
pub(crate) fn dedup_consecutive<F: Float>(coords: &[Coord<F>]) -> Vec<Coord<F>> {
    let mut out: Vec<Coord<F>> = Vec::with_capacity(coords.len());
    for &c in coords {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
    out
}

/// Validates a single ring.
///
/// Checks, in order: finite coordinates, at least four coordinates, closure,
/// at least three distinct vertices, non-zero area and simplicity.
pub fn validate_ring<F: Float>(ring: &[Coord<F>]) -> Result<(), PlanumError> {
    if !ring.iter().all(|c| c.is_finite()) {
        return Err(PlanumError::InvalidCoordinate);
    }
    if ring.len() < 4 {
        return Err(PlanumError::ring(RingDefect::TooFewPoints { count: ring.len() }));
    }
    if !is_closed(ring) {
        return Err(PlanumError::ring(RingDefect::NotClosed));
    }
    let distinct: BTreeSet<OrdCoord<F>> = ring[..ring.len() - 1].iter().map(|&c| OrdCoord(c)).collect();
    if distinct.len() < 3 {
        return Err(PlanumError::ring(RingDefect::TooFewDistinctVertices));
    }
    if signed_area(ring) == F::zero() {
        return Err(PlanumError::ring(RingDefect::ZeroArea));
    }
    if let Some(p) = find_self_intersection(ring) {
        return Err(PlanumError::ring(RingDefect::SelfIntersection {
            x: p.x.to_f64().unwrap_or(f64::NAN),
            y: p.y.to_f64().unwrap_or(f64::NAN),
        }));
    }
    Ok(())
}

/// Finds a point where a closed ring touches or crosses itself.
///
/// Repeated consecutive vertices are ignored. Adjacent segments may share
/// only their common vertex; any other contact is reported.
pub fn find_self_intersection<F: Float>(ring: &[Coord<F>]) -> Option<Coord<F>> {
    let pts = dedup_consecutive(ring);
    if pts.len() < 4 {
        return None;
    }
    let m = pts.len() - 1;
    let bounds: Vec<Bound<F>> = (0..m)
        .map(|i| Bound::from_corners(pts[i], pts[i + 1]))
        .collect();

    let mut hits: Vec<Coord<F>> = Vec::new();
    for (i, j) in sweep_pairs(&bounds) {
        let hit = segment_intersection(pts[i], pts[i + 1], pts[j], pts[j + 1]);
        let shared = if j == i + 1 {
            Some(pts[j])
        } else if i == 0 && j == m - 1 {
            Some(pts[0])
        } else {
            None
        };
        match (hit, shared) {
            (SegmentIntersection::None, _) => {}
            (SegmentIntersection::Point(p), Some(s)) if p == s => {}
            (SegmentIntersection::Point(p), _) => hits.push(p),
            (SegmentIntersection::Collinear(a, _), _) => hits.push(a),
        }
    }
    // Report the lexicographically smallest point so the result is stable.
    hits.into_iter().min_by(|a, b| a.lex_cmp(b))
}
