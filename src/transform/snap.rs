//! Snapping one geometry's vertices to another's.

use super::{check_tolerance, ensure_finite};
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::primitives::{dedup_consecutive, Coord, OrdCoord, Segment};
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Snaps the vertices of `input` to the vertices of `reference`.
///
/// Every input vertex within `tolerance` of a reference vertex moves onto
/// the nearest one. Every reference vertex within `tolerance` of an input
/// segment is then inserted into that segment. Closed rings stay closed;
/// the result is not revalidated.
///
/// # Example
///
/// ```
/// use planum::transform::snap;
/// use planum::{Coord, Geometry, LineString};
///
/// let input: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (10.0, 0.1)]).into();
/// let reference = Geometry::MultiPoint(vec![Coord::new(10.0, 0.0), Coord::new(5.0, 0.02)]);
///
/// let snapped = snap(&input, &reference, 0.5).unwrap();
/// assert_eq!(
///     snapped,
///     Geometry::LineString(LineString::from(vec![(0.0, 0.0), (5.0, 0.02), (10.0, 0.0)]))
/// );
/// ```
pub fn snap<F: Float>(
    input: &Geometry<F>,
    reference: &Geometry<F>,
    tolerance: F,
) -> Result<Geometry<F>, PlanumError> {
    check_tolerance(tolerance)?;
    ensure_finite(input)?;
    ensure_finite(reference)?;

    let mut seen = BTreeSet::new();
    let targets: Vec<Coord<F>> = reference
        .coords()
        .into_iter()
        .filter(|&c| seen.insert(OrdCoord(c)))
        .collect();
    let snapper = Snapper { targets, tolerance };
    Ok(snapper.geometry(input))
}

struct Snapper<F> {
    targets: Vec<Coord<F>>,
    tolerance: F,
}

impl<F: Float> Snapper<F> {
    fn geometry(&self, geometry: &Geometry<F>) -> Geometry<F> {
        match geometry {
            Geometry::Point(p) => Geometry::Point(self.vertex(*p)),
            Geometry::MultiPoint(points) => {
                Geometry::MultiPoint(points.iter().map(|&p| self.vertex(p)).collect())
            }
            Geometry::LineString(line) => Geometry::LineString(self.line(line)),
            Geometry::MultiLineString(lines) => {
                Geometry::MultiLineString(lines.iter().map(|l| self.line(l)).collect())
            }
            Geometry::Polygon(polygon) => Geometry::Polygon(self.polygon(polygon)),
            Geometry::MultiPolygon(polygons) => {
                Geometry::MultiPolygon(polygons.iter().map(|p| self.polygon(p)).collect())
            }
            Geometry::GeometryCollection(members) => {
                Geometry::GeometryCollection(members.iter().map(|m| self.geometry(m)).collect())
            }
        }
    }

    fn polygon(&self, polygon: &Polygon<F>) -> Polygon<F> {
        Polygon::new(
            self.line(polygon.exterior()),
            polygon.interiors().iter().map(|h| self.line(h)).collect(),
        )
    }

    /// Nearest target within tolerance, or `p` itself.
    fn vertex(&self, p: Coord<F>) -> Coord<F> {
        let limit = self.tolerance * self.tolerance;
        self.targets
            .iter()
            .map(|&t| (t, t.distance_squared(p)))
            .filter(|&(_, d)| d <= limit)
            .min_by(|x, y| x.1.partial_cmp(&y.1).unwrap_or(Ordering::Equal))
            .map_or(p, |(t, _)| t)
    }

    fn line(&self, line: &LineString<F>) -> LineString<F> {
        let snapped: Vec<Coord<F>> = line.coords().iter().map(|&p| self.vertex(p)).collect();
        let mut out: Vec<Coord<F>> = Vec::with_capacity(snapped.len());
        for (i, &a) in snapped.iter().enumerate() {
            out.push(a);
            if let Some(&b) = snapped.get(i + 1) {
                out.extend(self.inserted(a, b));
            }
        }
        LineString::new(dedup_consecutive(&out))
    }

    /// Targets close to the interior of segment `a`-`b`, ordered from `a`.
    fn inserted(&self, a: Coord<F>, b: Coord<F>) -> Vec<Coord<F>> {
        let segment = Segment::new(a, b);
        if segment.is_degenerate() {
            return Vec::new();
        }
        let dir = segment.direction();
        let mut hits: Vec<(F, Coord<F>)> = self
            .targets
            .iter()
            .copied()
            .filter(|&t| t != a && t != b && segment.distance_to_point(t) <= self.tolerance)
            .map(|t| ((t - a).dot(dir), t))
            .filter(|&(along, _)| along > F::zero() && along < dir.dot(dir))
            .collect();
        hits.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(Ordering::Equal));
        hits.into_iter().map(|(_, t)| t).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    #[test]
    fn test_vertices_move_to_nearest() {
        let input = Geometry::MultiPoint(vec![c(0.1, 0.0), c(5.0, 5.0)]);
        let reference = Geometry::MultiPoint(vec![c(0.0, 0.0), c(0.3, 0.0)]);
        assert_eq!(
            snap(&input, &reference, 0.5).unwrap(),
            Geometry::MultiPoint(vec![c(0.0, 0.0), c(5.0, 5.0)])
        );
    }

    #[test]
    fn test_ring_stays_closed() {
        let square: Geometry<f64> = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]),
            vec![],
        )
        .into();
        let reference = Geometry::MultiPoint(vec![c(0.05, -0.05), c(1.0, 0.01)]);
        match snap(&square, &reference, 0.1).unwrap() {
            Geometry::Polygon(p) => {
                let ring = p.exterior().coords();
                assert_eq!(ring.first(), ring.last());
                assert_eq!(ring[0], c(0.05, -0.05));
                assert_eq!(ring[1], c(1.0, 0.01));
                assert_eq!(ring.len(), 6);
            }
            other => panic!("expected a polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_tolerance_only_exact_hits() {
        let line: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]).into();
        let reference = Geometry::Point(c(0.5, 0.5));
        assert_eq!(
            snap(&line, &reference, 0.0).unwrap(),
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)]))
        );
        let far = Geometry::Point(c(0.5, 0.6));
        assert_eq!(snap(&line, &far, 0.0).unwrap(), line);
    }

    #[test]
    fn test_negative_tolerance() {
        let p = Geometry::Point(c(0.0, 0.0));
        assert!(snap(&p, &p, -0.1).is_err());
    }
}
