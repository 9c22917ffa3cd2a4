//! Minimum Cartesian distance between geometries.

use super::ensure_finite;
use crate::error::PlanumError;
use crate::geometry::{Geometry, Polygon};
use crate::primitives::{
    ring_segments, segment_intersection, Coord, Location, Segment, SegmentIntersection,
};
use num_traits::Float;

/// Minimum 2D Cartesian distance between two geometries.
///
/// Zero when the geometries intersect, including when one lies inside a
/// polygon of the other. Returns `None` if either geometry is empty.
///
/// # Example
///
/// ```
/// use planum::transform::distance;
/// use planum::{Coord, Geometry, LineString};
///
/// let line: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]).into();
/// let point = Geometry::Point(Coord::new(5.0, 3.0));
/// assert_eq!(distance(&line, &point).unwrap(), Some(3.0));
/// ```
pub fn distance<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<Option<F>, PlanumError> {
    ensure_finite(a)?;
    ensure_finite(b)?;
    let (pa, pb) = (Facets::of(a), Facets::of(b));
    if pa.is_empty() || pb.is_empty() {
        return Ok(None);
    }
    if pa.inside(&pb) || pb.inside(&pa) || pa.crosses(&pb) {
        return Ok(Some(F::zero()));
    }
    Ok(Some(pa.distance_to(&pb)))
}

/// A geometry broken into isolated points, segments and the polygons that
/// enclose area.
struct Facets<'a, F> {
    points: Vec<Coord<F>>,
    segments: Vec<Segment<F>>,
    polygons: Vec<&'a Polygon<F>>,
}

impl<'a, F: Float> Facets<'a, F> {
    fn of(geometry: &'a Geometry<F>) -> Self {
        let mut facets = Self {
            points: Vec::new(),
            segments: Vec::new(),
            polygons: Vec::new(),
        };
        facets.add(geometry);
        facets
    }

    fn add(&mut self, geometry: &'a Geometry<F>) {
        match geometry {
            Geometry::Point(p) => self.points.push(*p),
            Geometry::MultiPoint(points) => self.points.extend_from_slice(points),
            Geometry::LineString(line) => self.add_path(line.coords(), false),
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    self.add_path(line.coords(), false);
                }
            }
            Geometry::Polygon(polygon) => self.add_polygon(polygon),
            Geometry::MultiPolygon(polygons) => {
                for polygon in polygons {
                    self.add_polygon(polygon);
                }
            }
            Geometry::GeometryCollection(members) => {
                for member in members {
                    self.add(member);
                }
            }
        }
    }

    fn add_polygon(&mut self, polygon: &'a Polygon<F>) {
        if polygon.is_empty() {
            return;
        }
        for ring in polygon.rings() {
            self.add_path(ring.coords(), true);
        }
        self.polygons.push(polygon);
    }

    fn add_path(&mut self, coords: &[Coord<F>], ring: bool) {
        match coords {
            [] => {}
            [p] => self.points.push(*p),
            _ if ring => self
                .segments
                .extend(ring_segments(coords).map(|(s, e)| Segment::new(s, e))),
            _ => self
                .segments
                .extend(coords.windows(2).map(|w| Segment::new(w[0], w[1]))),
        }
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty() && self.segments.is_empty()
    }

    /// Some point or vertex of `self` lies in or on a polygon of `other`.
    fn inside(&self, other: &Self) -> bool {
        let vertices = self
            .points
            .iter()
            .copied()
            .chain(self.segments.iter().map(|s| s.start));
        other.polygons.iter().any(|polygon| {
            vertices
                .clone()
                .any(|p| polygon.locate(p) != Location::Exterior)
        })
    }

    fn crosses(&self, other: &Self) -> bool {
        self.segments.iter().any(|s| {
            other.segments.iter().any(|t| {
                segment_intersection(s.start, s.end, t.start, t.end) != SegmentIntersection::None
            })
        })
    }

    fn distance_to(&self, other: &Self) -> F {
        let mut best = F::infinity();
        for &p in &self.points {
            best = best.min(point_distance(p, other));
        }
        for &q in &other.points {
            best = best.min(point_distance(q, self));
        }
        for s in &self.segments {
            for t in &other.segments {
                let d = s
                    .distance_to_point(t.start)
                    .min(s.distance_to_point(t.end))
                    .min(t.distance_to_point(s.start))
                    .min(t.distance_to_point(s.end));
                best = best.min(d);
            }
        }
        best
    }
}

fn point_distance<F: Float>(p: Coord<F>, facets: &Facets<'_, F>) -> F {
    let to_points = facets
        .points
        .iter()
        .map(|&q| p.distance(q))
        .fold(F::infinity(), F::min);
    facets
        .segments
        .iter()
        .map(|s| s.distance_to_point(p))
        .fold(to_points, F::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LineString;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
        Polygon::new(
            LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
            vec![],
        )
        .into()
    }

    #[test]
    fn test_separated_squares() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(3.0, 0.5, 4.0, 2.0);
        assert_relative_eq!(distance(&a, &b).unwrap().unwrap(), 2.0);
    }

    #[test]
    fn test_point_inside_polygon() {
        let a = square(0.0, 0.0, 10.0, 10.0);
        let p = Geometry::Point(Coord::new(5.0, 5.0));
        assert_eq!(distance(&a, &p).unwrap(), Some(0.0));
        assert_eq!(distance(&p, &a).unwrap(), Some(0.0));
    }

    #[test]
    fn test_point_inside_hole() {
        let holed: Geometry<f64> = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from(vec![(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0), (2.0, 2.0)])],
        )
        .into();
        let p = Geometry::Point(Coord::new(5.0, 4.0));
        assert_relative_eq!(distance(&holed, &p).unwrap().unwrap(), 2.0);
    }

    #[test]
    fn test_crossing_lines() {
        let a: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (1.0, 3.0)]).into();
        let b: Geometry<f64> = LineString::from(vec![(0.0, 1.0), (3.0, 0.0)]).into();
        assert_eq!(distance(&a, &b).unwrap(), Some(0.0));
    }

    #[test]
    fn test_skew_segments() {
        let a: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (4.0, 0.0)]).into();
        let b: Geometry<f64> = LineString::from(vec![(2.0, 1.0), (3.0, 5.0)]).into();
        assert_relative_eq!(distance(&a, &b).unwrap().unwrap(), 1.0);
    }

    #[test]
    fn test_empty_operand() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        assert_eq!(distance(&a, &Geometry::empty()).unwrap(), None);
    }
}
