//! Point location against any geometry.

use crate::bounds::Bound;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::graph::Operand;
use crate::primitives::{on_segment, Coord, Location, OrdCoord};
use num_traits::Float;
use std::collections::{BTreeMap, BTreeSet};
use std::slice;

/// Locates a point against a geometry.
///
/// - Points: `Interior` when equal to a member point; points have no boundary.
/// - Lines: `Boundary` at endpoints that occur an odd number of times among
///   the non-closed lines (Mod-2 rule), `Interior` elsewhere on a line.
/// - Polygons: `Interior` inside any member, `Boundary` on any ring.
/// - Collections: `Interior` if any member says so, else `Boundary` if any
///   member says so.
///
/// # Example
///
/// ```
/// use planum::{locate, Coord, Geometry, LineString, Location};
///
/// let line: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]).into();
/// assert_eq!(locate(Coord::new(1.0, 0.0), &line), Location::Interior);
/// assert_eq!(locate(Coord::new(2.0, 0.0), &line), Location::Boundary);
/// assert_eq!(locate(Coord::new(1.0, 1.0), &line), Location::Exterior);
/// ```
pub fn locate<F: Float>(p: Coord<F>, geometry: &Geometry<F>) -> Location {
    match geometry {
        Geometry::Point(q) => PointLocator::puntal(slice::from_ref(q)).locate(p),
        Geometry::MultiPoint(points) => PointLocator::puntal(points).locate(p),
        Geometry::LineString(line) => PointLocator::lineal(slice::from_ref(line)).locate(p),
        Geometry::MultiLineString(lines) => PointLocator::lineal(lines).locate(p),
        Geometry::Polygon(polygon) => PointLocator::areal(slice::from_ref(polygon)).locate(p),
        Geometry::MultiPolygon(polygons) => PointLocator::areal(polygons).locate(p),
        Geometry::GeometryCollection(members) => {
            let mut result = Location::Exterior;
            for member in members {
                match locate(p, member) {
                    Location::Interior => return Location::Interior,
                    Location::Boundary => result = Location::Boundary,
                    Location::Exterior => {}
                }
            }
            result
        }
    }
}

/// Endpoints of the given lines that occur an odd number of times.
///
/// Closed lines contribute their endpoint twice and so never add to the
/// boundary. Returned in lexicographic order.
pub(crate) fn mod2_boundary<F: Float>(lines: &[LineString<F>]) -> Vec<Coord<F>> {
    let mut counts: BTreeMap<OrdCoord<F>, usize> = BTreeMap::new();
    for line in lines.iter().filter(|l| l.len() >= 2) {
        let coords = line.coords();
        for end in [coords[0], coords[coords.len() - 1]] {
            *counts.entry(OrdCoord(end)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| n % 2 == 1)
        .map(|(c, _)| c.0)
        .collect()
}

/// A point locator prepared for repeated queries against one operand.
pub(crate) enum PointLocator<'a, F> {
    Empty,
    Puntal(BTreeSet<OrdCoord<F>>),
    Lineal {
        lines: &'a [LineString<F>],
        bounds: Vec<Option<Bound<F>>>,
        boundary: BTreeSet<OrdCoord<F>>,
    },
    Areal {
        polygons: &'a [Polygon<F>],
        bounds: Vec<Option<Bound<F>>>,
    },
}

impl<'a, F: Float> PointLocator<'a, F> {
    pub(crate) fn new(operand: &'a Operand<F>) -> Self {
        match operand {
            Operand::Empty => PointLocator::Empty,
            Operand::Puntal(points) => Self::puntal(points),
            Operand::Lineal(lines) => Self::lineal(lines),
            Operand::Areal(polygons) => Self::areal(polygons),
        }
    }

    pub(crate) fn puntal(points: &[Coord<F>]) -> Self {
        PointLocator::Puntal(points.iter().map(|&c| OrdCoord(c)).collect())
    }

    pub(crate) fn lineal(lines: &'a [LineString<F>]) -> Self {
        PointLocator::Lineal {
            lines,
            bounds: lines.iter().map(LineString::bound).collect(),
            boundary: mod2_boundary(lines).into_iter().map(OrdCoord).collect(),
        }
    }

    pub(crate) fn areal(polygons: &'a [Polygon<F>]) -> Self {
        PointLocator::Areal {
            polygons,
            bounds: polygons.iter().map(Polygon::bound).collect(),
        }
    }

    pub(crate) fn locate(&self, p: Coord<F>) -> Location {
        self.locate_excluding(p, &[])
    }

    /// Whether `p` is a Mod-2 boundary endpoint of a lineal operand.
    pub(crate) fn is_line_boundary(&self, p: Coord<F>) -> bool {
        match self {
            PointLocator::Lineal { boundary, .. } => boundary.contains(&OrdCoord(p)),
            _ => false,
        }
    }

    /// Like [`locate`](Self::locate), ignoring the listed members of an
    /// areal operand.
    pub(crate) fn locate_excluding(&self, p: Coord<F>, skip: &[usize]) -> Location {
        match self {
            PointLocator::Empty => Location::Exterior,
            PointLocator::Puntal(points) => {
                if points.contains(&OrdCoord(p)) {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
            PointLocator::Lineal {
                lines,
                bounds,
                boundary,
            } => {
                if boundary.contains(&OrdCoord(p)) {
                    return Location::Boundary;
                }
                let on_line = lines.iter().zip(bounds).any(|(line, bound)| {
                    bound.map_or(false, |b| b.contains_coord(p))
                        && line.segments().any(|(a, b)| on_segment(p, a, b))
                });
                if on_line {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
            PointLocator::Areal { polygons, bounds } => {
                let mut result = Location::Exterior;
                for (member, (polygon, bound)) in polygons.iter().zip(bounds).enumerate() {
                    if skip.contains(&member) || !bound.map_or(false, |b| b.contains_coord(p)) {
                        continue;
                    }
                    match polygon.locate(p) {
                        Location::Interior => return Location::Interior,
                        Location::Boundary => result = Location::Boundary,
                        Location::Exterior => {}
                    }
                }
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::new(
            vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)].into(),
            Vec::new(),
        )
    }

    #[test]
    fn test_mod2_boundary() {
        let lines: Vec<LineString<f64>> = vec![
            vec![(0.0, 0.0), (1.0, 0.0)].into(),
            vec![(1.0, 0.0), (2.0, 0.0)].into(),
            vec![(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 5.0)].into(),
        ];
        assert_eq!(mod2_boundary(&lines), vec![c(0.0, 0.0), c(2.0, 0.0)]);
    }

    #[test]
    fn test_locate_points() {
        let g = Geometry::MultiPoint(vec![c(1.0, 1.0), c(2.0, 2.0)]);
        assert_eq!(locate(c(2.0, 2.0), &g), Location::Interior);
        assert_eq!(locate(c(3.0, 2.0), &g), Location::Exterior);
    }

    #[test]
    fn test_locate_multiline_shared_endpoint_is_interior() {
        let g = Geometry::MultiLineString(vec![
            vec![(0.0, 0.0), (1.0, 0.0)].into(),
            vec![(1.0, 0.0), (1.0, 1.0)].into(),
        ]);
        assert_eq!(locate(c(1.0, 0.0), &g), Location::Interior);
        assert_eq!(locate(c(0.0, 0.0), &g), Location::Boundary);
        assert_eq!(locate(c(1.0, 0.5), &g), Location::Interior);
    }

    #[test]
    fn test_locate_multipolygon_abutting() {
        let g = Geometry::MultiPolygon(vec![square(0.0, 0.0, 1.0, 1.0), square(1.0, 0.0, 2.0, 1.0)]);
        assert_eq!(locate(c(0.5, 0.5), &g), Location::Interior);
        assert_eq!(locate(c(1.0, 0.5), &g), Location::Boundary);
        assert_eq!(locate(c(3.0, 0.5), &g), Location::Exterior);
    }

    #[test]
    fn test_locate_collection_and_empty() {
        let g = Geometry::GeometryCollection(vec![
            Geometry::Point(c(5.0, 5.0)),
            square(0.0, 0.0, 1.0, 1.0).into(),
        ]);
        assert_eq!(locate(c(5.0, 5.0), &g), Location::Interior);
        assert_eq!(locate(c(0.0, 0.5), &g), Location::Boundary);
        assert_eq!(locate(c(0.5, 0.5), &Geometry::empty()), Location::Exterior);
    }

    #[test]
    fn test_locator_from_operand() {
        let operand = Operand::Areal(vec![square(0.0, 0.0, 2.0, 2.0)]);
        let locator = PointLocator::new(&operand);
        assert_eq!(locator.locate(c(1.0, 1.0)), Location::Interior);
        assert_eq!(locator.locate(c(2.0, 1.0)), Location::Boundary);
        assert_eq!(PointLocator::new(&Operand::Empty).locate(c(0.0, 0.0)), Location::Exterior);

        let pair = Operand::Areal(vec![square(0.0, 0.0, 2.0, 2.0), square(1.0, 1.0, 3.0, 3.0)]);
        let locator = PointLocator::new(&pair);
        assert_eq!(locator.locate_excluding(c(1.5, 1.5), &[0]), Location::Interior);
        assert_eq!(locator.locate_excluding(c(1.5, 2.0), &[0]), Location::Interior);
        assert_eq!(locator.locate_excluding(c(2.5, 1.0), &[0]), Location::Boundary);
        assert_eq!(locator.locate_excluding(c(0.5, 0.5), &[0]), Location::Exterior);
    }
}
