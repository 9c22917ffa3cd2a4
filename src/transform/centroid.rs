//! Centroids.

use super::ensure_finite;
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::primitives::Coord;
use crate::relate::Dimension;
use num_traits::Float;

/// Centre of mass of a geometry.
///
/// Polygonal geometries are weighted by area, lineal ones by length and
/// puntal ones count every point once. A collection uses only its members
/// of the highest dimension. Returns `None` for empty input.
pub fn centroid<F: Float>(geometry: &Geometry<F>) -> Result<Option<Coord<F>>, PlanumError> {
    ensure_finite(geometry)?;
    let mut parts = Parts::default();
    collect(geometry, geometry.dimension(), &mut parts);

    let c = match geometry.dimension() {
        Dimension::Empty => None,
        Dimension::Area => area_centroid(&parts.polygons).or_else(|| {
            let rings: Vec<LineString<F>> = parts
                .polygons
                .iter()
                .flat_map(|p| p.rings().cloned())
                .collect();
            line_centroid(&rings)
        }),
        Dimension::Line => line_centroid(&parts.lines).or_else(|| {
            let points: Vec<Coord<F>> = parts
                .lines
                .iter()
                .flat_map(|l| l.coords().iter().copied())
                .collect();
            point_centroid(&points)
        }),
        Dimension::Point => point_centroid(&parts.points),
    };
    Ok(c)
}

/// The members of one dimension, gathered from a geometry.
pub(super) struct Parts<F> {
    pub points: Vec<Coord<F>>,
    pub lines: Vec<LineString<F>>,
    pub polygons: Vec<Polygon<F>>,
}

impl<F> Default for Parts<F> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            lines: Vec::new(),
            polygons: Vec::new(),
        }
    }
}

pub(super) fn collect<F: Float>(geometry: &Geometry<F>, dim: Dimension, parts: &mut Parts<F>) {
    if geometry.dimension() != dim && !matches!(geometry, Geometry::GeometryCollection(_)) {
        return;
    }
    match geometry {
        Geometry::Point(p) => parts.points.push(*p),
        Geometry::MultiPoint(points) => parts.points.extend_from_slice(points),
        Geometry::LineString(line) => parts.lines.push(line.clone()),
        Geometry::MultiLineString(lines) => parts.lines.extend_from_slice(lines),
        Geometry::Polygon(polygon) => parts.polygons.push(polygon.clone()),
        Geometry::MultiPolygon(polygons) => parts.polygons.extend_from_slice(polygons),
        Geometry::GeometryCollection(members) => {
            for member in members {
                collect(member, dim, parts);
            }
        }
    }
}

fn area_centroid<F: Float>(polygons: &[Polygon<F>]) -> Option<Coord<F>> {
    let origin = polygons.iter().find_map(|p| p.exterior().coords().first().copied())?;
    let mut twice_area = F::zero();
    let mut moment = Coord::new(F::zero(), F::zero());
    for polygon in polygons.iter().map(Polygon::normalized) {
        for ring in polygon.rings() {
            for (a, b) in ring.segments() {
                let (a, b) = (a - origin, b - origin);
                let cross = a.cross(b);
                twice_area = twice_area + cross;
                moment = moment + (a + b) * cross;
            }
        }
    }
    if twice_area == F::zero() {
        return None;
    }
    let d = (F::one() + F::one() + F::one()) * twice_area;
    Some(origin + Coord::new(moment.x / d, moment.y / d))
}

fn line_centroid<F: Float>(lines: &[LineString<F>]) -> Option<Coord<F>> {
    let mut total = F::zero();
    let mut sum = Coord::new(F::zero(), F::zero());
    for (a, b) in lines.iter().flat_map(LineString::segments) {
        let len = a.distance(b);
        total = total + len;
        sum = sum + a.midpoint(b) * len;
    }
    (total > F::zero()).then(|| Coord::new(sum.x / total, sum.y / total))
}

fn point_centroid<F: Float>(points: &[Coord<F>]) -> Option<Coord<F>> {
    if points.is_empty() {
        return None;
    }
    let n = F::from(points.len())?;
    let sum = points
        .iter()
        .fold(Coord::new(F::zero(), F::zero()), |acc, &p| acc + p);
    Some(Coord::new(sum.x / n, sum.y / n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    #[test]
    fn test_polygon_with_hole() {
        let polygon: Geometry<f64> = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
            vec![LineString::from(vec![(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0), (1.0, 1.0)])],
        )
        .into();
        let centre = centroid(&polygon).unwrap().unwrap();
        // Area 16 at (2, 2) minus area 1 at (1.5, 1.5).
        assert_relative_eq!(centre.x, (16.0 * 2.0 - 1.5) / 15.0);
        assert_relative_eq!(centre.y, (16.0 * 2.0 - 1.5) / 15.0);
    }

    #[test]
    fn test_line_weighted_by_length() {
        let lines = Geometry::MultiLineString(vec![
            LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]),
            LineString::from(vec![(10.0, 0.0), (10.0, 1e-9)]),
        ]);
        let centre = centroid(&lines).unwrap().unwrap();
        assert_relative_eq!(centre.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_collection_uses_highest_dimension() {
        let g = Geometry::GeometryCollection(vec![
            Geometry::Point(c(100.0, 100.0)),
            LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]).into(),
        ]);
        assert_eq!(centroid(&g).unwrap(), Some(c(1.0, 0.0)));
    }

    #[test]
    fn test_points_and_empty() {
        let g = Geometry::MultiPoint(vec![c(0.0, 0.0), c(2.0, 0.0), c(1.0, 3.0)]);
        assert_eq!(centroid(&g).unwrap(), Some(c(1.0, 1.0)));
        assert_eq!(centroid::<f64>(&Geometry::empty()).unwrap(), None);
    }
}
