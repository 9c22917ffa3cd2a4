//! Combinatorial boundary.

use super::ensure_finite;
use crate::clipping::{combine, lines_geometry, points_geometry};
use crate::error::PlanumError;
use crate::geometry::{Geometry, Polygon};
use crate::relate::mod2_boundary;
use num_traits::Float;
use std::slice;

/// Boundary of a geometry.
///
/// - Points have an empty boundary.
/// - Lines are bounded by the endpoints that occur an odd number of times
///   (Mod-2 rule), returned as points in lexicographic order. Closed lines
///   have an empty boundary.
/// - Polygons are bounded by their rings, returned as lines.
/// - Collections combine the boundaries of their members.
///
/// # Example
///
/// ```
/// use planum::transform::boundary;
/// use planum::{Coord, Geometry, LineString};
///
/// let line: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]).into();
/// assert_eq!(
///     boundary(&line).unwrap(),
///     Geometry::MultiPoint(vec![Coord::new(0.0, 0.0), Coord::new(2.0, 0.0)])
/// );
/// ```
pub fn boundary<F: Float>(geometry: &Geometry<F>) -> Result<Geometry<F>, PlanumError> {
    ensure_finite(geometry)?;
    Ok(boundary_of(geometry))
}

fn boundary_of<F: Float>(geometry: &Geometry<F>) -> Geometry<F> {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => Geometry::empty(),
        Geometry::LineString(line) => points_geometry(mod2_boundary(slice::from_ref(line))),
        Geometry::MultiLineString(lines) => points_geometry(mod2_boundary(lines)),
        Geometry::Polygon(polygon) => rings_geometry(slice::from_ref(polygon)),
        Geometry::MultiPolygon(polygons) => rings_geometry(polygons),
        Geometry::GeometryCollection(members) => combine(members.iter().map(boundary_of).collect()),
    }
}

fn rings_geometry<F: Float>(polygons: &[Polygon<F>]) -> Geometry<F> {
    lines_geometry(
        polygons
            .iter()
            .flat_map(Polygon::rings)
            .filter(|r| !r.is_empty())
            .cloned()
            .collect(),
    )
}
