//! Structural equality within a tolerance.

use super::{check_tolerance, ensure_finite};
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::primitives::Coord;
use num_traits::Float;

/// Returns `true` if two geometries have the same kind and structure and
/// every pair of corresponding coordinates lies within `tolerance`.
///
/// Unlike [`equals`](crate::equals), this compares representations: vertex
/// order, ring start and member order all matter, so a polygon and the same
/// polygon with its shell reversed are not exactly equal.
///
/// # Example
///
/// ```
/// use planum::transform::equals_exact;
/// use planum::{Geometry, LineString};
///
/// let a: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]).into();
/// let b: Geometry<f64> = LineString::from(vec![(0.0, 0.05), (1.0, 1.0)]).into();
/// assert!(equals_exact(&a, &b, 0.1).unwrap());
/// assert!(!equals_exact(&a, &b, 0.01).unwrap());
/// ```
pub fn equals_exact<F: Float>(a: &Geometry<F>, b: &Geometry<F>, tolerance: F) -> Result<bool, PlanumError> {
    check_tolerance(tolerance)?;
    ensure_finite(a)?;
    ensure_finite(b)?;
    Ok(exact(a, b, tolerance))
}

fn exact<F: Float>(a: &Geometry<F>, b: &Geometry<F>, tolerance: F) -> bool {
    match (a, b) {
        (Geometry::Point(p), Geometry::Point(q)) => p.distance(*q) <= tolerance,
        (Geometry::MultiPoint(p), Geometry::MultiPoint(q)) => coords_match(p, q, tolerance),
        (Geometry::LineString(l), Geometry::LineString(m)) => lines_match(l, m, tolerance),
        (Geometry::MultiLineString(l), Geometry::MultiLineString(m)) => {
            l.len() == m.len() && l.iter().zip(m).all(|(l, m)| lines_match(l, m, tolerance))
        }
        (Geometry::Polygon(p), Geometry::Polygon(q)) => polygons_match(p, q, tolerance),
        (Geometry::MultiPolygon(p), Geometry::MultiPolygon(q)) => {
            p.len() == q.len() && p.iter().zip(q).all(|(p, q)| polygons_match(p, q, tolerance))
        }
        (Geometry::GeometryCollection(g), Geometry::GeometryCollection(h)) => {
            g.len() == h.len() && g.iter().zip(h).all(|(g, h)| exact(g, h, tolerance))
        }
        _ => false,
    }
}

fn coords_match<F: Float>(a: &[Coord<F>], b: &[Coord<F>], tolerance: F) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.distance(*q) <= tolerance)
}

fn lines_match<F: Float>(a: &LineString<F>, b: &LineString<F>, tolerance: F) -> bool {
    coords_match(a.coords(), b.coords(), tolerance)
}

fn polygons_match<F: Float>(a: &Polygon<F>, b: &Polygon<F>, tolerance: F) -> bool {
    lines_match(a.exterior(), b.exterior(), tolerance)
        && a.interiors().len() == b.interiors().len()
        && a.interiors()
            .iter()
            .zip(b.interiors())
            .all(|(h, k)| lines_match(h, k, tolerance))
}
