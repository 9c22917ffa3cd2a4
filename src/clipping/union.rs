//! Dissolving a polygon collection into its union.

use super::polygon::overlay_areal;
use super::OverlayOp;
use crate::error::PlanumError;
use crate::geometry::Geometry;
use crate::graph::Operand;
use num_traits::Float;
use tracing::debug;

/// Unions all members of a polygonal geometry in one shared graph.
///
/// Accepts `Polygon`, `MultiPolygon` and collections whose members are all
/// polygonal. Overlapping and abutting members dissolve; edges shared by two
/// members leave no seam. Anything else fails with
/// [`PlanumError::TypeMismatch`].
///
/// # Example
///
/// ```
/// use planum::{unary_union, Geometry, LineString, Polygon};
///
/// let tile = |x: f64| -> Polygon<f64> {
///     Polygon::new(
///         LineString::from(vec![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0), (x, 0.0)]),
///         vec![],
///     )
/// };
/// let row = Geometry::MultiPolygon(vec![tile(0.0), tile(1.0), tile(2.0)]);
///
/// let merged = unary_union(&row).unwrap();
/// assert_eq!(merged, Geometry::Polygon(Polygon::new(
///     LineString::from(vec![(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
///     vec![],
/// )));
/// ```
pub fn unary_union<F: Float>(geometry: &Geometry<F>) -> Result<Geometry<F>, PlanumError> {
    if !is_polygonal(geometry) {
        return Err(PlanumError::TypeMismatch {
            operation: "unary_union",
            expected: "polygonal geometry",
            found: geometry.geometry_type(),
        });
    }
    let operand = Operand::prepare(geometry, "unary_union")?;
    let members = match &operand {
        Operand::Areal(polygons) => polygons.len(),
        _ => 0,
    };
    debug!(members, "unary_union");
    Ok(overlay_areal(&operand, &Operand::Empty, OverlayOp::Union))
}

fn is_polygonal<F: Float>(geometry: &Geometry<F>) -> bool {
    match geometry {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => true,
        Geometry::GeometryCollection(members) => members.iter().all(is_polygonal),
        Geometry::Point(_)
        | Geometry::MultiPoint(_)
        | Geometry::LineString(_)
        | Geometry::MultiLineString(_) => false,
    }
}
