//! DE-9IM relate engine and the named spatial predicates.
//!
//! [`relate`] computes the full [`IntersectionMatrix`] of two geometries from
//! their noded arrangement. The predicates are thin wrappers that evaluate
//! the matrix with the dimension rules of the OGC model.
//!
//! # Example
//!
//! ```
//! use planum::{relate, contains, touches, Geometry, LineString, Polygon};
//!
//! let square = |x0: f64, y0: f64, x1: f64, y1: f64| -> Geometry<f64> {
//!     Polygon::new(
//!         LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
//!         vec![],
//!     )
//!     .into()
//! };
//!
//! let outer = square(0.0, 0.0, 10.0, 10.0);
//! let inner = square(2.0, 2.0, 4.0, 4.0);
//! assert_eq!(relate(&outer, &inner).unwrap().to_string(), "212FF1FF2");
//! assert!(contains(&outer, &inner).unwrap());
//! assert!(touches(&square(0.0, 0.0, 1.0, 1.0), &square(1.0, 0.0, 2.0, 1.0)).unwrap());
//! ```

mod compute;
mod locate;
mod matrix;

pub use locate::locate;
pub use matrix::{Dimension, IntersectionMatrix};

pub(crate) use locate::{mod2_boundary, PointLocator};

use crate::error::PlanumError;
use crate::geometry::Geometry;
use crate::graph::Operand;
use compute::relate_operands;
use num_traits::Float;
use tracing::debug;

struct Related {
    matrix: IntersectionMatrix,
    dims: (Dimension, Dimension),
}

fn related<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<Related, PlanumError> {
    debug!(
        a = a.geometry_type(),
        b = b.geometry_type(),
        "relate"
    );
    let oa = Operand::prepare(a, "relate")?;
    let ob = Operand::prepare(b, "relate")?;
    Ok(Related {
        matrix: relate_operands(&oa, &ob),
        dims: (oa.dimension(), ob.dimension()),
    })
}

/// Computes the DE-9IM intersection matrix of `a` and `b`.
///
/// Empty operands give a matrix whose rows or columns for that operand are
/// `F`. Invalid polygons fail with [`PlanumError::InvalidRing`].
pub fn relate<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<IntersectionMatrix, PlanumError> {
    Ok(related(a, b)?.matrix)
}

/// Tests the matrix of `a` and `b` against a DE-9IM pattern.
pub fn relate_pattern<F: Float>(
    a: &Geometry<F>,
    b: &Geometry<F>,
    pattern: &str,
) -> Result<bool, PlanumError> {
    // Reject a malformed pattern before doing any geometry work.
    IntersectionMatrix::new().matches(pattern)?;
    relate(a, b)?.matches(pattern)
}

/// `a` and `b` have no point in common.
pub fn disjoint<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    Ok(relate(a, b)?.is_disjoint())
}

/// `a` and `b` have at least one point in common.
pub fn intersects<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    Ok(relate(a, b)?.is_intersects())
}

/// No point of `b` lies outside `a`, and the interiors meet.
pub fn contains<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    Ok(relate(a, b)?.is_contains())
}

/// No point of `a` lies outside `b`, and the interiors meet.
pub fn within<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    Ok(relate(a, b)?.is_within())
}

/// No point of `b` lies outside `a`.
pub fn covers<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    Ok(relate(a, b)?.is_covers())
}

/// No point of `a` lies outside `b`.
pub fn covered_by<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    Ok(relate(a, b)?.is_covered_by())
}

/// The geometries meet only on their boundaries.
pub fn touches<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    let r = related(a, b)?;
    Ok(r.matrix.is_touches(r.dims.0, r.dims.1))
}

/// The interiors meet in a set of lower dimension than the larger operand.
pub fn crosses<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    let r = related(a, b)?;
    Ok(r.matrix.is_crosses(r.dims.0, r.dims.1))
}

/// Same-dimension geometries whose interiors meet in that dimension while
/// neither covers the other.
pub fn overlaps<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    let r = related(a, b)?;
    Ok(r.matrix.is_overlaps(r.dims.0, r.dims.1))
}

/// Topological equality. Two empty geometries are equal.
pub fn equals<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<bool, PlanumError> {
    let r = related(a, b)?;
    if r.dims == (Dimension::Empty, Dimension::Empty) {
        return Ok(true);
    }
    Ok(r.matrix.is_equals(r.dims.0, r.dims.1))
}
