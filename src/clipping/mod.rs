//! Boolean set operations: intersection, union, difference and symmetric
//! difference.
//!
//! Each dimension has its own engine behind the [`Clipping`] trait:
//! [`PointClipping`] works on coordinate sets, [`LineClipping`] and
//! [`PolygonClipping`] node both operands into one planar graph and select
//! edges or faces from it. The free functions [`intersection`], [`union`],
//! [`difference`] and [`sym_difference`] dispatch over [`Geometry`] values,
//! including operands of different dimension.
//!
//! # Example
//!
//! ```
//! use planum::{intersection, union, Geometry, LineString, Polygon};
//!
//! let square = |x0: f64, y0: f64, x1: f64, y1: f64| -> Geometry<f64> {
//!     Polygon::new(
//!         LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
//!         vec![],
//!     )
//!     .into()
//! };
//!
//! let a = square(0.0, 0.0, 2.0, 2.0);
//! let b = square(1.0, 1.0, 3.0, 3.0);
//!
//! assert_eq!(intersection(&a, &b).unwrap(), square(1.0, 1.0, 2.0, 2.0));
//! assert_eq!(union(&a, &b).unwrap().area(), 7.0);
//! ```

mod dispatch;
mod line;
mod mixed;
mod point;
mod polygon;
mod union;

pub use dispatch::{difference, intersection, sym_difference, union};
pub use line::LineClipping;
pub use point::PointClipping;
pub use polygon::PolygonClipping;
pub use union::unary_union;

use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString};
use crate::primitives::Coord;
use num_traits::Float;
use std::fmt;

/// A boolean set operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

impl OverlayOp {
    /// Whether a part that is in A (`in_a`) and/or in B (`in_b`) belongs to
    /// the result.
    #[inline]
    pub fn select(self, in_a: bool, in_b: bool) -> bool {
        match self {
            OverlayOp::Intersection => in_a && in_b,
            OverlayOp::Union => in_a || in_b,
            OverlayOp::Difference => in_a && !in_b,
            OverlayOp::SymDifference => in_a != in_b,
        }
    }

    /// Operation name, as used in errors and logs.
    pub fn name(self) -> &'static str {
        match self {
            OverlayOp::Intersection => "intersection",
            OverlayOp::Union => "union",
            OverlayOp::Difference => "difference",
            OverlayOp::SymDifference => "sym_difference",
        }
    }
}

impl fmt::Display for OverlayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A clipping engine holding a subject and a clipping operand.
///
/// Implementors provide [`overlay`](Clipping::overlay); the four named
/// operations are derived from it.
pub trait Clipping<F: Float> {
    /// Computes `subject op clipping`.
    fn overlay(&self, op: OverlayOp) -> Result<Geometry<F>, PlanumError>;

    /// Points in both operands.
    fn intersection(&self) -> Result<Geometry<F>, PlanumError> {
        self.overlay(OverlayOp::Intersection)
    }

    /// Points in either operand.
    fn union(&self) -> Result<Geometry<F>, PlanumError> {
        self.overlay(OverlayOp::Union)
    }

    /// Points of the subject not in the clipping operand.
    fn difference(&self) -> Result<Geometry<F>, PlanumError> {
        self.overlay(OverlayOp::Difference)
    }

    /// Points in exactly one operand.
    fn sym_difference(&self) -> Result<Geometry<F>, PlanumError> {
        self.overlay(OverlayOp::SymDifference)
    }
}

/// Wraps points as `Point`, `MultiPoint` or the empty geometry.
pub(crate) fn points_geometry<F: Float>(mut points: Vec<Coord<F>>) -> Geometry<F> {
    match points.len() {
        0 => Geometry::empty(),
        1 => Geometry::Point(points.remove(0)),
        _ => Geometry::MultiPoint(points),
    }
}

/// Wraps lines as `LineString`, `MultiLineString` or the empty geometry.
pub(crate) fn lines_geometry<F: Float>(mut lines: Vec<LineString<F>>) -> Geometry<F> {
    match lines.len() {
        0 => Geometry::empty(),
        1 => Geometry::LineString(lines.remove(0)),
        _ => Geometry::MultiLineString(lines),
    }
}

/// Combines result parts, highest dimension first.
///
/// Empty parts are dropped; a single remaining part is returned as is.
pub(crate) fn combine<F: Float>(parts: Vec<Geometry<F>>) -> Geometry<F> {
    let mut parts: Vec<Geometry<F>> = parts.into_iter().filter(|g| !g.is_empty()).collect();
    match parts.len() {
        0 => Geometry::empty(),
        1 => parts.remove(0),
        _ => Geometry::GeometryCollection(parts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_truth_table() {
        let cases = [(false, false), (true, false), (false, true), (true, true)];
        let expect = |op: OverlayOp| -> Vec<bool> {
            cases.iter().map(|&(a, b)| op.select(a, b)).collect()
        };
        assert_eq!(expect(OverlayOp::Intersection), vec![false, false, false, true]);
        assert_eq!(expect(OverlayOp::Union), vec![false, true, true, true]);
        assert_eq!(expect(OverlayOp::Difference), vec![false, true, false, false]);
        assert_eq!(expect(OverlayOp::SymDifference), vec![false, true, true, false]);
    }

    #[test]
    fn test_combine() {
        let p = Geometry::Point(Coord::new(1.0_f64, 1.0));
        assert_eq!(combine(vec![Geometry::empty(), p.clone()]), p);
        assert_eq!(combine::<f64>(vec![]), Geometry::empty());
        let l: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]).into();
        assert_eq!(
            combine(vec![l.clone(), p.clone()]),
            Geometry::GeometryCollection(vec![l, p])
        );
    }

    #[test]
    fn test_wrappers() {
        assert_eq!(points_geometry::<f64>(vec![]), Geometry::empty());
        assert_eq!(
            points_geometry(vec![Coord::new(0.0_f64, 0.0)]),
            Geometry::Point(Coord::new(0.0, 0.0))
        );
        assert_eq!(lines_geometry::<f64>(vec![]), Geometry::empty());
    }
}
