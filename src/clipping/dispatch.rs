//! Overlay over arbitrary `Geometry` values.

use super::line::overlay_lineal;
use super::mixed::overlay_mixed;
use super::point::overlay_points;
use super::polygon::overlay_areal;
use super::OverlayOp;
use crate::error::PlanumError;
use crate::geometry::Geometry;
use crate::graph::Operand;
use num_traits::Float;
use tracing::debug;

/// Points common to `a` and `b`.
pub fn intersection<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<Geometry<F>, PlanumError> {
    overlay(a, b, OverlayOp::Intersection)
}

/// Points in `a` or `b`.
pub fn union<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<Geometry<F>, PlanumError> {
    overlay(a, b, OverlayOp::Union)
}

/// Points of `a` not in `b`.
pub fn difference<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<Geometry<F>, PlanumError> {
    overlay(a, b, OverlayOp::Difference)
}

/// Points in exactly one of `a` and `b`.
pub fn sym_difference<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<Geometry<F>, PlanumError> {
    overlay(a, b, OverlayOp::SymDifference)
}

fn overlay<F: Float>(a: &Geometry<F>, b: &Geometry<F>, op: OverlayOp) -> Result<Geometry<F>, PlanumError> {
    debug!(
        op = op.name(),
        a = a.geometry_type(),
        b = b.geometry_type(),
        a_coords = a.coords().len(),
        b_coords = b.coords().len(),
        "overlay"
    );
    let oa = Operand::prepare(a, op.name())?;
    let ob = Operand::prepare(b, op.name())?;

    if oa.is_empty() || ob.is_empty() {
        return Ok(with_empty(oa, ob, op));
    }
    if let (Some(ba), Some(bb)) = (oa.bound(), ob.bound()) {
        if !ba.intersects(bb) {
            match op {
                OverlayOp::Intersection => return Ok(Geometry::empty()),
                OverlayOp::Difference => return Ok(oa.into_geometry()),
                OverlayOp::Union | OverlayOp::SymDifference => {}
            }
        }
    }

    let result = match (&oa, &ob) {
        (Operand::Puntal(p), Operand::Puntal(q)) => overlay_points(p, q, op),
        (Operand::Lineal(_), Operand::Lineal(_)) => overlay_lineal(&oa, &ob, op),
        (Operand::Areal(_), Operand::Areal(_)) => overlay_areal(&oa, &ob, op),
        _ if oa.dimension() < ob.dimension() => overlay_mixed(&oa, &ob, op, true),
        _ => overlay_mixed(&ob, &oa, op, false),
    };
    Ok(result)
}

/// Set algebra when at least one operand is empty.
fn with_empty<F: Float>(a: Operand<F>, b: Operand<F>, op: OverlayOp) -> Geometry<F> {
    match op {
        OverlayOp::Intersection => Geometry::empty(),
        OverlayOp::Difference => a.into_geometry(),
        OverlayOp::Union | OverlayOp::SymDifference => {
            if a.is_empty() {
                b.into_geometry()
            } else {
                a.into_geometry()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RingDefect;
    use crate::geometry::{LineString, Polygon};
    use crate::primitives::Coord;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
        Polygon::new(
            vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)].into(),
            Vec::new(),
        )
        .into()
    }

    #[test]
    fn test_empty_algebra() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let empty = Geometry::empty();
        assert_eq!(intersection(&a, &empty).unwrap(), Geometry::empty());
        assert_eq!(union(&a, &empty).unwrap(), a);
        assert_eq!(union(&empty, &a).unwrap(), a);
        assert_eq!(difference(&a, &empty).unwrap(), a);
        assert_eq!(difference(&empty, &a).unwrap(), Geometry::empty());
        assert_eq!(sym_difference(&empty, &a).unwrap(), a);
    }

    #[test]
    fn test_disjoint_shortcuts() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(5.0, 5.0, 6.0, 6.0);
        assert_eq!(intersection(&a, &b).unwrap(), Geometry::empty());
        assert_eq!(difference(&a, &b).unwrap(), a);
        match union(&a, &b).unwrap() {
            Geometry::MultiPolygon(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected two polygons, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_dimensions() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        let l: Geometry<f64> = LineString::from(vec![(1.0, -1.0), (1.0, 3.0)]).into();
        assert_eq!(
            intersection(&l, &a).unwrap(),
            Geometry::LineString(LineString::from(vec![(1.0, 0.0), (1.0, 2.0)]))
        );
        assert_eq!(intersection(&a, &l).unwrap(), intersection(&l, &a).unwrap());
        assert_eq!(difference(&a, &l).unwrap(), a);

        let p = Geometry::Point(Coord::new(1.0, 1.0));
        assert_eq!(difference(&p, &a).unwrap(), Geometry::empty());
        assert_relative_eq!(sym_difference(&p, &a).unwrap().area(), 4.0);
    }

    #[test]
    fn test_invalid_input_fails() {
        let bowtie: Geometry<f64> = Polygon::new(
            vec![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)].into(),
            Vec::new(),
        )
        .into();
        let a = square(0.0, 0.0, 1.0, 1.0);
        for result in [
            intersection(&bowtie, &a),
            union(&a, &bowtie),
            difference(&bowtie, &a),
            sym_difference(&a, &bowtie),
        ] {
            assert_eq!(
                result,
                Err(PlanumError::InvalidRing {
                    reason: RingDefect::SelfIntersection { x: 1.0, y: 1.0 }
                })
            );
        }
    }

    #[test]
    fn test_heterogeneous_collection() {
        let mixed = Geometry::GeometryCollection(vec![
            square(0.0, 0.0, 1.0, 1.0),
            Geometry::Point(Coord::new(3.0, 3.0)),
        ]);
        assert_eq!(
            union(&mixed, &square(0.0, 0.0, 1.0, 1.0)),
            Err(PlanumError::UnsupportedGeometry {
                operation: "union",
                found: "GeometryCollection",
            })
        );
    }
}
