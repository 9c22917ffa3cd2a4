//! Computing the intersection matrix of two operands.

use super::{Dimension, IntersectionMatrix, PointLocator};
use crate::graph::{build_graph, Operand};
use crate::primitives::Location;
use num_traits::Float;
use tracing::trace;

/// Computes the DE-9IM matrix of two prepared operands.
pub(crate) fn relate_operands<F: Float>(a: &Operand<F>, b: &Operand<F>) -> IntersectionMatrix {
    let disjoint = match (a.bound(), b.bound()) {
        (Some(ba), Some(bb)) => !ba.intersects(bb),
        _ => true,
    };
    if disjoint {
        return exterior_matrix(a, b);
    }

    let graph = build_graph(a, b);
    let locators = [PointLocator::new(a), PointLocator::new(b)];
    let areal = [
        matches!(a, Operand::Areal(_)),
        matches!(b, Operand::Areal(_)),
    ];

    let mut matrix = IntersectionMatrix::new();
    matrix.set(Location::Exterior, Location::Exterior, Dimension::Area);

    let nodes = [0, 1].map(|k| graph.node_locations(k, areal[k], &locators[k]));
    for (&la, &lb) in nodes[0].iter().zip(&nodes[1]) {
        matrix.set_at_least(la, lb, Dimension::Point);
    }

    let sides: [Vec<_>; 2] = [0, 1].map(|k| {
        if areal[k] {
            graph.side_labels(k, &locators[k])
        } else {
            Vec::new()
        }
    });

    for e in 0..graph.edges().len() {
        let la = graph.edge_location(e, 0, areal[0], &locators[0]);
        let lb = graph.edge_location(e, 1, areal[1], &locators[1]);
        matrix.set_at_least(la, lb, Dimension::Line);

        let side = |k: usize, left: bool| -> Location {
            match sides[k].get(e) {
                Some(s) if (left && s.left) || (!left && s.right) => Location::Interior,
                _ => Location::Exterior,
            }
        };
        for left in [true, false] {
            matrix.set_at_least(side(0, left), side(1, left), Dimension::Area);
        }
    }

    trace!(matrix = %matrix, "computed intersection matrix");
    matrix
}

/// The matrix of two operands that do not meet at all.
fn exterior_matrix<F: Float>(a: &Operand<F>, b: &Operand<F>) -> IntersectionMatrix {
    let mut matrix = IntersectionMatrix::new();
    matrix.set(Location::Interior, Location::Exterior, a.dimension());
    matrix.set(Location::Boundary, Location::Exterior, a.boundary_dimension());
    matrix.set(Location::Exterior, Location::Interior, b.dimension());
    matrix.set(Location::Exterior, Location::Boundary, b.boundary_dimension());
    matrix.set(Location::Exterior, Location::Exterior, Dimension::Area);
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};
    use crate::primitives::Coord;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::new(
            vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)].into(),
            Vec::new(),
        )
    }

    fn areal(p: Polygon<f64>) -> Operand<f64> {
        Operand::Areal(vec![p.normalized()])
    }

    fn matrix(a: &Operand<f64>, b: &Operand<f64>) -> String {
        relate_operands(a, b).to_string()
    }

    #[test]
    fn test_overlapping_squares() {
        let a = areal(square(0.0, 0.0, 2.0, 2.0));
        let b = areal(square(1.0, 1.0, 3.0, 3.0));
        assert_eq!(matrix(&a, &b), "212101212");
    }

    #[test]
    fn test_equal_squares() {
        let a = areal(square(0.0, 0.0, 2.0, 2.0));
        assert_eq!(matrix(&a, &a.clone()), "2FFF1FFF2");
    }

    #[test]
    fn test_contained_square() {
        let outer = areal(square(0.0, 0.0, 10.0, 10.0));
        let inner = areal(square(2.0, 2.0, 4.0, 4.0));
        assert_eq!(matrix(&outer, &inner), "212FF1FF2");
        assert_eq!(matrix(&inner, &outer), "2FF1FF212");
    }

    #[test]
    fn test_abutting_squares() {
        let a = areal(square(0.0, 0.0, 1.0, 1.0));
        let b = areal(square(1.0, 0.0, 2.0, 1.0));
        assert_eq!(matrix(&a, &b), "FF2F11212");
    }

    #[test]
    fn test_disjoint_uses_dimensions() {
        let a = areal(square(0.0, 0.0, 1.0, 1.0));
        let line = Operand::Lineal(vec![LineString::from(vec![(5.0, 5.0), (6.0, 6.0)])]);
        assert_eq!(matrix(&a, &line), "FF2FF1102");
        assert_eq!(matrix(&a, &Operand::Empty), "FF2FF1FF2");
    }

    #[test]
    fn test_point_in_polygon() {
        let a = Operand::Puntal(vec![Coord::new(1.0, 1.0)]);
        let b = areal(square(0.0, 0.0, 2.0, 2.0));
        assert_eq!(matrix(&a, &b), "0FFFFF212");
    }

    #[test]
    fn test_crossing_lines() {
        let a = Operand::Lineal(vec![LineString::from(vec![(0.0, 0.0), (2.0, 2.0)])]);
        let b = Operand::Lineal(vec![LineString::from(vec![(0.0, 2.0), (2.0, 0.0)])]);
        assert_eq!(matrix(&a, &b), "0F1FF0102");
    }

    #[test]
    fn test_inexact_line_crossing() {
        // The crossing (0.3, 0.9) is not representable exactly.
        let a = Operand::Lineal(vec![LineString::from(vec![(0.0, 0.0), (1.0, 3.0)])]);
        let b = Operand::Lineal(vec![LineString::from(vec![(0.0, 1.0), (3.0, 0.0)])]);
        assert_eq!(matrix(&a, &b), "0F1FF0102");
    }

    #[test]
    fn test_inexact_boundary_crossings() {
        let tri = |dx: f64, dy: f64| {
            areal(Polygon::new(
                vec![
                    (dx, dy),
                    (3.0 + dx, dy),
                    (1.0 + dx, 3.0 + dy),
                    (dx, dy),
                ]
                .into(),
                Vec::new(),
            ))
        };
        let a = tri(0.0, 0.0);
        for (dx, dy) in [(0.5, 0.7), (0.3, 0.1), (0.7, 0.3), (1.1, 0.9)] {
            assert_eq!(matrix(&a, &tri(dx, dy)), "212101212", "offset ({dx}, {dy})");
        }
    }

    #[test]
    fn test_line_through_polygon() {
        let a = Operand::Lineal(vec![LineString::from(vec![(-1.0, 1.0), (3.0, 1.0)])]);
        let b = areal(square(0.0, 0.0, 2.0, 2.0));
        assert_eq!(matrix(&a, &b), "101FF0212");
    }
}
