//! Set operations on polygons.

use super::{Clipping, OverlayOp};
use crate::bounds::Bound;
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::graph::{build_graph, Operand, Sides};
use crate::primitives::{locate_in_ring, orient2d, signed_area, Coord, Location, Orientation};
use crate::relate::PointLocator;
use num_traits::Float;
use std::cmp::Ordering;
use tracing::{trace, warn};

/// Overlay of two sets of polygons.
///
/// Operands are validated and normalized to counter-clockwise shells and
/// clockwise holes on construction. The result boundary consists of the
/// graph edges with exactly one selected side.
///
/// # Example
///
/// ```
/// use planum::clipping::{Clipping, PolygonClipping};
/// use planum::{LineString, Polygon};
///
/// let a = Polygon::new(
///     LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
///     vec![],
/// );
/// let b = Polygon::new(
///     LineString::from(vec![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)]),
///     vec![],
/// );
/// let ring = PolygonClipping::new(&[a], &[b]).unwrap().difference().unwrap();
/// assert_eq!(ring.area(), 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct PolygonClipping<F> {
    subject: Operand<F>,
    clipping: Operand<F>,
}

impl<F: Float> PolygonClipping<F> {
    /// Creates an overlay of two sets of polygons.
    ///
    /// Fails with [`PlanumError::InvalidRing`] if any polygon is invalid.
    pub fn new(subject: &[Polygon<F>], clipping: &[Polygon<F>]) -> Result<Self, PlanumError> {
        let prepare = |polygons: &[Polygon<F>]| {
            Operand::prepare(&Geometry::MultiPolygon(polygons.to_vec()), "polygon clipping")
        };
        Ok(Self {
            subject: prepare(subject)?,
            clipping: prepare(clipping)?,
        })
    }
}

impl<F: Float> Clipping<F> for PolygonClipping<F> {
    fn overlay(&self, op: OverlayOp) -> Result<Geometry<F>, PlanumError> {
        Ok(overlay_areal(&self.subject, &self.clipping, op))
    }
}

/// Overlays two areal (or empty) operands.
///
/// Each edge side is inside or outside of A and B; the operator decides
/// which sides belong to the result. An edge with exactly one selected side
/// becomes result boundary, directed so that side is on its left.
pub(crate) fn overlay_areal<F: Float>(a: &Operand<F>, b: &Operand<F>, op: OverlayOp) -> Geometry<F> {
    let graph = build_graph(a, b);
    let n = graph.edges().len();
    let labels = |k: usize, operand: &Operand<F>| -> Vec<Sides> {
        match operand {
            Operand::Areal(_) => graph.side_labels(k, &PointLocator::new(operand)),
            _ => vec![Sides::default(); n],
        }
    };
    let (sa, sb) = (labels(0, a), labels(1, b));

    let mut selected = vec![false; graph.half_edge_count()];
    for e in 0..n {
        let left = op.select(sa[e].left, sb[e].left);
        let right = op.select(sa[e].right, sb[e].right);
        if left != right {
            selected[2 * e + usize::from(right)] = true;
        }
    }

    let rings = graph.trace_rings(&selected);
    trace!(rings = rings.len(), op = op.name(), "polygon overlay");
    assemble(rings)
}

/// Turns walked boundary rings into polygons.
///
/// Counter-clockwise rings become shells, clockwise rings holes; each hole
/// goes into the smallest shell containing it.
pub(crate) fn assemble<F: Float>(rings: Vec<Vec<Coord<F>>>) -> Geometry<F> {
    let mut shells: Vec<(Vec<Coord<F>>, F)> = Vec::new();
    let mut holes: Vec<Vec<Coord<F>>> = Vec::new();
    for ring in rings.into_iter().filter_map(clean_ring) {
        let area = signed_area(&ring);
        if area > F::zero() {
            shells.push((ring, area));
        } else if area < F::zero() {
            holes.push(ring);
        }
    }

    let shell_bounds: Vec<Option<Bound<F>>> = shells
        .iter()
        .map(|(ring, _)| Bound::from_coords(ring.iter().copied()))
        .collect();
    let mut nested: Vec<Vec<Vec<Coord<F>>>> = vec![Vec::new(); shells.len()];
    for hole in holes {
        let hole_bound = Bound::from_coords(hole.iter().copied());
        let owner = shells
            .iter()
            .enumerate()
            .filter(|&(i, _)| match (shell_bounds[i], hole_bound) {
                (Some(sb), Some(hb)) => sb.contains(hb),
                _ => false,
            })
            .filter(|(_, (shell, _))| hole_location(&hole, shell) == Location::Interior)
            .min_by(|(_, (_, x)), (_, (_, y))| x.partial_cmp(y).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i);
        match owner {
            Some(i) => nested[i].push(hole),
            None => warn!(vertices = hole.len(), "dropping hole outside every shell"),
        }
    }

    let mut polygons: Vec<Polygon<F>> = shells
        .into_iter()
        .zip(nested)
        .map(|((shell, _), mut holes)| {
            holes.sort_by(|p, q| p[0].lex_cmp(&q[0]));
            Polygon::new(
                LineString::new(shell),
                holes.into_iter().map(LineString::new).collect(),
            )
        })
        .collect();
    polygons.sort_by(|p, q| p.exterior().coords()[0].lex_cmp(&q.exterior().coords()[0]));

    match polygons.len() {
        0 => Geometry::empty(),
        1 => Geometry::Polygon(polygons.remove(0)),
        _ => Geometry::MultiPolygon(polygons),
    }
}

/// Location of a hole relative to a shell ring, taken at the first hole
/// vertex (or edge midpoint) not on the shell.
fn hole_location<F: Float>(hole: &[Coord<F>], shell: &[Coord<F>]) -> Location {
    let midpoints = hole.windows(2).map(|w| w[0].midpoint(w[1]));
    hole.iter()
        .copied()
        .chain(midpoints)
        .map(|p| locate_in_ring(p, shell))
        .find(|&loc| loc != Location::Boundary)
        .unwrap_or(Location::Boundary)
}

/// Normalizes a closed walk: repeated and collinear pass-through vertices
/// are removed and the ring is rotated to start at its lexicographically
/// smallest vertex. Rings with fewer than three corners are dropped.
fn clean_ring<F: Float>(ring: Vec<Coord<F>>) -> Option<Vec<Coord<F>>> {
    let mut stack: Vec<Coord<F>> = Vec::with_capacity(ring.len());
    for c in ring {
        if stack.last() == Some(&c) {
            continue;
        }
        while stack.len() >= 2
            && orient2d(stack[stack.len() - 2], stack[stack.len() - 1], c) == Orientation::Collinear
        {
            stack.pop();
        }
        stack.push(c);
    }
    while stack.len() > 1 && stack.first() == stack.last() {
        stack.pop();
    }

    // The seam between the last and first vertex.
    loop {
        let n = stack.len();
        if n < 3 {
            return None;
        }
        if orient2d(stack[n - 2], stack[n - 1], stack[0]) == Orientation::Collinear {
            stack.pop();
        } else if orient2d(stack[n - 1], stack[0], stack[1]) == Orientation::Collinear {
            stack.remove(0);
        } else {
            break;
        }
    }

    let start = (0..stack.len())
        .min_by(|&i, &j| stack[i].lex_cmp(&stack[j]))
        .unwrap_or(0);
    stack.rotate_left(start);
    stack.push(stack[0]);
    Some(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::new(
            vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)].into(),
            Vec::new(),
        )
    }

    fn overlapping() -> PolygonClipping<f64> {
        PolygonClipping::new(&[square(0.0, 0.0, 2.0, 2.0)], &[square(1.0, 1.0, 3.0, 3.0)]).unwrap()
    }

    #[test]
    fn test_intersection_of_overlapping_squares() {
        assert_eq!(
            overlapping().intersection().unwrap(),
            Geometry::Polygon(square(1.0, 1.0, 2.0, 2.0))
        );
    }

    #[test]
    fn test_union_of_overlapping_squares() {
        let union = overlapping().union().unwrap();
        assert_relative_eq!(union.area(), 7.0);
        match union {
            Geometry::Polygon(p) => {
                assert_eq!(p.exterior().len(), 9);
                assert!(p.interiors().is_empty());
            }
            other => panic!("expected a polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_difference_and_sym_difference() {
        assert_relative_eq!(overlapping().difference().unwrap().area(), 3.0);
        match overlapping().sym_difference().unwrap() {
            Geometry::MultiPolygon(parts) => {
                assert_eq!(parts.len(), 2);
                let total: f64 = parts.iter().map(Polygon::area).sum();
                assert_relative_eq!(total, 6.0);
            }
            other => panic!("expected two polygons, got {other:?}"),
        }
    }

    #[test]
    fn test_difference_creates_hole() {
        let clip =
            PolygonClipping::new(&[square(0.0, 0.0, 10.0, 10.0)], &[square(2.0, 2.0, 4.0, 4.0)])
                .unwrap();
        match clip.difference().unwrap() {
            Geometry::Polygon(p) => {
                assert_eq!(p.exterior(), square(0.0, 0.0, 10.0, 10.0).exterior());
                assert_eq!(p.interiors().len(), 1);
                assert_eq!(
                    p.interiors()[0].coords(),
                    &[c(2.0, 2.0), c(2.0, 4.0), c(4.0, 4.0), c(4.0, 2.0), c(2.0, 2.0)]
                );
            }
            other => panic!("expected a polygon with a hole, got {other:?}"),
        }
    }

    #[test]
    fn test_abutting_union_has_no_seam() {
        let clip =
            PolygonClipping::new(&[square(0.0, 0.0, 1.0, 1.0)], &[square(1.0, 0.0, 2.0, 1.0)])
                .unwrap();
        assert_eq!(clip.union().unwrap(), Geometry::Polygon(square(0.0, 0.0, 2.0, 1.0)));
        assert_eq!(clip.intersection().unwrap(), Geometry::empty());
    }

    #[test]
    fn test_clean_ring() {
        let ring = vec![
            c(1.0, 0.0),
            c(2.0, 0.0),
            c(2.0, 2.0),
            c(0.0, 2.0),
            c(0.0, 0.0),
            c(1.0, 0.0),
        ];
        assert_eq!(
            clean_ring(ring),
            Some(vec![c(0.0, 0.0), c(2.0, 0.0), c(2.0, 2.0), c(0.0, 2.0), c(0.0, 0.0)])
        );
        let flat = vec![c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0), c(0.0, 0.0)];
        assert_eq!(clean_ring(flat), None);
    }

    #[test]
    fn test_assemble_nests_holes() {
        let outer = vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0), c(0.0, 0.0)];
        let hole = vec![c(2.0, 2.0), c(2.0, 8.0), c(8.0, 8.0), c(8.0, 2.0), c(2.0, 2.0)];
        let island = vec![c(4.0, 4.0), c(6.0, 4.0), c(6.0, 6.0), c(4.0, 6.0), c(4.0, 4.0)];
        match assemble(vec![island, hole, outer]) {
            Geometry::MultiPolygon(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0].interiors().len(), 1);
                assert!(parts[1].interiors().is_empty());
            }
            other => panic!("expected two polygons, got {other:?}"),
        }
    }
}
