//! Overlay of operands with different dimensions.
//!
//! Only the lower-dimensional operand is cut: its parts are split into those
//! on the higher-dimensional operand and those off it. The higher operand is
//! returned unchanged where the operation needs it.

use super::line::oriented_piece;
use super::{combine, lines_geometry, points_geometry, OverlayOp};
use crate::geometry::{Geometry, LineString};
use crate::graph::{build_graph, merge_pieces, Operand};
use crate::primitives::{Coord, Location};
use crate::relate::PointLocator;
use num_traits::Float;

/// Overlays `low` with the higher-dimensional `high`.
///
/// `low_is_subject` tells which side of a difference `low` is on.
pub(crate) fn overlay_mixed<F: Float>(
    low: &Operand<F>,
    high: &Operand<F>,
    op: OverlayOp,
    low_is_subject: bool,
) -> Geometry<F> {
    if op == OverlayOp::Difference && !low_is_subject {
        return high.clone().into_geometry();
    }
    let (on, off) = split(low, high);
    match op {
        OverlayOp::Intersection => on,
        OverlayOp::Difference => off,
        OverlayOp::Union | OverlayOp::SymDifference => {
            combine(vec![high.clone().into_geometry(), off])
        }
    }
}

/// Splits `low` into the parts on `high` and the parts off it.
fn split<F: Float>(low: &Operand<F>, high: &Operand<F>) -> (Geometry<F>, Geometry<F>) {
    match low {
        Operand::Puntal(points) => {
            let locator = PointLocator::new(high);
            let (on, off): (Vec<Coord<F>>, Vec<Coord<F>>) = points
                .iter()
                .partition(|&&p| locator.locate(p) != Location::Exterior);
            (points_geometry(on), points_geometry(off))
        }
        Operand::Lineal(_) => split_lines(low, high),
        Operand::Empty | Operand::Areal(_) => (Geometry::empty(), low.clone().into_geometry()),
    }
}

/// Cuts lines against an areal operand.
///
/// Lines running along the polygon boundary count as on it. Points where a
/// line only touches the polygon are reported with the on-parts.
fn split_lines<F: Float>(lines: &Operand<F>, area: &Operand<F>) -> (Geometry<F>, Geometry<F>) {
    let graph = build_graph(lines, area);
    let locator = PointLocator::new(area);
    let areal = matches!(area, Operand::Areal(_));

    let n = graph.node_coords().len();
    let mut reached = vec![false; n];
    let mut covered = vec![false; n];
    let (mut on, mut off) = (Vec::new(), Vec::new());

    for (e, edge) in graph.edges().iter().enumerate() {
        let marks = edge.marks[0];
        if !marks.on_line() {
            continue;
        }
        let piece = oriented_piece(&graph, e, marks.line_forward);
        reached[edge.from] = true;
        reached[edge.to] = true;
        if graph.edge_location(e, 1, areal, &locator) == Location::Exterior {
            off.push(piece);
        } else {
            covered[edge.from] = true;
            covered[edge.to] = true;
            on.push(piece);
        }
    }

    let locations = graph.node_locations(1, areal, &locator);
    let mut touches: Vec<Coord<F>> = (0..n)
        .filter(|&node| reached[node] && !covered[node] && locations[node] != Location::Exterior)
        .map(|node| graph.node_coords()[node])
        .collect();
    touches.sort_by(|p, q| p.lex_cmp(q));

    let merge = |pieces: &[Vec<Coord<F>>]| -> Vec<LineString<F>> {
        merge_pieces(pieces).into_iter().map(LineString::new).collect()
    };
    (
        combine(vec![lines_geometry(merge(&on)), points_geometry(touches)]),
        lines_geometry(merge(&off)),
    )
}
