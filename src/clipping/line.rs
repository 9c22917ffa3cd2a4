//! Set operations on lines.

use super::{combine, lines_geometry, points_geometry, Clipping, OverlayOp};
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString};
use crate::graph::{build_graph, merge_pieces, Operand, PlanarGraph};
use crate::primitives::Coord;
use num_traits::Float;
use tracing::trace;

/// Overlay of two sets of lines.
///
/// Both operands are noded together; every sub-edge is kept or dropped as a
/// whole and the kept sub-edges are sewn back into maximal lines.
///
/// # Example
///
/// ```
/// use planum::clipping::{Clipping, LineClipping};
/// use planum::{Coord, Geometry, LineString};
///
/// let a = LineString::from(vec![(0.0, 0.0), (2.0, 2.0)]);
/// let b = LineString::from(vec![(0.0, 2.0), (2.0, 0.0)]);
/// let clip = LineClipping::new(&[a], &[b]).unwrap();
/// assert_eq!(clip.intersection().unwrap(), Geometry::Point(Coord::new(1.0, 1.0)));
/// ```
#[derive(Debug, Clone)]
pub struct LineClipping<F> {
    subject: Operand<F>,
    clipping: Operand<F>,
}

impl<F: Float> LineClipping<F> {
    /// Creates an overlay of two sets of lines.
    ///
    /// Repeated consecutive vertices are removed. A line that collapses to a
    /// single point fails with [`PlanumError::DegenerateLine`].
    pub fn new(subject: &[LineString<F>], clipping: &[LineString<F>]) -> Result<Self, PlanumError> {
        let prepare = |lines: &[LineString<F>]| {
            Operand::prepare(&Geometry::MultiLineString(lines.to_vec()), "line clipping")
        };
        Ok(Self {
            subject: prepare(subject)?,
            clipping: prepare(clipping)?,
        })
    }
}

impl<F: Float> Clipping<F> for LineClipping<F> {
    fn overlay(&self, op: OverlayOp) -> Result<Geometry<F>, PlanumError> {
        Ok(overlay_lineal(&self.subject, &self.clipping, op))
    }
}

/// Overlays two lineal (or empty) operands.
///
/// Intersections also report the points where the operands cross or touch
/// without sharing a sub-edge.
pub(crate) fn overlay_lineal<F: Float>(a: &Operand<F>, b: &Operand<F>, op: OverlayOp) -> Geometry<F> {
    let graph = build_graph(a, b);
    let mut kept = vec![false; graph.edges().len()];
    let mut pieces = Vec::new();

    for (e, edge) in graph.edges().iter().enumerate() {
        let [ma, mb] = edge.marks;
        if !op.select(ma.on_line(), mb.on_line()) {
            continue;
        }
        kept[e] = true;
        let forward = if ma.on_line() {
            ma.line_forward
        } else {
            mb.line_forward
        };
        pieces.push(oriented_piece(&graph, e, forward));
    }

    let lines: Vec<LineString<F>> = merge_pieces(&pieces)
        .into_iter()
        .map(LineString::new)
        .collect();
    trace!(pieces = pieces.len(), lines = lines.len(), op = op.name(), "line overlay");

    if op == OverlayOp::Intersection {
        combine(vec![
            lines_geometry(lines),
            points_geometry(touch_points(&graph, &kept)),
        ])
    } else {
        lines_geometry(lines)
    }
}

/// Coordinates of edge `e`, in canonical direction when `forward`.
pub(crate) fn oriented_piece<F: Float>(graph: &PlanarGraph<F>, e: usize, forward: bool) -> Vec<Coord<F>> {
    let (from, to) = graph.edge_coords(e);
    if forward {
        vec![from, to]
    } else {
        vec![to, from]
    }
}

/// Nodes reached by lines of both operands where no kept edge ends, in
/// lexicographic order.
fn touch_points<F: Float>(graph: &PlanarGraph<F>, kept: &[bool]) -> Vec<Coord<F>> {
    let n = graph.node_coords().len();
    let mut reached = vec![[false; 2]; n];
    let mut covered = vec![false; n];
    for (e, edge) in graph.edges().iter().enumerate() {
        for node in [edge.from, edge.to] {
            for k in 0..2 {
                reached[node][k] |= edge.marks[k].on_line();
            }
            covered[node] |= kept[e];
        }
    }
    let mut points: Vec<Coord<F>> = (0..n)
        .filter(|&node| reached[node] == [true, true] && !covered[node])
        .map(|node| graph.node_coords()[node])
        .collect();
    points.sort_by(|p, q| p.lex_cmp(q));
    points
}
