//! Planar graph construction shared by overlay and relate.
//!
//! A graph is built per call from one or two operands: their segments are
//! noded against each other, collected into an index-addressed arena of
//! nodes and edges, labelled per operand and finally walked or merged back
//! into geometry. Nothing outlives the call.

mod merge;
mod noder;
mod operand;
mod planar;

pub(crate) use merge::merge_pieces;
pub(crate) use noder::{push_segments, SourceSegment};
pub(crate) use operand::Operand;
pub(crate) use planar::{PlanarGraph, Sides};

/// Builds the graph of two operands, tagged 0 and 1.
///
/// Points of puntal operands become isolated nodes.
pub(crate) fn build_graph<F: num_traits::Float>(a: &Operand<F>, b: &Operand<F>) -> PlanarGraph<F> {
    let mut segments: Vec<SourceSegment<F>> = Vec::new();
    push_segments(a, 0, &mut segments);
    push_segments(b, 1, &mut segments);
    let mut isolated = Vec::new();
    for operand in [a, b] {
        if let Operand::Puntal(points) = operand {
            isolated.extend_from_slice(points);
        }
    }
    PlanarGraph::new(&segments, &isolated)
}
