//! The planar graph: an arena of nodes and edges addressed by index.
//!
//! Every edge `e` owns two half-edges: `2e` runs from `from` to `to`, `2e + 1`
//! runs back. The twin of half-edge `h` is therefore `h ^ 1`. Each node keeps
//! its outgoing half-edges sorted counter-clockwise by direction, which is
//! what the boundary walk turns on.

use super::noder::{node_segments, Role, SourceSegment};
use crate::primitives::{Coord, Location, OrdCoord};
use crate::relate::PointLocator;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{trace, warn};

/// How one operand covers an edge, relative to the edge's canonical
/// direction (`from` lexicographically before `to`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EdgeMarks {
    pub line_forward: bool,
    pub line_backward: bool,
    pub ring_forward: bool,
    pub ring_backward: bool,
}

impl EdgeMarks {
    #[inline]
    pub(crate) fn on_line(&self) -> bool {
        self.line_forward || self.line_backward
    }

    #[inline]
    pub(crate) fn on_ring(&self) -> bool {
        self.ring_forward || self.ring_backward
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        !self.on_line() && !self.on_ring()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Edge {
    pub from: usize,
    pub to: usize,
    pub marks: [EdgeMarks; 2],
    /// `(operand, member)` of every polygon whose rings cover the edge.
    pub owners: Vec<(usize, usize)>,
}

/// Inside/outside flags for the two sides of an edge, for one operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Sides {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug)]
pub(crate) struct PlanarGraph<F> {
    coords: Vec<Coord<F>>,
    edges: Vec<Edge>,
    stars: Vec<Vec<usize>>,
    star_pos: Vec<usize>,
}

impl<F: Float> PlanarGraph<F> {
    /// Nodes the segments and builds the arena.
    ///
    /// `isolated` coordinates become nodes even when no edge reaches them.
    pub(crate) fn new(segments: &[SourceSegment<F>], isolated: &[Coord<F>]) -> Self {
        let pieces = node_segments(segments);

        let mut node_ids: BTreeMap<OrdCoord<F>, usize> = BTreeMap::new();
        let mut coords: Vec<Coord<F>> = Vec::new();
        let mut node = |c: Coord<F>| -> usize {
            *node_ids.entry(OrdCoord(c)).or_insert_with(|| {
                coords.push(c);
                coords.len() - 1
            })
        };

        let mut edges: Vec<Edge> = Vec::new();
        let mut edge_ids: HashMap<(usize, usize), usize> = HashMap::new();
        for piece in &pieces {
            let forward = piece.from.lex_cmp(&piece.to) == Ordering::Less;
            let (lo, hi) = if forward {
                (piece.from, piece.to)
            } else {
                (piece.to, piece.from)
            };
            let (from, to) = (node(lo), node(hi));
            if from == to {
                continue;
            }
            let id = *edge_ids.entry((from, to)).or_insert_with(|| {
                edges.push(Edge {
                    from,
                    to,
                    marks: [EdgeMarks::default(); 2],
                    owners: Vec::new(),
                });
                edges.len() - 1
            });
            let source = &segments[piece.source];
            let edge = &mut edges[id];
            if source.role == Role::Ring && !edge.owners.contains(&(source.operand, source.member)) {
                edge.owners.push((source.operand, source.member));
            }
            let marks = &mut edge.marks[source.operand];
            match (source.role, forward) {
                (Role::Line, true) => marks.line_forward = true,
                (Role::Line, false) => marks.line_backward = true,
                (Role::Ring, true) => marks.ring_forward = true,
                (Role::Ring, false) => marks.ring_backward = true,
            }
        }
        for &c in isolated {
            node(c);
        }

        let mut stars: Vec<Vec<usize>> = vec![Vec::new(); coords.len()];
        for (e, edge) in edges.iter().enumerate() {
            stars[edge.from].push(2 * e);
            stars[edge.to].push(2 * e + 1);
        }
        let mut star_pos = vec![0; 2 * edges.len()];
        for (n, star) in stars.iter_mut().enumerate() {
            let origin = coords[n];
            star.sort_by(|&a, &b| {
                let da = coords[dest_of(&edges, a)] - origin;
                let db = coords[dest_of(&edges, b)] - origin;
                compare_angles(da, db).then(a.cmp(&b))
            });
            for (pos, &h) in star.iter().enumerate() {
                star_pos[h] = pos;
            }
        }

        trace!(
            segments = segments.len(),
            nodes = coords.len(),
            edges = edges.len(),
            "noded planar graph"
        );
        Self {
            coords,
            edges,
            stars,
            star_pos,
        }
    }

    #[inline]
    pub(crate) fn node_coords(&self) -> &[Coord<F>] {
        &self.coords
    }

    #[inline]
    pub(crate) fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub(crate) fn half_edge_count(&self) -> usize {
        2 * self.edges.len()
    }

    #[inline]
    pub(crate) fn origin(&self, h: usize) -> usize {
        let edge = &self.edges[h >> 1];
        if h & 1 == 0 {
            edge.from
        } else {
            edge.to
        }
    }

    #[inline]
    pub(crate) fn dest(&self, h: usize) -> usize {
        dest_of(&self.edges, h)
    }

    /// Coordinates of an edge in canonical direction.
    #[inline]
    pub(crate) fn edge_coords(&self, e: usize) -> (Coord<F>, Coord<F>) {
        let edge = &self.edges[e];
        (self.coords[edge.from], self.coords[edge.to])
    }

    /// Locates the interior of edge `e` against an operand that does not
    /// cover it.
    ///
    /// Samples the midpoint; a sample landing on the operand's boundary is
    /// retried at the quarter points.
    pub(crate) fn sample_location(&self, e: usize, locator: &PointLocator<'_, F>) -> Location {
        let (a, b) = self.edge_coords(e);
        let quarter = F::one() / (F::one() + F::one() + F::one() + F::one());
        let first = locator.locate(a.midpoint(b));
        if first != Location::Boundary {
            return first;
        }
        for t in [quarter, F::one() - quarter] {
            let loc = locator.locate(a.lerp(b, t));
            if loc != Location::Boundary {
                return loc;
            }
        }
        Location::Boundary
    }

    /// Location of the interior of edge `e` relative to one operand.
    ///
    /// Lines cover their edges with their interior. A ring edge is boundary
    /// unless it runs through the interior of another member of the same
    /// operand, or two members meet along it. Other edges are sampled against
    /// an areal operand and lie outside anything else.
    pub(crate) fn edge_location(
        &self,
        e: usize,
        operand: usize,
        areal: bool,
        locator: &PointLocator<'_, F>,
    ) -> Location {
        let edge = &self.edges[e];
        let marks = edge.marks[operand];
        if marks.on_line() {
            Location::Interior
        } else if marks.on_ring() {
            if marks.ring_forward && marks.ring_backward {
                return Location::Interior;
            }
            let owners: Vec<usize> = edge
                .owners
                .iter()
                .filter(|(o, _)| *o == operand)
                .map(|&(_, m)| m)
                .collect();
            let (a, b) = self.edge_coords(e);
            match locator.locate_excluding(a.midpoint(b), &owners) {
                Location::Interior => Location::Interior,
                _ => Location::Boundary,
            }
        } else if areal {
            match self.sample_location(e, locator) {
                Location::Boundary => Location::Exterior,
                loc => loc,
            }
        } else {
            Location::Exterior
        }
    }

    /// Location of every node relative to one operand.
    ///
    /// Crossing points are rounded and need not lie exactly on the segments
    /// they were computed from, so a node reached by the operand's own edges
    /// takes its location from them: a line node is interior unless it is a
    /// Mod-2 endpoint, a ring node is boundary when any ring edge at it is
    /// boundary and interior otherwise. Only nodes no edge of the operand
    /// reaches are located geometrically.
    pub(crate) fn node_locations(
        &self,
        operand: usize,
        areal: bool,
        locator: &PointLocator<'_, F>,
    ) -> Vec<Location> {
        let mut edge_locs: Vec<Option<Location>> = vec![None; self.edges.len()];
        (0..self.coords.len())
            .map(|n| {
                let mut on_line = false;
                let mut ring: Option<Location> = None;
                for &h in &self.stars[n] {
                    let e = h >> 1;
                    let marks = self.edges[e].marks[operand];
                    if marks.on_line() {
                        on_line = true;
                    } else if marks.on_ring() {
                        let loc = *edge_locs[e]
                            .get_or_insert_with(|| self.edge_location(e, operand, areal, locator));
                        if ring != Some(Location::Boundary) {
                            ring = Some(loc);
                        }
                    }
                }
                let c = self.coords[n];
                if on_line {
                    if locator.is_line_boundary(c) {
                        Location::Boundary
                    } else {
                        Location::Interior
                    }
                } else if let Some(loc) = ring {
                    loc
                } else {
                    locator.locate(c)
                }
            })
            .collect()
    }

    /// Inside flags for both sides of every edge, relative to an areal operand.
    ///
    /// Rings are oriented with the interior on their left, so an edge on a
    /// forward ring has the operand on its left and an edge on a backward
    /// ring has it on its right. An edge whose interior lies inside the
    /// operand has it on both sides.
    pub(crate) fn side_labels(&self, operand: usize, locator: &PointLocator<'_, F>) -> Vec<Sides> {
        (0..self.edges.len())
            .map(|e| {
                let marks = self.edges[e].marks[operand];
                let inside = self.edge_location(e, operand, true, locator) == Location::Interior;
                Sides {
                    left: marks.ring_forward || inside,
                    right: marks.ring_backward || inside,
                }
            })
            .collect()
    }

    /// Walks the closed boundary rings formed by the selected half-edges.
    ///
    /// At each node the walk leaves along the first selected half-edge
    /// clockwise from the one it arrived on, keeping the selected face on its
    /// left. Walks that revisit a node are split there, so every returned
    /// ring is simple. A walk that cannot close is dropped.
    pub(crate) fn trace_rings(&self, selected: &[bool]) -> Vec<Vec<Coord<F>>> {
        let mut visited = vec![false; selected.len()];
        let mut rings = Vec::new();
        for start in 0..selected.len() {
            if !selected[start] || visited[start] {
                continue;
            }
            let mut walk = Vec::new();
            let mut h = start;
            let closed = loop {
                visited[h] = true;
                walk.push(h);
                match self.next_selected(h, selected) {
                    Some(next) if next == start => break true,
                    Some(next) if !visited[next] => h = next,
                    _ => break false,
                }
            };
            if !closed {
                warn!(
                    start = start,
                    length = walk.len(),
                    "dropping boundary walk that does not close"
                );
                continue;
            }
            let nodes: Vec<usize> = walk.iter().map(|&h| self.origin(h)).collect();
            rings.extend(
                split_at_repeats(&nodes)
                    .into_iter()
                    .map(|ring| ring.into_iter().map(|n| self.coords[n]).collect()),
            );
        }
        rings
    }

    fn next_selected(&self, h: usize, selected: &[bool]) -> Option<usize> {
        let star = &self.stars[self.dest(h)];
        let deg = star.len();
        let pos = self.star_pos[h ^ 1];
        (1..deg)
            .map(|k| star[(pos + deg - k) % deg])
            .find(|&cand| selected[cand])
    }
}

#[inline]
fn dest_of(edges: &[Edge], h: usize) -> usize {
    let edge = &edges[h >> 1];
    if h & 1 == 0 {
        edge.to
    } else {
        edge.from
    }
}

/// Counter-clockwise angular order starting from the positive x axis.
fn compare_angles<F: Float>(a: Coord<F>, b: Coord<F>) -> Ordering {
    let upper = |v: Coord<F>| v.y > F::zero() || (v.y == F::zero() && v.x > F::zero());
    match (upper(a), upper(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            let cross = a.cross(b);
            if cross > F::zero() {
                Ordering::Less
            } else if cross < F::zero() {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
    }
}

/// Splits a closed node walk into simple loops wherever a node repeats.
///
/// Returned loops are closed (first node repeated at the end).
fn split_at_repeats(nodes: &[usize]) -> Vec<Vec<usize>> {
    let mut loops = Vec::new();
    let mut stack: Vec<usize> = Vec::with_capacity(nodes.len());
    let mut position: HashMap<usize, usize> = HashMap::new();
    for &n in nodes {
        if let Some(&p) = position.get(&n) {
            let mut sub = stack.split_off(p);
            for m in &sub[1..] {
                position.remove(m);
            }
            sub.push(n);
            loops.push(sub);
            stack.push(n);
        } else {
            position.insert(n, stack.len());
            stack.push(n);
        }
    }
    if let Some(&first) = stack.first() {
        stack.push(first);
        loops.push(stack);
    }
    loops
}
