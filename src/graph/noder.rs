//! Noding: splitting a segment soup at every mutual intersection.

use super::Operand;
use crate::bounds::{sweep_pairs, Bound};
use crate::primitives::{ring_segments, segment_intersection, Coord, SegmentIntersection};
use num_traits::Float;
use std::cmp::Ordering;

/// What an input segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    /// A segment of an open or closed line.
    Line,
    /// A segment of a polygon ring, directed with the polygon's interior on
    /// its left.
    Ring,
}

/// An input segment tagged with its operand (0 or 1), the member of that
/// operand it came from (line or polygon index) and its role.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceSegment<F> {
    pub start: Coord<F>,
    pub end: Coord<F>,
    pub operand: usize,
    pub member: usize,
    pub role: Role,
}

/// A piece of a source segment between two consecutive cut points.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodedPiece<F> {
    pub from: Coord<F>,
    pub to: Coord<F>,
    pub source: usize,
}

/// Appends the segments of `operand` to `out`, tagged with `index`.
///
/// Zero-length segments are skipped; points contribute nothing.
pub(crate) fn push_segments<F: Float>(
    operand: &Operand<F>,
    index: usize,
    out: &mut Vec<SourceSegment<F>>,
) {
    match operand {
        Operand::Empty | Operand::Puntal(_) => {}
        Operand::Lineal(lines) => {
            for (member, line) in lines.iter().enumerate() {
                push_pairs(line.segments(), (index, member), Role::Line, out);
            }
        }
        Operand::Areal(polygons) => {
            for (member, polygon) in polygons.iter().enumerate() {
                for ring in polygon.rings() {
                    push_pairs(ring_segments(ring.coords()), (index, member), Role::Ring, out);
                }
            }
        }
    }
}

fn push_pairs<F: Float>(
    pairs: impl Iterator<Item = (Coord<F>, Coord<F>)>,
    (operand, member): (usize, usize),
    role: Role,
    out: &mut Vec<SourceSegment<F>>,
) {
    out.extend(pairs.filter(|(a, b)| a != b).map(|(start, end)| SourceSegment {
        start,
        end,
        operand,
        member,
        role,
    }));
}

/// Splits every segment at the points where it meets any other segment.
///
/// Candidate pairs come from a sweep over the segment bounds. Cut points on
/// a segment are ordered along it; the pieces between consecutive distinct
/// cut points are returned in source order.
pub(crate) fn node_segments<F: Float>(segments: &[SourceSegment<F>]) -> Vec<NodedPiece<F>> {
    let bounds: Vec<Bound<F>> = segments
        .iter()
        .map(|s| Bound::from_corners(s.start, s.end))
        .collect();

    let mut cuts: Vec<Vec<Coord<F>>> = segments.iter().map(|s| vec![s.start, s.end]).collect();
    for (i, j) in sweep_pairs(&bounds) {
        let (s, t) = (&segments[i], &segments[j]);
        match segment_intersection(s.start, s.end, t.start, t.end) {
            SegmentIntersection::None => {}
            SegmentIntersection::Point(p) => {
                cuts[i].push(p);
                cuts[j].push(p);
            }
            SegmentIntersection::Collinear(a, b) => {
                cuts[i].extend([a, b]);
                cuts[j].extend([a, b]);
            }
        }
    }

    let mut pieces = Vec::with_capacity(segments.len());
    for (source, (segment, mut points)) in segments.iter().zip(cuts).enumerate() {
        let dir = segment.end - segment.start;
        points.sort_by(|a, b| {
            let ta = (*a - segment.start).dot(dir);
            let tb = (*b - segment.start).dot(dir);
            ta.partial_cmp(&tb)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.lex_cmp(b))
        });
        points.dedup();
        pieces.extend(points.windows(2).map(|w| NodedPiece {
            from: w[0],
            to: w[1],
            source,
        }));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    fn seg(a: Coord<f64>, b: Coord<f64>, operand: usize) -> SourceSegment<f64> {
        SourceSegment {
            start: a,
            end: b,
            operand,
            member: 0,
            role: Role::Line,
        }
    }

    #[test]
    fn test_crossing_segments_split() {
        let segments = vec![
            seg(c(0.0, 0.0), c(2.0, 2.0), 0),
            seg(c(0.0, 2.0), c(2.0, 0.0), 1),
        ];
        let pieces = node_segments(&segments);
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| p.from == c(1.0, 1.0) || p.to == c(1.0, 1.0)));
    }

    #[test]
    fn test_overlap_split_in_order() {
        let segments = vec![
            seg(c(10.0, 0.0), c(0.0, 0.0), 0),
            seg(c(2.0, 0.0), c(6.0, 0.0), 1),
        ];
        let pieces = node_segments(&segments);
        let first: Vec<(Coord<f64>, Coord<f64>)> = pieces
            .iter()
            .filter(|p| p.source == 0)
            .map(|p| (p.from, p.to))
            .collect();
        assert_eq!(
            first,
            vec![
                (c(10.0, 0.0), c(6.0, 0.0)),
                (c(6.0, 0.0), c(2.0, 0.0)),
                (c(2.0, 0.0), c(0.0, 0.0)),
            ]
        );
        assert_eq!(pieces.iter().filter(|p| p.source == 1).count(), 1);
    }

    #[test]
    fn test_touching_at_interior_point() {
        let segments = vec![
            seg(c(0.0, 0.0), c(4.0, 0.0), 0),
            seg(c(1.0, 0.0), c(1.0, 3.0), 0),
        ];
        let pieces = node_segments(&segments);
        assert_eq!(pieces.len(), 3);
    }

    #[test]
    fn test_push_segments_skips_repeats() {
        use crate::geometry::LineString;
        let operand = Operand::Lineal(vec![LineString::from(vec![
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
        ])]);
        let mut out = Vec::new();
        push_segments(&operand, 1, &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.operand == 1 && s.role == Role::Line));
    }
}
