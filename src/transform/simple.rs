//! Simplicity test.

use super::ensure_finite;
use crate::bounds::{sweep_pairs, Bound};
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::primitives::{
    dedup_consecutive, find_self_intersection, segment_intersection, Coord, OrdCoord,
    SegmentIntersection,
};
use num_traits::Float;
use std::collections::BTreeSet;
use std::slice;

/// Returns `true` if the geometry has no anomalous points.
///
/// - Points are simple when no two are equal.
/// - A line is simple when it never passes through the same point twice,
///   except that a closed line may end where it starts. Lines of a
///   multi-line may meet only at endpoints of both.
/// - Polygons are simple when no ring touches or crosses itself.
/// - A collection is simple when every member is.
///
/// # Example
///
/// ```
/// use planum::transform::is_simple;
/// use planum::{Geometry, LineString};
///
/// let zigzag: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]).into();
/// assert!(!is_simple(&zigzag).unwrap());
/// ```
pub fn is_simple<F: Float>(geometry: &Geometry<F>) -> Result<bool, PlanumError> {
    ensure_finite(geometry)?;
    Ok(simple(geometry))
}

fn simple<F: Float>(geometry: &Geometry<F>) -> bool {
    match geometry {
        Geometry::Point(_) => true,
        Geometry::MultiPoint(points) => {
            let mut seen = BTreeSet::new();
            points.iter().all(|&p| seen.insert(OrdCoord(p)))
        }
        Geometry::LineString(line) => simple_lines(slice::from_ref(line)),
        Geometry::MultiLineString(lines) => simple_lines(lines),
        Geometry::Polygon(polygon) => simple_rings(polygon),
        Geometry::MultiPolygon(polygons) => polygons.iter().all(simple_rings),
        Geometry::GeometryCollection(members) => members.iter().all(simple),
    }
}

fn simple_rings<F: Float>(polygon: &Polygon<F>) -> bool {
    polygon
        .rings()
        .all(|r| find_self_intersection(r.coords()).is_none())
}

struct Edge<F> {
    start: Coord<F>,
    end: Coord<F>,
    line: usize,
    index: usize,
}

fn simple_lines<F: Float>(lines: &[LineString<F>]) -> bool {
    let paths: Vec<Vec<Coord<F>>> = lines.iter().map(|l| dedup_consecutive(l.coords())).collect();
    let edges: Vec<Edge<F>> = paths
        .iter()
        .enumerate()
        .flat_map(|(line, path)| {
            path.windows(2).enumerate().map(move |(index, w)| Edge {
                start: w[0],
                end: w[1],
                line,
                index,
            })
        })
        .collect();
    let bounds: Vec<Bound<F>> = edges
        .iter()
        .map(|e| Bound::from_corners(e.start, e.end))
        .collect();

    sweep_pairs(&bounds).into_iter().all(|(i, j)| {
        let (s, t) = (&edges[i], &edges[j]);
        let hit = segment_intersection(s.start, s.end, t.start, t.end);
        let p = match hit {
            SegmentIntersection::None => return true,
            SegmentIntersection::Collinear(..) => return false,
            SegmentIntersection::Point(p) => p,
        };
        if s.line != t.line {
            return is_endpoint(&paths[s.line], p) && is_endpoint(&paths[t.line], p);
        }
        let path = &paths[s.line];
        let last = path.len() - 2;
        let (lo, hi) = (s.index.min(t.index), s.index.max(t.index));
        if hi == lo + 1 {
            return p == path[hi];
        }
        lo == 0 && hi == last && p == path[0] && path[0] == path[path.len() - 1]
    })
}

fn is_endpoint<F: Float>(path: &[Coord<F>], p: Coord<F>) -> bool {
    path.first() == Some(&p) || path.last() == Some(&p)
}
