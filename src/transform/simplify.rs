//! Douglas-Peucker simplification, plain and topology-preserving.

use super::{check_tolerance, ensure_finite};
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::primitives::{
    locate_in_ring, segment_intersection, Coord, Location, Segment, SegmentIntersection,
};
use num_traits::Float;
use tracing::debug;

/// Simplifies every line and ring of a geometry with the Douglas-Peucker
/// algorithm.
///
/// Vertices closer than `tolerance` to the simplified line are removed;
/// endpoints are always kept. Rings that collapse below four coordinates
/// are dropped, and a polygon whose shell collapses is dropped with it.
/// Points pass through unchanged.
///
/// # Arguments
///
/// * `geometry` - The geometry to simplify
/// * `tolerance` - Distance tolerance, must be non-negative
///
/// # Example
///
/// ```
/// use planum::transform::simplify;
/// use planum::{Geometry, LineString};
///
/// let line: Geometry<f64> = LineString::from(vec![
///     (0.0, 0.0),
///     (1.0, 0.1),
///     (2.0, 0.0),
///     (3.0, 2.0),
///     (4.0, 0.0),
/// ])
/// .into();
///
/// let simplified = simplify(&line, 0.5).unwrap();
/// assert_eq!(simplified.coords().len(), 4);
/// ```
pub fn simplify<F: Float>(geometry: &Geometry<F>, tolerance: F) -> Result<Geometry<F>, PlanumError> {
    check_tolerance(tolerance)?;
    ensure_finite(geometry)?;
    Ok(simplify_geometry(geometry, tolerance))
}

fn simplify_geometry<F: Float>(geometry: &Geometry<F>, tolerance: F) -> Geometry<F> {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => geometry.clone(),
        Geometry::LineString(line) => Geometry::LineString(simplify_line(line, tolerance)),
        Geometry::MultiLineString(lines) => Geometry::MultiLineString(
            lines.iter().map(|l| simplify_line(l, tolerance)).collect(),
        ),
        Geometry::Polygon(polygon) => match simplify_polygon(polygon, tolerance) {
            Some(p) => Geometry::Polygon(p),
            None => Geometry::empty(),
        },
        Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
            polygons
                .iter()
                .filter_map(|p| simplify_polygon(p, tolerance))
                .collect(),
        ),
        Geometry::GeometryCollection(members) => Geometry::GeometryCollection(
            members
                .iter()
                .map(|m| simplify_geometry(m, tolerance))
                .filter(|m| !m.is_empty())
                .collect(),
        ),
    }
}

fn simplify_line<F: Float>(line: &LineString<F>, tolerance: F) -> LineString<F> {
    let coords = line.coords();
    LineString::new(
        douglas_peucker(coords, tolerance)
            .into_iter()
            .map(|i| coords[i])
            .collect(),
    )
}

fn simplify_polygon<F: Float>(polygon: &Polygon<F>, tolerance: F) -> Option<Polygon<F>> {
    let shell = simplify_ring(polygon.exterior(), tolerance)?;
    let holes = polygon
        .interiors()
        .iter()
        .filter_map(|h| simplify_ring(h, tolerance))
        .collect();
    Some(Polygon::new(shell, holes))
}

fn simplify_ring<F: Float>(ring: &LineString<F>, tolerance: F) -> Option<LineString<F>> {
    let simplified = simplify_line(ring, tolerance);
    (simplified.len() >= 4).then_some(simplified)
}

/// Indices of the vertices kept by Douglas-Peucker, in order.
///
/// Runs on an explicit stack of index ranges.
fn douglas_peucker<F: Float>(points: &[Coord<F>], tolerance: F) -> Vec<usize> {
    let n = points.len();
    if n < 3 {
        return (0..n).collect();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (max_idx, max_dist) = farthest(points, start, end);
        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}

/// The vertex strictly between `start` and `end` farthest from their chord,
/// with its distance. Requires `end > start + 1`.
fn farthest<F: Float>(points: &[Coord<F>], start: usize, end: usize) -> (usize, F) {
    let chord = Segment::new(points[start], points[end]);
    let mut best = (start + 1, F::neg_infinity());
    for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
        let dist = chord.distance_to_point(p);
        if dist > best.1 {
            best = (i, dist);
        }
    }
    best
}

/// Simplifies a geometry with Douglas-Peucker without changing its topology.
///
/// Works like [`simplify`], except that a run of vertices is replaced by its
/// chord only when the chord meets no other segment of the geometry away
/// from its own endpoints and the area between run and chord holds no other
/// vertex. Otherwise the run is split at its farthest vertex and each half
/// is tried again. Rings and closed lines keep at least four coordinates,
/// so no member disappears and valid polygons stay valid.
///
/// # Example
///
/// ```
/// use planum::transform::{simplify, simplify_preserve_topology};
/// use planum::{Geometry, LineString};
///
/// let lines = Geometry::MultiLineString(vec![
///     LineString::from(vec![(0.0, 0.0), (5.0, 3.0), (10.0, 0.0)]),
///     LineString::from(vec![(5.0, 2.0), (5.0, -1.0)]),
/// ]);
///
/// // Plain simplification drops the peak and cuts through the second line.
/// assert_eq!(simplify(&lines, 5.0).unwrap().coords().len(), 4);
/// assert_eq!(simplify_preserve_topology(&lines, 5.0).unwrap(), lines);
/// ```
pub fn simplify_preserve_topology<F: Float>(
    geometry: &Geometry<F>,
    tolerance: F,
) -> Result<Geometry<F>, PlanumError> {
    check_tolerance(tolerance)?;
    ensure_finite(geometry)?;

    let mut chains = Vec::new();
    collect_chains(geometry, &mut chains);
    let keep = TopologySimplifier::new(&chains, tolerance).run();
    debug!(chains = chains.len(), "topology-preserving simplification");

    let mut kept = chains.iter().zip(keep).map(|(chain, keep)| {
        chain
            .coords
            .iter()
            .zip(keep)
            .filter_map(|(&c, k)| k.then_some(c))
            .collect::<Vec<_>>()
    });
    Ok(rebuild(geometry, &mut kept))
}

/// A line or ring taking part in topology-preserving simplification.
struct Chain<F> {
    coords: Vec<Coord<F>>,
    ring: bool,
}

fn collect_chains<F: Float>(geometry: &Geometry<F>, out: &mut Vec<Chain<F>>) {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::LineString(line) => out.push(line_chain(line)),
        Geometry::MultiLineString(lines) => out.extend(lines.iter().map(line_chain)),
        Geometry::Polygon(polygon) => out.extend(polygon_chains(polygon)),
        Geometry::MultiPolygon(polygons) => out.extend(polygons.iter().flat_map(polygon_chains)),
        Geometry::GeometryCollection(members) => {
            for member in members {
                collect_chains(member, out);
            }
        }
    }
}

fn line_chain<F: Float>(line: &LineString<F>) -> Chain<F> {
    Chain {
        coords: line.coords().to_vec(),
        ring: line.len() >= 4 && line.is_closed(),
    }
}

fn polygon_chains<F: Float>(polygon: &Polygon<F>) -> impl Iterator<Item = Chain<F>> + '_ {
    polygon.rings().map(|r| Chain {
        coords: r.coords().to_vec(),
        ring: r.len() >= 4,
    })
}

/// Rebuilds `geometry` from simplified chains given in collection order.
fn rebuild<F: Float, I>(geometry: &Geometry<F>, chains: &mut I) -> Geometry<F>
where
    I: Iterator<Item = Vec<Coord<F>>>,
{
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => geometry.clone(),
        Geometry::LineString(_) => Geometry::LineString(next_line(chains)),
        Geometry::MultiLineString(lines) => {
            Geometry::MultiLineString(lines.iter().map(|_| next_line(chains)).collect())
        }
        Geometry::Polygon(polygon) => Geometry::Polygon(next_polygon(polygon, chains)),
        Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
            polygons.iter().map(|p| next_polygon(p, chains)).collect(),
        ),
        Geometry::GeometryCollection(members) => Geometry::GeometryCollection(
            members.iter().map(|m| rebuild(m, chains)).collect(),
        ),
    }
}

fn next_line<F: Float>(chains: &mut impl Iterator<Item = Vec<Coord<F>>>) -> LineString<F> {
    LineString::new(chains.next().unwrap_or_default())
}

fn next_polygon<F: Float>(
    polygon: &Polygon<F>,
    chains: &mut impl Iterator<Item = Vec<Coord<F>>>,
) -> Polygon<F> {
    let shell = next_line(chains);
    let holes = polygon.interiors().iter().map(|_| next_line(chains)).collect();
    Polygon::new(shell, holes)
}

/// Douglas-Peucker over every chain at once, keeping the current state of
/// all chains in `keep` so each accepted chord is checked against what is
/// left of the geometry.
struct TopologySimplifier<'a, F> {
    chains: &'a [Chain<F>],
    keep: Vec<Vec<bool>>,
    tolerance: F,
}

impl<'a, F: Float> TopologySimplifier<'a, F> {
    fn new(chains: &'a [Chain<F>], tolerance: F) -> Self {
        Self {
            chains,
            keep: chains.iter().map(|c| vec![true; c.coords.len()]).collect(),
            tolerance,
        }
    }

    fn run(mut self) -> Vec<Vec<bool>> {
        for c in 0..self.chains.len() {
            self.simplify_chain(c);
        }
        self.keep
    }

    fn simplify_chain(&mut self, c: usize) {
        let chains = self.chains;
        let chain = &chains[c];
        let points = &chain.coords;
        if points.len() < 3 {
            return;
        }

        let mut stack = if chain.ring {
            ring_ranges(points)
        } else {
            vec![(0, points.len() - 1)]
        };
        while let Some((start, end)) = stack.pop() {
            if end <= start + 1 {
                continue;
            }
            let (far, dist) = farthest(points, start, end);
            if dist <= self.tolerance && self.chord_is_free(c, start, end) {
                self.keep[c][start + 1..end].fill(false);
            } else {
                stack.push((start, far));
                stack.push((far, end));
            }
        }
    }

    /// Checks that replacing vertices `start..=end` of chain `c` by their
    /// chord changes no contact with the rest of the geometry.
    fn chord_is_free(&self, c: usize, start: usize, end: usize) -> bool {
        let run = &self.chains[c].coords[start..=end];
        let (a, b) = (run[0], run[run.len() - 1]);

        for (k, chain) in self.chains.iter().enumerate() {
            let mut prev: Option<(usize, Coord<F>)> = None;
            for (i, &p) in chain.coords.iter().enumerate() {
                if !self.keep[k][i] {
                    continue;
                }
                let in_run = k == c && (start..=end).contains(&i);
                if !in_run && locate_in_ring(p, run) == Location::Interior {
                    return false;
                }
                if let Some((j, q)) = prev {
                    let replaced = k == c && j >= start && i <= end;
                    if !replaced && chord_blocked(a, b, q, p) {
                        return false;
                    }
                }
                prev = Some((i, p));
            }
        }
        true
    }
}

/// Initial ranges of a ring: split at the vertex farthest from the first
/// and at the vertex farthest from that diagonal, so at least four
/// coordinates survive.
fn ring_ranges<F: Float>(points: &[Coord<F>]) -> Vec<(usize, usize)> {
    let last = points.len() - 1;
    let origin = points[0];
    let mut first = 1;
    for i in 2..last {
        if origin.distance_squared(points[i]) > origin.distance_squared(points[first]) {
            first = i;
        }
    }
    let diagonal = Segment::new(origin, points[first]);
    let mut second = if first == 1 { 2 } else { 1 };
    for i in 1..last {
        if i != first && diagonal.distance_to_point(points[i]) > diagonal.distance_to_point(points[second]) {
            second = i;
        }
    }
    let mut cuts = [0, first, second, last];
    cuts.sort_unstable();
    cuts.windows(2).map(|w| (w[0], w[1])).collect()
}

/// The chord `a b` meets segment `q p` anywhere but at the chord's ends.
fn chord_blocked<F: Float>(a: Coord<F>, b: Coord<F>, q: Coord<F>, p: Coord<F>) -> bool {
    match segment_intersection(a, b, q, p) {
        SegmentIntersection::None => false,
        SegmentIntersection::Point(x) => x != a && x != b,
        SegmentIntersection::Collinear(..) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    #[test]
    fn test_straight_line_collapses() {
        let points: Vec<Coord<f64>> = (0..10).map(|i| c(f64::from(i), 0.0)).collect();
        assert_eq!(douglas_peucker(&points, 0.1), vec![0, 9]);
    }

    #[test]
    fn test_zero_tolerance_keeps_corners() {
        let points = vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(2.0, 1.0)];
        assert_eq!(douglas_peucker(&points, 0.0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_short_input() {
        assert_eq!(douglas_peucker::<f64>(&[], 1.0), Vec::<usize>::new());
        assert_eq!(douglas_peucker(&[c(1.0, 2.0)], 1.0), vec![0]);
    }

    #[test]
    fn test_polygon_keeps_shape() {
        let polygon: Geometry<f64> = Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (5.0, 0.05),
                (10.0, 0.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ]),
            vec![],
        )
        .into();
        let simplified = simplify(&polygon, 0.1).unwrap();
        assert_eq!(simplified.coords().len(), 5);
        assert_relative_eq!(simplified.area(), 100.0);
    }

    #[test]
    fn test_collapsed_polygon_dropped() {
        let sliver: Geometry<f64> = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (5.0, 0.1), (0.0, 0.0)]),
            vec![],
        )
        .into();
        assert_eq!(simplify(&sliver, 1.0).unwrap(), Geometry::empty());
    }

    #[test]
    fn test_topology_unobstructed_matches_plain() {
        let line: Geometry<f64> = LineString::from(vec![
            (0.0, 0.0),
            (1.0, 0.1),
            (2.0, 0.0),
            (3.0, 2.0),
            (4.0, 0.0),
        ])
        .into();
        assert_eq!(
            simplify_preserve_topology(&line, 0.5).unwrap(),
            simplify(&line, 0.5).unwrap()
        );
    }

    #[test]
    fn test_topology_keeps_hole_inside_shell() {
        // The hole sits in a shallow bump of the shell's top edge.
        let polygon: Geometry<f64> = Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (5.0, 11.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ]),
            vec![LineString::from(vec![
                (4.5, 10.2),
                (5.5, 10.2),
                (5.0, 10.6),
                (4.5, 10.2),
            ])],
        )
        .into();

        // Plain simplification flattens the bump and loses the hole.
        assert_eq!(simplify(&polygon, 1.5).unwrap().coords().len(), 5);
        assert_eq!(simplify_preserve_topology(&polygon, 1.5).unwrap(), polygon);
    }

    #[test]
    fn test_topology_chord_crossing_other_line() {
        // The second line crosses the peak's chord but has no vertex under it.
        let lines = Geometry::MultiLineString(vec![
            LineString::from(vec![(0.0, 0.0), (5.0, 3.0), (10.0, 0.0)]),
            LineString::from(vec![(2.0, -1.0), (8.0, 5.0)]),
        ]);
        assert_eq!(simplify(&lines, 5.0).unwrap().coords().len(), 4);
        assert_eq!(simplify_preserve_topology(&lines, 5.0).unwrap(), lines);
    }

    #[test]
    fn test_topology_ring_survives() {
        let square: Geometry<f64> = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![],
        )
        .into();
        assert_eq!(simplify(&square, 100.0).unwrap(), Geometry::empty());

        let kept = simplify_preserve_topology(&square, 100.0).unwrap();
        assert_eq!(kept.coords().len(), 4);
        assert_relative_eq!(kept.area(), 50.0);
    }

    #[test]
    fn test_topology_result_is_simple() {
        let spiral: Geometry<f64> = LineString::from(vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (1.0, 10.0),
            (1.0, 1.0),
            (9.0, 1.0),
            (9.0, 9.0),
            (2.0, 9.0),
        ])
        .into();
        for tolerance in [0.5, 1.0, 2.0, 5.0, 8.0, 20.0] {
            let simplified = simplify_preserve_topology(&spiral, tolerance).unwrap();
            assert!(crate::transform::is_simple(&simplified).unwrap(), "tolerance {tolerance}");
        }
    }

    #[test]
    fn test_negative_tolerance() {
        let p = Geometry::Point(c(0.0, 0.0));
        assert!(matches!(
            simplify(&p, -1.0),
            Err(PlanumError::InvalidParameter { name: "tolerance", .. })
        ));
        assert!(simplify(&p, f64::NAN).is_err());
        assert!(simplify_preserve_topology(&p, -0.5).is_err());
    }
}
