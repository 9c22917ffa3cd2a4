//! Convex hull.

use super::ensure_finite;
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::primitives::{orient2d, Coord, Orientation};
use num_traits::Float;

/// Computes the convex hull of every coordinate of a geometry using Andrew's
/// monotone chain algorithm.
///
/// # Algorithm
///
/// 1. Sort the distinct coordinates lexicographically (by x, then by y)
/// 2. Build the lower hull from left to right
/// 3. Build the upper hull from right to left
/// 4. Concatenate, removing the repeated endpoints
///
/// Turns are decided with the exact [`orient2d`] predicate, so collinear
/// points on the hull boundary are dropped.
///
/// # Complexity
///
/// - Time: O(n log n) due to sorting
/// - Space: O(n)
///
/// # Returns
///
/// - the empty geometry for empty input
/// - a `Point` when there is a single distinct coordinate
/// - a two-point `LineString` between the extreme points of collinear input
/// - otherwise a `Polygon` whose shell runs counter-clockwise from the
///   lexicographically smallest vertex
///
/// # Example
///
/// ```
/// use planum::transform::convex_hull;
/// use planum::{Geometry, LineString};
///
/// let zigzag: Geometry<f64> = LineString::from(vec![
///     (0.0, 0.0),
///     (1.0, 2.0),
///     (2.0, 0.0),
///     (3.0, 2.0),
/// ])
/// .into();
///
/// let hull = convex_hull(&zigzag).unwrap();
/// assert_eq!(hull.area(), 4.0);
/// ```
pub fn convex_hull<F: Float>(geometry: &Geometry<F>) -> Result<Geometry<F>, PlanumError> {
    ensure_finite(geometry)?;

    let mut sorted = geometry.coords();
    sorted.sort_by(|a, b| a.lex_cmp(b));
    sorted.dedup();

    match sorted.len() {
        0 => return Ok(Geometry::empty()),
        1 => return Ok(Geometry::Point(sorted[0])),
        _ => {}
    }

    let lower = half_hull(sorted.iter().copied());
    let upper = half_hull(sorted.iter().rev().copied());

    // Each half ends where the other starts.
    let mut ring: Vec<Coord<F>> = lower[..lower.len() - 1].to_vec();
    ring.extend_from_slice(&upper[..upper.len() - 1]);

    if ring.len() < 3 {
        let (first, last) = (sorted[0], sorted[sorted.len() - 1]);
        return Ok(Geometry::LineString(LineString::new(vec![first, last])));
    }
    ring.push(ring[0]);
    Ok(Geometry::Polygon(Polygon::new(LineString::new(ring), Vec::new())))
}

fn half_hull<F: Float>(points: impl Iterator<Item = Coord<F>>) -> Vec<Coord<F>> {
    let mut chain: Vec<Coord<F>> = Vec::new();
    for p in points {
        while chain.len() >= 2
            && orient2d(chain[chain.len() - 2], chain[chain.len() - 1], p)
                != Orientation::CounterClockwise
        {
            chain.pop();
        }
        chain.push(p);
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    #[test]
    fn test_square_with_interior_points() {
        let points = Geometry::MultiPoint(vec![
            c(0.5, 0.5),
            c(1.0, 1.0),
            c(0.0, 0.0),
            c(1.0, 0.0),
            c(0.0, 1.0),
            c(0.5, 0.0),
        ]);
        let hull = convex_hull(&points).unwrap();
        assert_eq!(
            hull,
            Geometry::Polygon(Polygon::new(
                LineString::new(vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)]),
                Vec::new(),
            ))
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(convex_hull::<f64>(&Geometry::empty()).unwrap(), Geometry::empty());
        assert_eq!(
            convex_hull(&Geometry::MultiPoint(vec![c(1.0, 1.0), c(1.0, 1.0)])).unwrap(),
            Geometry::Point(c(1.0, 1.0))
        );
        let collinear = Geometry::MultiPoint(vec![c(2.0, 2.0), c(0.0, 0.0), c(1.0, 1.0)]);
        assert_eq!(
            convex_hull(&collinear).unwrap(),
            Geometry::LineString(LineString::new(vec![c(0.0, 0.0), c(2.0, 2.0)]))
        );
    }

    #[test]
    fn test_hull_of_polygon_with_hole() {
        let polygon: Geometry<f64> = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
            vec![LineString::from(vec![(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0), (1.0, 1.0)])],
        )
        .into();
        assert_relative_eq!(convex_hull(&polygon).unwrap().area(), 16.0);
    }

    #[test]
    fn test_rejects_nan() {
        let g = Geometry::MultiPoint(vec![c(0.0, 0.0), c(f64::NAN, 1.0)]);
        assert_eq!(convex_hull(&g), Err(PlanumError::InvalidCoordinate));
    }
}
