//! Interior points.

use super::centroid::{centroid, collect, Parts};
use super::ensure_finite;
use crate::error::PlanumError;
use crate::geometry::{Geometry, Polygon};
use crate::primitives::{ring_segments, Coord};
use crate::relate::Dimension;
use num_traits::Float;
use std::cmp::Ordering;

/// A point guaranteed to lie on the geometry.
///
/// Like [`centroid`], only the members of the highest dimension count.
///
/// - Polygons: a horizontal scan line is placed between vertex heights near
///   the middle of each polygon, and the midpoint of the widest interior
///   span it cuts is returned. The point lies in the interior.
/// - Lines: the interior vertex nearest the centroid, or the nearest
///   endpoint when no line has an interior vertex.
/// - Points: the point nearest the centroid.
///
/// Returns `None` for empty input.
///
/// # Example
///
/// ```
/// use planum::transform::point_on_surface;
/// use planum::{locate, Geometry, LineString, Location, Polygon};
///
/// // A U shape whose centroid falls in the gap between the arms.
/// let u: Geometry<f64> = Polygon::new(
///     LineString::from(vec![
///         (0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (2.0, 3.0),
///         (2.0, 1.0), (1.0, 1.0), (1.0, 3.0), (0.0, 3.0), (0.0, 0.0),
///     ]),
///     vec![],
/// )
/// .into();
///
/// let p = point_on_surface(&u).unwrap().unwrap();
/// assert_eq!(locate(p, &u), Location::Interior);
/// ```
pub fn point_on_surface<F: Float>(geometry: &Geometry<F>) -> Result<Option<Coord<F>>, PlanumError> {
    ensure_finite(geometry)?;
    let dim = geometry.dimension();
    let mut parts = Parts::default();
    collect(geometry, dim, &mut parts);

    let point = match dim {
        Dimension::Empty => None,
        Dimension::Area => widest_span(&parts.polygons).or_else(|| {
            parts
                .polygons
                .iter()
                .find_map(|p| p.exterior().coords().first().copied())
        }),
        Dimension::Line => {
            let target = centroid(geometry)?;
            let interior = parts.lines.iter().flat_map(|l| {
                let coords = l.coords();
                coords.get(1..coords.len().saturating_sub(1)).unwrap_or(&[]).iter().copied()
            });
            let ends = parts
                .lines
                .iter()
                .flat_map(|l| l.coords().first().into_iter().chain(l.coords().last()))
                .copied();
            nearest(interior, target).or_else(|| nearest(ends, target))
        }
        Dimension::Point => nearest(parts.points.iter().copied(), centroid(geometry)?),
    };
    Ok(point)
}

fn nearest<F: Float>(candidates: impl Iterator<Item = Coord<F>>, target: Option<Coord<F>>) -> Option<Coord<F>> {
    let target = target?;
    candidates.min_by(|a, b| {
        a.distance_squared(target)
            .partial_cmp(&b.distance_squared(target))
            .unwrap_or(Ordering::Equal)
    })
}

/// Midpoint of the widest span cut by a scan line, over all polygons.
fn widest_span<F: Float>(polygons: &[Polygon<F>]) -> Option<Coord<F>> {
    let two = F::one() + F::one();
    let mut best: Option<(F, Coord<F>)> = None;
    for polygon in polygons {
        let Some(y) = scan_line(polygon) else {
            continue;
        };
        let mut xs: Vec<F> = polygon
            .rings()
            .flat_map(|r| ring_segments(r.coords()))
            .filter(|(a, b)| (a.y > y) != (b.y > y))
            .map(|(a, b)| a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
            .collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        for span in xs.chunks_exact(2) {
            let width = span[1] - span[0];
            if best.map_or(true, |(w, _)| width > w) {
                best = Some((width, Coord::new((span[0] + span[1]) / two, y)));
            }
        }
    }
    best.map(|(_, c)| c)
}

/// A height halfway between the two vertex heights that bracket the middle
/// of the polygon, so no vertex lies on it.
fn scan_line<F: Float>(polygon: &Polygon<F>) -> Option<F> {
    let bound = polygon.bound()?;
    let two = F::one() + F::one();
    let centre = (bound.min.y + bound.max.y) / two;
    let (mut lo, mut hi) = (bound.min.y, bound.max.y);
    for c in polygon.rings().flat_map(|r| r.coords()) {
        if c.y <= centre {
            lo = lo.max(c.y);
        } else {
            hi = hi.min(c.y);
        }
    }
    Some((lo + hi) / two)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LineString;
    use crate::primitives::Location;
    use crate::relate::locate;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    #[test]
    fn test_polygon_with_central_hole() {
        let holed: Geometry<f64> = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from(vec![(3.0, 3.0), (3.0, 7.0), (7.0, 7.0), (7.0, 3.0), (3.0, 3.0)])],
        )
        .into();
        let p = point_on_surface(&holed).unwrap().unwrap();
        assert_eq!(locate(p, &holed), Location::Interior);
        assert_eq!(p.y, 5.0);
    }

    #[test]
    fn test_triangle_scan_line_avoids_vertices() {
        let tri: Geometry<f64> = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (2.0, 2.0), (0.0, 0.0)]),
            vec![],
        )
        .into();
        assert_eq!(point_on_surface(&tri).unwrap(), Some(c(2.0, 1.0)));
    }

    #[test]
    fn test_multipolygon_takes_widest() {
        let square = |x0: f64, x1: f64| {
            Polygon::new(
                LineString::from(vec![(x0, 0.0), (x1, 0.0), (x1, 1.0), (x0, 1.0), (x0, 0.0)]),
                vec![],
            )
        };
        let g = Geometry::MultiPolygon(vec![square(0.0, 1.0), square(5.0, 9.0)]);
        assert_eq!(point_on_surface(&g).unwrap(), Some(c(7.0, 0.5)));
    }

    #[test]
    fn test_line_interior_vertex() {
        let g: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 5.0), (4.0, 5.0)]).into();
        let p = point_on_surface(&g).unwrap().unwrap();
        assert!(p == c(1.0, 0.0) || p == c(1.0, 5.0));
        assert_eq!(locate(p, &g), Location::Interior);

        let segment: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]).into();
        assert_eq!(point_on_surface(&segment).unwrap(), Some(c(0.0, 0.0)));
    }

    #[test]
    fn test_points_and_empty() {
        let g = Geometry::MultiPoint(vec![c(0.0, 0.0), c(10.0, 0.0), c(4.0, 1.0)]);
        assert_eq!(point_on_surface(&g).unwrap(), Some(c(4.0, 1.0)));
        assert_eq!(point_on_surface::<f64>(&Geometry::empty()).unwrap(), None);
    }
}
