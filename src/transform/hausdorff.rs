//! Discrete Hausdorff distance.
//!
//! For vertex sets A and B:
//! - **Directed Hausdorff**: h(A,B) = max_{a∈A} min_{b∈B} d(a,b)
//! - **Hausdorff distance**: H(A,B) = max(h(A,B), h(B,A))
//!
//! The discrete distance only looks at vertices. Densifying the segments
//! first brings it closer to the continuous distance.

use super::ensure_finite;
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString};
use crate::primitives::Coord;
use num_traits::Float;

/// Hausdorff distance between the vertex sets of two geometries.
///
/// Returns 0 if either geometry is empty.
///
/// # Example
///
/// ```
/// use planum::transform::hausdorff_distance;
/// use planum::{Geometry, LineString};
///
/// let a: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]).into();
/// let b: Geometry<f64> = LineString::from(vec![(0.0, 0.5), (2.0, 0.5)]).into();
/// assert_eq!(hausdorff_distance(&a, &b).unwrap(), 0.5);
/// ```
pub fn hausdorff_distance<F: Float>(a: &Geometry<F>, b: &Geometry<F>) -> Result<F, PlanumError> {
    ensure_finite(a)?;
    ensure_finite(b)?;
    Ok(symmetric(&a.coords(), &b.coords()))
}

/// Hausdorff distance after splitting every segment into `ceil(1 / fraction)`
/// equal pieces.
///
/// # Arguments
///
/// * `a`, `b` - The geometries to compare
/// * `fraction` - Piece length as a fraction of the segment, in (0, 1]
///
/// # Returns
///
/// The distance between the densified vertex sets, or
/// [`PlanumError::InvalidParameter`] when `fraction` is out of range.
pub fn hausdorff_distance_densify<F: Float>(
    a: &Geometry<F>,
    b: &Geometry<F>,
    fraction: F,
) -> Result<F, PlanumError> {
    if !(fraction > F::zero() && fraction <= F::one()) {
        return Err(PlanumError::InvalidParameter {
            name: "fraction",
            reason: "must lie in (0, 1]",
        });
    }
    ensure_finite(a)?;
    ensure_finite(b)?;
    let pieces = (F::one() / fraction).ceil().to_usize().unwrap_or(1).max(1);
    Ok(symmetric(&densify(a, pieces), &densify(b, pieces)))
}

fn symmetric<F: Float>(a: &[Coord<F>], b: &[Coord<F>]) -> F {
    directed(a, b).max(directed(b, a))
}

fn directed<F: Float>(a: &[Coord<F>], b: &[Coord<F>]) -> F {
    if a.is_empty() || b.is_empty() {
        return F::zero();
    }
    let mut max_sq = F::zero();
    for &pa in a {
        let min_sq = b
            .iter()
            .map(|&pb| pa.distance_squared(pb))
            .fold(F::infinity(), F::min);
        if min_sq > max_sq {
            max_sq = min_sq;
        }
    }
    max_sq.sqrt()
}

fn densify<F: Float>(geometry: &Geometry<F>, pieces: usize) -> Vec<Coord<F>> {
    let mut out = Vec::new();
    densify_into(geometry, pieces, &mut out);
    out
}

fn densify_into<F: Float>(geometry: &Geometry<F>, pieces: usize, out: &mut Vec<Coord<F>>) {
    match geometry {
        Geometry::Point(p) => out.push(*p),
        Geometry::MultiPoint(points) => out.extend_from_slice(points),
        Geometry::LineString(line) => densify_line(line, pieces, out),
        Geometry::MultiLineString(lines) => {
            for line in lines {
                densify_line(line, pieces, out);
            }
        }
        Geometry::Polygon(polygon) => {
            for ring in polygon.rings() {
                densify_line(ring, pieces, out);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            for ring in polygons.iter().flat_map(|p| p.rings()) {
                densify_line(ring, pieces, out);
            }
        }
        Geometry::GeometryCollection(members) => {
            for member in members {
                densify_into(member, pieces, out);
            }
        }
    }
}

fn densify_line<F: Float>(line: &LineString<F>, pieces: usize, out: &mut Vec<Coord<F>>) {
    let Some(&first) = line.coords().first() else {
        return;
    };
    out.push(first);
    let n = F::from(pieces).unwrap_or_else(F::one);
    for (a, b) in line.segments() {
        for k in 1..pieces {
            let t = F::from(k).unwrap_or_else(F::zero) / n;
            out.push(a.lerp(b, t));
        }
        out.push(b);
    }
}
