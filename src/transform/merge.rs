//! Sewing lines together.

use super::ensure_finite;
use crate::clipping::lines_geometry;
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString};
use crate::graph::merge_pieces;
use crate::primitives::dedup_consecutive;
use num_traits::Float;

/// Merges the lines of a `MultiLineString` wherever exactly two of them
/// meet end to end.
///
/// Lines are joined through endpoints shared by exactly two lines; lines
/// meeting at a node of any other degree stay separate. Closed chains come
/// back as closed lines. Any other geometry kind fails with
/// [`PlanumError::UnsupportedGeometry`].
///
/// # Example
///
/// ```
/// use planum::transform::line_merge;
/// use planum::{Geometry, LineString};
///
/// let parts = Geometry::MultiLineString(vec![
///     LineString::from(vec![(1.0, 0.0), (2.0, 0.0)]),
///     LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]),
/// ]);
/// assert_eq!(
///     line_merge(&parts).unwrap(),
///     Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]))
/// );
/// ```
pub fn line_merge<F: Float>(geometry: &Geometry<F>) -> Result<Geometry<F>, PlanumError> {
    let Geometry::MultiLineString(lines) = geometry else {
        return Err(PlanumError::UnsupportedGeometry {
            operation: "line_merge",
            found: geometry.geometry_type(),
        });
    };
    ensure_finite(geometry)?;

    let pieces: Vec<_> = lines
        .iter()
        .map(|l| dedup_consecutive(l.coords()))
        .filter(|c| c.len() >= 2)
        .collect();
    Ok(lines_geometry(
        merge_pieces(&pieces).into_iter().map(LineString::new).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(coords: Vec<(f64, f64)>) -> LineString<f64> {
        LineString::from(coords)
    }

    #[test]
    fn test_branch_stays_split() {
        let g = Geometry::MultiLineString(vec![
            line(vec![(0.0, 0.0), (1.0, 0.0)]),
            line(vec![(1.0, 0.0), (2.0, 0.0)]),
            line(vec![(1.0, 0.0), (1.0, 1.0)]),
        ]);
        match line_merge(&g).unwrap() {
            Geometry::MultiLineString(lines) => assert_eq!(lines.len(), 3),
            other => panic!("expected three lines, got {other:?}"),
        }
    }

    #[test]
    fn test_closed_chain() {
        let g = Geometry::MultiLineString(vec![
            line(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]),
            line(vec![(1.0, 1.0), (0.0, 0.0)]),
        ]);
        match line_merge(&g).unwrap() {
            Geometry::LineString(l) => {
                assert!(l.is_closed());
                assert_eq!(l.len(), 4);
            }
            other => panic!("expected a closed line, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_other_kinds() {
        let g: Geometry<f64> = line(vec![(0.0, 0.0), (1.0, 0.0)]).into();
        assert_eq!(
            line_merge(&g),
            Err(PlanumError::UnsupportedGeometry {
                operation: "line_merge",
                found: "LineString",
            })
        );
    }
}
