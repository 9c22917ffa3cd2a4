//! Set operations on point sets.

use super::{points_geometry, Clipping, OverlayOp};
use crate::error::PlanumError;
use crate::geometry::Geometry;
use crate::primitives::{Coord, OrdCoord};
use num_traits::Float;
use std::collections::BTreeSet;

/// Overlay of two point sets.
///
/// Both operands are deduplicated on construction. Results keep the order
/// in which points first appear, subject before clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct PointClipping<F> {
    subject: Vec<Coord<F>>,
    clipping: Vec<Coord<F>>,
}

impl<F: Float> PointClipping<F> {
    /// Creates an overlay of `subject` and `clipping`.
    ///
    /// Fails with [`PlanumError::InvalidCoordinate`] on a non-finite point.
    pub fn new(subject: &[Coord<F>], clipping: &[Coord<F>]) -> Result<Self, PlanumError> {
        if subject.iter().chain(clipping).any(|c| !c.is_finite()) {
            return Err(PlanumError::InvalidCoordinate);
        }
        Ok(Self {
            subject: distinct(subject),
            clipping: distinct(clipping),
        })
    }

    pub fn subject(&self) -> &[Coord<F>] {
        &self.subject
    }

    pub fn clipping(&self) -> &[Coord<F>] {
        &self.clipping
    }
}

impl<F: Float> Clipping<F> for PointClipping<F> {
    fn overlay(&self, op: OverlayOp) -> Result<Geometry<F>, PlanumError> {
        Ok(overlay_points(&self.subject, &self.clipping, op))
    }
}

/// Overlays two sets of distinct points.
pub(crate) fn overlay_points<F: Float>(
    subject: &[Coord<F>],
    clipping: &[Coord<F>],
    op: OverlayOp,
) -> Geometry<F> {
    let in_subject: BTreeSet<OrdCoord<F>> = subject.iter().map(|&c| OrdCoord(c)).collect();
    let in_clipping: BTreeSet<OrdCoord<F>> = clipping.iter().map(|&c| OrdCoord(c)).collect();

    let mut out: Vec<Coord<F>> = subject
        .iter()
        .copied()
        .filter(|&c| op.select(true, in_clipping.contains(&OrdCoord(c))))
        .collect();
    out.extend(
        clipping
            .iter()
            .copied()
            .filter(|&c| !in_subject.contains(&OrdCoord(c)) && op.select(false, true)),
    );
    points_geometry(out)
}

fn distinct<F: Float>(points: &[Coord<F>]) -> Vec<Coord<F>> {
    let mut seen = BTreeSet::new();
    points
        .iter()
        .copied()
        .filter(|&p| seen.insert(OrdCoord(p)))
        .collect()
}
