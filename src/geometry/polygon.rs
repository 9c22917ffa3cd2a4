//! Polygons with holes.

use super::LineString;
use crate::bounds::{sweep_pairs, Bound};
use crate::error::{PlanumError, RingDefect};
use crate::primitives::{
    locate_in_ring, ring_segments, segment_intersection, signed_area, validate_ring, Coord,
    Location, SegmentIntersection,
};
use num_traits::Float;

/// A polygon: one exterior ring and zero or more interior rings (holes).
///
/// Rings may be given in either orientation. Operations work on a
/// [`normalized`](Polygon::normalized) copy with a counter-clockwise shell
/// and clockwise holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    exterior: LineString<F>,
    interiors: Vec<LineString<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a polygon from its exterior ring and holes.
    ///
    /// No validation happens here; see [`Polygon::validate`].
    pub fn new(exterior: LineString<F>, interiors: Vec<LineString<F>>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// The exterior ring.
    #[inline]
    pub fn exterior(&self) -> &LineString<F> {
        &self.exterior
    }

    /// The interior rings.
    #[inline]
    pub fn interiors(&self) -> &[LineString<F>] {
        &self.interiors
    }

    /// Iterates the exterior ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LineString<F>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Returns `true` if the exterior ring has no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// Area of the shell minus the areas of the holes.
    pub fn area(&self) -> F {
        let holes = self
            .interiors
            .iter()
            .fold(F::zero(), |acc, h| acc + signed_area(h.coords()).abs());
        signed_area(self.exterior.coords()).abs() - holes
    }

    /// Total length of all rings.
    pub fn perimeter(&self) -> F {
        self.rings().fold(F::zero(), |acc, r| acc + r.length())
    }

    /// Bounding box of the exterior ring.
    #[inline]
    pub fn bound(&self) -> Option<Bound<F>> {
        self.exterior.bound()
    }

    /// Returns a copy with a counter-clockwise shell and clockwise holes.
    pub fn normalized(&self) -> Self {
        let exterior = if signed_area(self.exterior.coords()) < F::zero() {
            self.exterior.reversed()
        } else {
            self.exterior.clone()
        };
        let interiors = self
            .interiors
            .iter()
            .map(|h| {
                if signed_area(h.coords()) > F::zero() {
                    h.reversed()
                } else {
                    h.clone()
                }
            })
            .collect();
        Self {
            exterior,
            interiors,
        }
    }

    /// Locates a point against the polygon.
    ///
    /// Points on any ring are on the boundary; points inside a hole are
    /// exterior.
    pub fn locate(&self, p: Coord<F>) -> Location {
        match locate_in_ring(p, self.exterior.coords()) {
            Location::Interior => {}
            other => return other,
        }
        for hole in &self.interiors {
            match locate_in_ring(p, hole.coords()) {
                Location::Interior => return Location::Exterior,
                Location::Boundary => return Location::Boundary,
                Location::Exterior => {}
            }
        }
        Location::Interior
    }

    /// Checks that the polygon is valid.
    ///
    /// Every ring must pass [`validate_ring`]. Holes must lie inside the
    /// shell and outside each other, and rings may touch only at isolated
    /// points: a shared edge or a crossing is rejected.
    pub fn validate(&self) -> Result<(), PlanumError> {
        for ring in self.rings() {
            validate_ring(ring.coords())?;
        }
        if self.interiors.is_empty() {
            return Ok(());
        }

        let shell = self.exterior.coords();
        for hole in &self.interiors {
            if hole
                .coords()
                .iter()
                .any(|&c| locate_in_ring(c, shell) == Location::Exterior)
            {
                return Err(PlanumError::ring(RingDefect::HoleOutsideShell));
            }
        }

        if let Some(p) = self.find_ring_crossing() {
            return Err(PlanumError::ring(RingDefect::RingsCross {
                x: p.x.to_f64().unwrap_or(f64::NAN),
                y: p.y.to_f64().unwrap_or(f64::NAN),
            }));
        }

        let bounds: Vec<Option<Bound<F>>> = self.interiors.iter().map(|h| h.bound()).collect();
        for (i, hole) in self.interiors.iter().enumerate() {
            for (j, other) in self.interiors.iter().enumerate() {
                if i == j {
                    continue;
                }
                let overlapping = match (bounds[i], bounds[j]) {
                    (Some(a), Some(b)) => a.intersects(b),
                    _ => false,
                };
                if overlapping
                    && hole
                        .coords()
                        .iter()
                        .any(|&c| locate_in_ring(c, other.coords()) == Location::Interior)
                {
                    return Err(PlanumError::ring(RingDefect::NestedHoles));
                }
            }
        }
        Ok(())
    }

    /// Finds a point where two different rings share an edge or cross.
    fn find_ring_crossing(&self) -> Option<Coord<F>> {
        let mut segments: Vec<(usize, Coord<F>, Coord<F>)> = Vec::new();
        for (r, ring) in self.rings().enumerate() {
            segments.extend(
                ring_segments(ring.coords())
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| (r, a, b)),
            );
        }
        let bounds: Vec<Bound<F>> = segments
            .iter()
            .map(|&(_, a, b)| Bound::from_corners(a, b))
            .collect();

        for (i, j) in sweep_pairs(&bounds) {
            let (ri, a1, a2) = segments[i];
            let (rj, b1, b2) = segments[j];
            if ri == rj {
                continue;
            }
            match segment_intersection(a1, a2, b1, b2) {
                SegmentIntersection::None => {}
                SegmentIntersection::Collinear(p, _) => return Some(p),
                SegmentIntersection::Point(p) => {
                    if p != a1 && p != a2 && p != b1 && p != b2 {
                        return Some(p);
                    }
                }
            }
        }
        None
    }
}
