//! Axis-aligned bounding box.

use crate::primitives::Coord;
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners. Every non-empty geometry has one;
/// empty geometries have none, which is why geometry bounds are `Option`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Coord<F>,
    /// Maximum corner (largest x and y values).
    pub max: Coord<F>,
}

impl<F: Float> Bound<F> {
    /// Creates a new bound from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Coord<F>, max: Coord<F>) -> Self {
        Self { min, max }
    }

    /// Creates a bound from two arbitrary corners.
    #[inline]
    pub fn from_corners(a: Coord<F>, b: Coord<F>) -> Self {
        Self {
            min: Coord::new(a.x.min(b.x), a.y.min(b.y)),
            max: Coord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a bound containing a single coordinate.
    #[inline]
    pub fn from_coord(p: Coord<F>) -> Self {
        Self { min: p, max: p }
    }

    /// Creates a bound from an iterator of coordinates.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_coords<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coord<F>>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;

        let mut bound = Self::from_coord(first);
        for p in iter {
            bound = bound.expand_to_include(p);
        }
        Some(bound)
    }

    /// Returns the width of the bound.
    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    /// Returns the height of the bound.
    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Returns a new bound expanded to include the given coordinate.
    #[inline]
    pub fn expand_to_include(self, p: Coord<F>) -> Self {
        Self {
            min: Coord::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Coord::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns the union of two bounds (smallest bound containing both).
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: Coord::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Coord::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Returns `true` if this bound contains the given coordinate.
    #[inline]
    pub fn contains_coord(self, p: Coord<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns `true` if `other` lies entirely inside this bound.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.contains_coord(other.min) && self.contains_coord(other.max)
    }

    /// Returns `true` if this bound intersects another bound.
    ///
    /// Bounds that only share an edge or corner intersect.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}
