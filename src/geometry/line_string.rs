//! Coordinate sequences.

use crate::bounds::Bound;
use crate::primitives::{is_closed, Coord};
use num_traits::Float;

/// An ordered sequence of coordinates.
///
/// Used both for open lines and for closed polygon rings.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString<F>(pub Vec<Coord<F>>);

impl<F: Float> LineString<F> {
    /// Creates a line from coordinates.
    #[inline]
    pub fn new(coords: Vec<Coord<F>>) -> Self {
        Self(coords)
    }

    /// The coordinates of the line.
    #[inline]
    pub fn coords(&self) -> &[Coord<F>] {
        &self.0
    }

    /// Number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the line has no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the line has coordinates and first == last.
    #[inline]
    pub fn is_closed(&self) -> bool {
        is_closed(&self.0)
    }

    /// Iterates the segments of the line as coordinate pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Coord<F>, Coord<F>)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total length of the line.
    pub fn length(&self) -> F {
        self.segments()
            .fold(F::zero(), |acc, (a, b)| acc + a.distance(b))
    }

    /// Bounding box, `None` for an empty line.
    pub fn bound(&self) -> Option<Bound<F>> {
        Bound::from_coords(self.0.iter().copied())
    }

    /// Returns the line with its coordinates in reverse order.
    pub fn reversed(&self) -> Self {
        let mut coords = self.0.clone();
        coords.reverse();
        Self(coords)
    }
}

impl<F: Float> From<Vec<Coord<F>>> for LineString<F> {
    fn from(coords: Vec<Coord<F>>) -> Self {
        Self(coords)
    }
}

impl<F: Float> From<Vec<(F, F)>> for LineString<F> {
    fn from(coords: Vec<(F, F)>) -> Self {
        Self(coords.into_iter().map(Coord::from).collect())
    }
}

impl<F: Float> FromIterator<Coord<F>> for LineString<F> {
    fn from_iter<I: IntoIterator<Item = Coord<F>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_and_bound() {
        let line: LineString<f64> = vec![(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)].into();
        assert_relative_eq!(line.length(), 11.0);
        let b = line.bound().unwrap();
        assert_eq!(b.min, Coord::new(0.0, 0.0));
        assert_eq!(b.max, Coord::new(3.0, 10.0));
        assert!(!line.is_closed());
    }

    #[test]
    fn test_empty_line() {
        let line: LineString<f64> = LineString::new(Vec::new());
        assert!(line.is_empty());
        assert!(line.bound().is_none());
        assert_eq!(line.length(), 0.0);
        assert!(!line.is_closed());
    }

    #[test]
    fn test_reversed() {
        let line: LineString<f64> = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)].into();
        let rev = line.reversed();
        assert_eq!(rev.coords()[0], Coord::new(1.0, 1.0));
        assert_eq!(rev.segments().count(), 2);
    }
}
