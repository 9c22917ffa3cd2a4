//! 2D coordinate type.

use num_traits::Float;
use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

/// A coordinate in the plane.
///
/// Generic over floating-point types (`f32` or `f64`). Equality is exact:
/// two coordinates are equal only when both ordinates compare equal.
/// Subtracting two coordinates yields the displacement between them, which
/// is itself represented as a `Coord`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Coord<F> {
    /// Creates a new coordinate.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both ordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Dot product, treating both coordinates as vectors.
    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z-component of the 3D cross product).
    ///
    /// Positive means `other` is counter-clockwise from `self`.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Squared Euclidean distance to another coordinate.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        (self - other).dot(self - other)
    }

    /// Euclidean distance to another coordinate.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Midpoint between two coordinates.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, half())
    }

    /// Linear interpolation; `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Lexicographic order: by `x`, then by `y`.
    ///
    /// Only meaningful for finite coordinates.
    #[inline]
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.x
            .partial_cmp(&other.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal))
    }
}

#[inline]
fn half<F: Float>() -> F {
    F::one() / (F::one() + F::one())
}

impl<F: Float> Add for Coord<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<F: Float> Sub for Coord<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> Mul<F> for Coord<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl<F: Float> Neg for Coord<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<F: Float> From<(F, F)> for Coord<F> {
    fn from((x, y): (F, F)) -> Self {
        Self::new(x, y)
    }
}

impl<F: Float> From<[F; 2]> for Coord<F> {
    fn from([x, y]: [F; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Total-order wrapper so coordinates can key ordered maps and sets.
///
/// Callers guarantee finiteness; NaN ordinates compare as equal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrdCoord<F>(pub Coord<F>);

impl<F: Float> PartialEq for OrdCoord<F> {
    fn eq(&self, other: &Self) -> bool {
        self.0.lex_cmp(&other.0) == Ordering::Equal
    }
}

impl<F: Float> Eq for OrdCoord<F> {}

impl<F: Float> PartialOrd for OrdCoord<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for OrdCoord<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.lex_cmp(&other.0)
    }
}
