//! The DE-9IM intersection matrix.

use crate::error::PlanumError;
use crate::primitives::Location;
use std::fmt;
use std::str::FromStr;

/// Dimension of a point set, as stored in an intersection matrix.
///
/// Ordered so that `max` picks the larger dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    /// Empty set (`F`).
    Empty,
    /// Points (`0`).
    Point,
    /// Curves (`1`).
    Line,
    /// Areas (`2`).
    Area,
}

impl Dimension {
    /// The DE-9IM character for this dimension.
    pub fn to_char(self) -> char {
        match self {
            Dimension::Empty => 'F',
            Dimension::Point => '0',
            Dimension::Line => '1',
            Dimension::Area => '2',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'F' | 'f' => Some(Dimension::Empty),
            '0' => Some(Dimension::Point),
            '1' => Some(Dimension::Line),
            '2' => Some(Dimension::Area),
            _ => None,
        }
    }
}

/// A 3x3 matrix of dimensions indexed by the location in A (rows) and the
/// location in B (columns), each ordered Interior, Boundary, Exterior.
///
/// # Example
///
/// ```
/// use planum::relate::IntersectionMatrix;
///
/// let m: IntersectionMatrix = "212101212".parse().unwrap();
/// assert!(m.matches("T*T***T**").unwrap());
/// assert!(!m.is_contains());
/// assert_eq!(m.to_string(), "212101212");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionMatrix {
    /// A matrix with every cell `F`.
    pub fn new() -> Self {
        Self {
            cells: [[Dimension::Empty; 3]; 3],
        }
    }

    /// Dimension of the intersection of A's `a` part with B's `b` part.
    #[inline]
    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.cells[a.index()][b.index()]
    }

    /// Overwrites a cell.
    #[inline]
    pub fn set(&mut self, a: Location, b: Location, dim: Dimension) {
        self.cells[a.index()][b.index()] = dim;
    }

    /// Raises a cell to at least `dim`.
    #[inline]
    pub fn set_at_least(&mut self, a: Location, b: Location, dim: Dimension) {
        let cell = &mut self.cells[a.index()][b.index()];
        if *cell < dim {
            *cell = dim;
        }
    }

    /// Returns the matrix with A and B swapped.
    pub fn transposed(&self) -> Self {
        let mut cells = [[Dimension::Empty; 3]; 3];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &dim) in row.iter().enumerate() {
                cells[j][i] = dim;
            }
        }
        Self { cells }
    }

    /// Tests the matrix against a 9-character DE-9IM pattern.
    ///
    /// Pattern characters: `T` (non-empty), `F` (empty), `*` (anything),
    /// `0`, `1`, `2` (exact dimension). `T` and `F` are case-insensitive.
    pub fn matches(&self, pattern: &str) -> Result<bool, PlanumError> {
        let chars: Vec<char> = pattern.chars().collect();
        if chars.len() != 9 {
            return Err(PlanumError::InvalidPattern(pattern.to_string()));
        }
        let mut all = true;
        for (k, &c) in chars.iter().enumerate() {
            let dim = self.cells[k / 3][k % 3];
            let ok = match c {
                '*' => true,
                'T' | 't' => dim != Dimension::Empty,
                _ => match Dimension::from_char(c) {
                    Some(expected) => dim == expected,
                    None => return Err(PlanumError::InvalidPattern(pattern.to_string())),
                },
            };
            all &= ok;
        }
        Ok(all)
    }

    fn is_true(&self, a: Location, b: Location) -> bool {
        self.get(a, b) != Dimension::Empty
    }

    fn is_false(&self, a: Location, b: Location) -> bool {
        self.get(a, b) == Dimension::Empty
    }

    /// `FF*FF****`
    pub fn is_disjoint(&self) -> bool {
        use Location::{Boundary as B, Interior as I};
        self.is_false(I, I) && self.is_false(I, B) && self.is_false(B, I) && self.is_false(B, B)
    }

    /// Negation of [`is_disjoint`](Self::is_disjoint).
    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// `T*****FF*`
    pub fn is_contains(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.is_true(I, I) && self.is_false(E, I) && self.is_false(E, B)
    }

    /// `T*F**F***`
    pub fn is_within(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.is_true(I, I) && self.is_false(I, E) && self.is_false(B, E)
    }

    /// `T*****FF*`, `*T****FF*`, `***T**FF*` or `****T*FF*`
    pub fn is_covers(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.shares_any_interior_or_boundary() && self.is_false(E, I) && self.is_false(E, B)
    }

    /// `T*F**F***`, `*TF**F***`, `**FT*F***` or `**F*TF***`
    pub fn is_covered_by(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.shares_any_interior_or_boundary() && self.is_false(I, E) && self.is_false(B, E)
    }

    fn shares_any_interior_or_boundary(&self) -> bool {
        use Location::{Boundary as B, Interior as I};
        self.is_true(I, I) || self.is_true(I, B) || self.is_true(B, I) || self.is_true(B, B)
    }

    /// Touches: interiors disjoint, boundaries or boundary/interior meet.
    ///
    /// Always false when both geometries are puntal.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary as B, Interior as I};
        if dim_a == Dimension::Point && dim_b == Dimension::Point {
            return false;
        }
        self.is_false(I, I) && (self.is_true(I, B) || self.is_true(B, I) || self.is_true(B, B))
    }

    /// Crosses, with the dimension-dependent rules:
    ///
    /// - lower/higher dimension: `T*T******`
    /// - higher/lower dimension: `T*****T**`
    /// - line/line: `0********`
    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Dimension::{Area, Line, Point};
        use Location::{Exterior as E, Interior as I};
        match (dim_a, dim_b) {
            (Point, Line) | (Point, Area) | (Line, Area) => {
                self.is_true(I, I) && self.is_true(I, E)
            }
            (Line, Point) | (Area, Point) | (Area, Line) => {
                self.is_true(I, I) && self.is_true(E, I)
            }
            (Line, Line) => self.get(I, I) == Point,
            _ => false,
        }
    }

    /// Overlaps, defined only for operands of equal dimension:
    ///
    /// - points or areas: `T*T***T**`
    /// - lines: `1*T***T**`
    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Dimension::{Area, Line, Point};
        use Location::{Exterior as E, Interior as I};
        match (dim_a, dim_b) {
            (Point, Point) | (Area, Area) => {
                self.is_true(I, I) && self.is_true(I, E) && self.is_true(E, I)
            }
            (Line, Line) => self.get(I, I) == Line && self.is_true(I, E) && self.is_true(E, I),
            _ => false,
        }
    }

    /// Topological equality: same dimension and `T*F**FFF*`.
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        dim_a == dim_b
            && self.is_true(I, I)
            && self.is_false(I, E)
            && self.is_false(B, E)
            && self.is_false(E, I)
            && self.is_false(E, B)
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for dim in row {
                write!(f, "{}", dim.to_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for IntersectionMatrix {
    type Err = PlanumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(PlanumError::InvalidPattern(s.to_string()));
        }
        let mut matrix = Self::new();
        for (k, &c) in chars.iter().enumerate() {
            matrix.cells[k / 3][k % 3] =
                Dimension::from_char(c).ok_or_else(|| PlanumError::InvalidPattern(s.to_string()))?;
        }
        Ok(matrix)
    }
}
