//! Geometry values.
//!
//! [`Geometry`] is the closed sum type every operation in the crate consumes
//! and produces. The empty geometry is an empty `GeometryCollection`.
//!
//! # Example
//!
//! ```
//! use planum::{Geometry, LineString, Polygon};
//!
//! let square: Geometry<f64> = Polygon::new(
//!     LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
//!     vec![],
//! )
//! .into();
//!
//! assert_eq!(square.area(), 16.0);
//! assert_eq!(square.length(), 16.0);
//! assert!(Geometry::<f64>::empty().is_empty());
//! ```

mod line_string;
mod polygon;

pub use line_string::LineString;
pub use polygon::Polygon;

use crate::bounds::Bound;
use crate::primitives::Coord;
use crate::relate::{mod2_boundary, Dimension};
use num_traits::Float;

/// A planar geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<F> {
    Point(Coord<F>),
    MultiPoint(Vec<Coord<F>>),
    LineString(LineString<F>),
    MultiLineString(Vec<LineString<F>>),
    Polygon(Polygon<F>),
    MultiPolygon(Vec<Polygon<F>>),
    GeometryCollection(Vec<Geometry<F>>),
}

impl<F: Float> Geometry<F> {
    /// The empty geometry: a collection with no members.
    #[inline]
    pub fn empty() -> Self {
        Geometry::GeometryCollection(Vec::new())
    }

    /// Returns `true` if the geometry contains no coordinates.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::MultiPoint(points) => points.is_empty(),
            Geometry::LineString(line) => line.is_empty(),
            Geometry::MultiLineString(lines) => lines.iter().all(LineString::is_empty),
            Geometry::Polygon(polygon) => polygon.is_empty(),
            Geometry::MultiPolygon(polygons) => polygons.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(members) => members.iter().all(Geometry::is_empty),
        }
    }

    /// Name of the geometry kind, as used in error messages.
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Topological dimension; `Empty` for empty geometries.
    ///
    /// A collection has the highest dimension among its members.
    pub fn dimension(&self) -> Dimension {
        if self.is_empty() {
            return Dimension::Empty;
        }
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Point,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => Dimension::Line,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Area,
            Geometry::GeometryCollection(members) => members
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    /// Dimension of the geometry's boundary.
    ///
    /// Points have no boundary. Lines are bounded by the endpoints that occur
    /// an odd number of times, so closed lines have none. Polygons are
    /// bounded by their rings.
    pub fn boundary_dimension(&self) -> Dimension {
        if self.is_empty() {
            return Dimension::Empty;
        }
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Empty,
            Geometry::LineString(line) => line_boundary_dimension(std::slice::from_ref(line)),
            Geometry::MultiLineString(lines) => line_boundary_dimension(lines),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Line,
            Geometry::GeometryCollection(members) => members
                .iter()
                .map(Geometry::boundary_dimension)
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    /// Every coordinate of the geometry, in storage order.
    pub fn coords(&self) -> Vec<Coord<F>> {
        let mut out = Vec::new();
        self.collect_coords(&mut out);
        out
    }

    fn collect_coords(&self, out: &mut Vec<Coord<F>>) {
        match self {
            Geometry::Point(p) => out.push(*p),
            Geometry::MultiPoint(points) => out.extend_from_slice(points),
            Geometry::LineString(line) => out.extend_from_slice(line.coords()),
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    out.extend_from_slice(line.coords());
                }
            }
            Geometry::Polygon(polygon) => {
                for ring in polygon.rings() {
                    out.extend_from_slice(ring.coords());
                }
            }
            Geometry::MultiPolygon(polygons) => {
                for ring in polygons.iter().flat_map(Polygon::rings) {
                    out.extend_from_slice(ring.coords());
                }
            }
            Geometry::GeometryCollection(members) => {
                for member in members {
                    member.collect_coords(out);
                }
            }
        }
    }

    /// Bounding box, `None` for empty geometries.
    pub fn bound(&self) -> Option<Bound<F>> {
        Bound::from_coords(self.coords())
    }

    /// Area of the polygonal parts.
    pub fn area(&self) -> F {
        match self {
            Geometry::Polygon(polygon) => polygon.area(),
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().fold(F::zero(), |acc, p| acc + p.area())
            }
            Geometry::GeometryCollection(members) => {
                members.iter().fold(F::zero(), |acc, m| acc + m.area())
            }
            _ => F::zero(),
        }
    }

    /// Length of the lineal parts, or the perimeter of the polygonal parts.
    pub fn length(&self) -> F {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => F::zero(),
            Geometry::LineString(line) => line.length(),
            Geometry::MultiLineString(lines) => {
                lines.iter().fold(F::zero(), |acc, l| acc + l.length())
            }
            Geometry::Polygon(polygon) => polygon.perimeter(),
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().fold(F::zero(), |acc, p| acc + p.perimeter())
            }
            Geometry::GeometryCollection(members) => {
                members.iter().fold(F::zero(), |acc, m| acc + m.length())
            }
        }
    }

    /// The bounding box as a geometry.
    ///
    /// A degenerate box collapses to a `Point` or a two-point `LineString`;
    /// otherwise a counter-clockwise rectangle `Polygon` is returned.
    pub fn envelope(&self) -> Self {
        let Some(b) = self.bound() else {
            return Geometry::empty();
        };
        if b.min == b.max {
            return Geometry::Point(b.min);
        }
        if b.width() == F::zero() || b.height() == F::zero() {
            return Geometry::LineString(LineString::new(vec![b.min, b.max]));
        }
        let ring = LineString::new(vec![
            b.min,
            Coord::new(b.max.x, b.min.y),
            b.max,
            Coord::new(b.min.x, b.max.y),
            b.min,
        ]);
        Geometry::Polygon(Polygon::new(ring, Vec::new()))
    }
}

fn line_boundary_dimension<F: Float>(lines: &[LineString<F>]) -> Dimension {
    if mod2_boundary(lines).is_empty() {
        Dimension::Empty
    } else {
        Dimension::Point
    }
}

impl<F: Float> From<Coord<F>> for Geometry<F> {
    fn from(p: Coord<F>) -> Self {
        Geometry::Point(p)
    }
}

impl<F: Float> From<LineString<F>> for Geometry<F> {
    fn from(line: LineString<F>) -> Self {
        Geometry::LineString(line)
    }
}

impl<F: Float> From<Polygon<F>> for Geometry<F> {
    fn from(polygon: Polygon<F>) -> Self {
        Geometry::Polygon(polygon)
    }
}
