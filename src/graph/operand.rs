//! Validated, normalized operands.
//!
//! Every overlay and relate call first turns its `Geometry` arguments into
//! an [`Operand`]: coordinates checked for finiteness, lines cleaned of
//! repeated vertices, polygons validated and copied into the
//! counter-clockwise shell / clockwise hole convention.

use crate::bounds::Bound;
use crate::error::PlanumError;
use crate::geometry::{Geometry, LineString, Polygon};
use crate::primitives::{dedup_consecutive, Coord, OrdCoord};
use crate::relate::Dimension;
use num_traits::Float;
use std::collections::BTreeSet;

/// A geometry reduced to a single dimension.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand<F> {
    Empty,
    /// Distinct points in order of first appearance.
    Puntal(Vec<Coord<F>>),
    /// Lines without repeated consecutive vertices.
    Lineal(Vec<LineString<F>>),
    /// Valid polygons in normalized orientation.
    Areal(Vec<Polygon<F>>),
}

struct Parts<F> {
    points: Vec<Coord<F>>,
    lines: Vec<LineString<F>>,
    polygons: Vec<Polygon<F>>,
}

impl<F: Float> Operand<F> {
    /// Validates and normalizes `geometry` for `operation`.
    ///
    /// Collections are flattened; they must be homogeneous once empty members
    /// are ignored.
    pub(crate) fn prepare(geometry: &Geometry<F>, operation: &'static str) -> Result<Self, PlanumError> {
        if geometry.coords().iter().any(|c| !c.is_finite()) {
            return Err(PlanumError::InvalidCoordinate);
        }

        let mut parts = Parts {
            points: Vec::new(),
            lines: Vec::new(),
            polygons: Vec::new(),
        };
        collect_parts(geometry, &mut parts)?;

        let kinds = [
            !parts.points.is_empty(),
            !parts.lines.is_empty(),
            !parts.polygons.is_empty(),
        ];
        if kinds.iter().filter(|&&k| k).count() > 1 {
            return Err(PlanumError::UnsupportedGeometry {
                operation,
                found: geometry.geometry_type(),
            });
        }

        if !parts.polygons.is_empty() {
            Ok(Operand::Areal(parts.polygons))
        } else if !parts.lines.is_empty() {
            Ok(Operand::Lineal(parts.lines))
        } else if !parts.points.is_empty() {
            let mut seen = BTreeSet::new();
            let points = parts
                .points
                .into_iter()
                .filter(|&p| seen.insert(OrdCoord(p)))
                .collect();
            Ok(Operand::Puntal(points))
        } else {
            Ok(Operand::Empty)
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Operand::Empty)
    }

    pub(crate) fn dimension(&self) -> Dimension {
        match self {
            Operand::Empty => Dimension::Empty,
            Operand::Puntal(_) => Dimension::Point,
            Operand::Lineal(_) => Dimension::Line,
            Operand::Areal(_) => Dimension::Area,
        }
    }

    /// Dimension of the boundary, using the Mod-2 rule for lines.
    pub(crate) fn boundary_dimension(&self) -> Dimension {
        match self {
            Operand::Empty | Operand::Puntal(_) => Dimension::Empty,
            Operand::Lineal(lines) => {
                if crate::relate::mod2_boundary(lines).is_empty() {
                    Dimension::Empty
                } else {
                    Dimension::Point
                }
            }
            Operand::Areal(_) => Dimension::Line,
        }
    }

    pub(crate) fn bound(&self) -> Option<Bound<F>> {
        match self {
            Operand::Empty => None,
            Operand::Puntal(points) => Bound::from_coords(points.iter().copied()),
            Operand::Lineal(lines) => lines
                .iter()
                .filter_map(LineString::bound)
                .reduce(Bound::union),
            Operand::Areal(polygons) => polygons
                .iter()
                .filter_map(Polygon::bound)
                .reduce(Bound::union),
        }
    }

    /// Converts the operand back into a geometry value.
    pub(crate) fn into_geometry(self) -> Geometry<F> {
        match self {
            Operand::Empty => Geometry::empty(),
            Operand::Puntal(mut points) => {
                if points.len() == 1 {
                    Geometry::Point(points.remove(0))
                } else {
                    Geometry::MultiPoint(points)
                }
            }
            Operand::Lineal(mut lines) => {
                if lines.len() == 1 {
                    Geometry::LineString(lines.remove(0))
                } else {
                    Geometry::MultiLineString(lines)
                }
            }
            Operand::Areal(mut polygons) => {
                if polygons.len() == 1 {
                    Geometry::Polygon(polygons.remove(0))
                } else {
                    Geometry::MultiPolygon(polygons)
                }
            }
        }
    }
}

fn collect_parts<F: Float>(geometry: &Geometry<F>, parts: &mut Parts<F>) -> Result<(), PlanumError> {
    match geometry {
        Geometry::Point(p) => parts.points.push(*p),
        Geometry::MultiPoint(points) => parts.points.extend_from_slice(points),
        Geometry::LineString(line) => push_line(line, parts)?,
        Geometry::MultiLineString(lines) => {
            for line in lines.iter().filter(|l| !l.is_empty()) {
                push_line(line, parts)?;
            }
        }
        Geometry::Polygon(polygon) => push_polygon(polygon, parts)?,
        Geometry::MultiPolygon(polygons) => {
            for polygon in polygons.iter().filter(|p| !p.is_empty()) {
                push_polygon(polygon, parts)?;
            }
        }
        Geometry::GeometryCollection(members) => {
            for member in members.iter().filter(|m| !m.is_empty()) {
                collect_parts(member, parts)?;
            }
        }
    }
    Ok(())
}

fn push_line<F: Float>(line: &LineString<F>, parts: &mut Parts<F>) -> Result<(), PlanumError> {
    if line.is_empty() {
        return Ok(());
    }
    let coords = dedup_consecutive(line.coords());
    if coords.len() < 2 {
        return Err(PlanumError::DegenerateLine);
    }
    parts.lines.push(LineString::new(coords));
    Ok(())
}

fn push_polygon<F: Float>(polygon: &Polygon<F>, parts: &mut Parts<F>) -> Result<(), PlanumError> {
    if polygon.is_empty() {
        return Ok(());
    }
    polygon.validate()?;
    parts.polygons.push(polygon.normalized());
    Ok(())
}
