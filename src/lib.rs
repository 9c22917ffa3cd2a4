//! planum - Planar overlay and topological predicates
//!
//! Boolean set operations (intersection, union, difference, symmetric
//! difference) and DE-9IM relate over 2D points, lines and polygons, built
//! on one shared planar graph. Polygons are normalized to counter-clockwise
//! shells and clockwise holes; inputs are never mutated.
//!
//! # Example
//!
//! ```
//! use planum::{difference, touches, Geometry, LineString, Polygon};
//!
//! let square = |x0: f64, y0: f64, x1: f64, y1: f64| -> Geometry<f64> {
//!     Polygon::new(
//!         LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
//!         vec![],
//!     )
//!     .into()
//! };
//!
//! let outer = square(0.0, 0.0, 10.0, 10.0);
//! let inner = square(2.0, 2.0, 4.0, 4.0);
//!
//! let framed = difference(&outer, &inner).unwrap();
//! assert_eq!(framed.area(), 96.0);
//! assert!(touches(&framed, &inner).unwrap());
//! ```

pub mod bounds;
pub mod clipping;
pub mod error;
pub mod geometry;
mod graph;
pub mod primitives;
pub mod relate;
pub mod transform;

pub use bounds::Bound;
pub use clipping::{difference, intersection, sym_difference, unary_union, union, OverlayOp};
pub use error::{PlanumError, RingDefect};
pub use geometry::{Geometry, LineString, Polygon};
pub use primitives::{Coord, Location};
pub use relate::{
    contains, covered_by, covers, crosses, disjoint, equals, intersects, locate, overlaps,
    relate, relate_pattern, touches, within, Dimension, IntersectionMatrix,
};
pub use transform::{
    boundary, centroid, convex_hull, distance, equals_exact, hausdorff_distance,
    hausdorff_distance_densify, is_simple, line_merge, point_on_surface, simplify,
    simplify_preserve_topology, snap,
};
