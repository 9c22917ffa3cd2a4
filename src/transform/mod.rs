//! Geometric transforms and measures: simplification, convex hull,
//! centroid, interior points, boundaries, distances, vertex snapping and
//! line merging.
//!
//! All tolerances are explicit arguments; nothing here relies on a hidden
//! epsilon.
//!
//! # Example
//!
//! ```
//! use planum::transform::{centroid, convex_hull};
//! use planum::{Coord, Geometry};
//!
//! let cloud = Geometry::MultiPoint(vec![
//!     Coord::new(0.0, 0.0),
//!     Coord::new(2.0, 0.0),
//!     Coord::new(1.0, 0.5),
//!     Coord::new(2.0, 2.0),
//!     Coord::new(0.0, 2.0),
//! ]);
//!
//! let hull = convex_hull(&cloud).unwrap();
//! assert_eq!(hull.area(), 4.0);
//! assert_eq!(centroid(&hull).unwrap(), Some(Coord::new(1.0, 1.0)));
//! ```

mod boundary;
mod centroid;
mod distance;
mod exact;
mod hausdorff;
mod hull;
mod merge;
mod simple;
mod simplify;
mod snap;
mod surface;

pub use boundary::boundary;
pub use centroid::centroid;
pub use distance::distance;
pub use exact::equals_exact;
pub use hausdorff::{hausdorff_distance, hausdorff_distance_densify};
pub use hull::convex_hull;
pub use merge::line_merge;
pub use simple::is_simple;
pub use simplify::{simplify, simplify_preserve_topology};
pub use snap::snap;
pub use surface::point_on_surface;

use crate::error::PlanumError;
use crate::geometry::Geometry;
use num_traits::Float;

fn check_tolerance<F: Float>(tolerance: F) -> Result<(), PlanumError> {
    if tolerance.is_finite() && tolerance >= F::zero() {
        Ok(())
    } else {
        Err(PlanumError::InvalidParameter {
            name: "tolerance",
            reason: "must be finite and non-negative",
        })
    }
}

fn ensure_finite<F: Float>(geometry: &Geometry<F>) -> Result<(), PlanumError> {
    if geometry.coords().iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(PlanumError::InvalidCoordinate)
    }
}
