//! Coordinate, segment and ring primitives.

mod coord;
mod ring;
mod segment;

pub use coord::Coord;
pub use ring::{find_self_intersection, is_closed, locate_in_ring, signed_area, validate_ring, Location};
pub use segment::{orient2d, segment_intersection, Orientation, Segment, SegmentIntersection};

pub(crate) use coord::OrdCoord;
pub(crate) use ring::{dedup_consecutive, ring_segments};
pub(crate) use segment::on_segment;
