//! Geometry primitives and line math.

mod bounds;
mod point;
mod segment;

pub use bounds::Bounds;
pub use point::Point;
pub use segment::{
    closest_point_on_segment, distance_to_segment, flatten_segments, segment_intersection,
    Segment, SegmentHit,
};

/// Tolerance used when comparing coordinates for equality
pub const EPSILON: f64 = 1e-9;
