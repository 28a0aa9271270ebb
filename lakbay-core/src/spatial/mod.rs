//! Distance math and stop lookups on the sphere.

pub mod format;
pub mod queries;

pub use format::{format_distance, format_duration};
pub use queries::{
    StopDistance, distance, estimate_duration, nearest, route_polyline_length, within_radius,
};
