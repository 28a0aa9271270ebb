//! Core of the lakbay bus network planner.
//!
//! Builds an immutable [`NetworkSnapshot`] from per-route stop/waypoint
//! definitions, finds direct and one-transfer itineraries between two
//! coordinates, and drives the rider-facing navigation state machine.

pub mod error;
pub mod loading;
pub mod model;
pub mod navigation;
pub mod prelude;
pub mod routing;
pub mod spatial;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;
pub use loading::{NetworkConfig, build_snapshot, create_network_snapshot};
pub use model::{Coordinate, NetworkSnapshot, Route, RouteId, Stop, StopId};

/// Kilometres.
pub type Km = f64;
/// Whole minutes, as shown to riders.
pub type Minutes = u32;

/// Mean Earth radius used by every distance computation, in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Average bus speed assumed by duration estimates, km/h
pub const AVERAGE_BUS_SPEED_KMH: f64 = 20.0;
