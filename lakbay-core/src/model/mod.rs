//! Data model for the bus network
//!
//! Contains identifiers, stops, routes and the snapshot that indexes them.

pub mod identifiers;
pub mod network;

pub use identifiers::{RouteId, StopId};
pub use network::{Coordinate, NetworkSnapshot, Route, Stop};
