//! This module is responsible for loading route definitions and building
//! the immutable network snapshot used for routing.

mod builder;
mod config;
pub mod definitions;
mod snapshot;

pub use builder::create_network_snapshot;
pub use config::NetworkConfig;
pub use definitions::{
    PointKind, RouteDefinition, RoutePoint, load_route_definitions, parse_route_definitions,
};
pub use snapshot::build_snapshot;
