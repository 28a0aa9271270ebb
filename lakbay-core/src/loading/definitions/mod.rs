//! Route definition records as delivered by the data collaborator

mod parser;
mod raw_types;

pub use parser::{load_route_definitions, parse_route_definitions};
pub use raw_types::{PointKind, RouteDefinition, RoutePoint};
