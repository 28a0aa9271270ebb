//! Itinerary finding over the network snapshot.
//!
//! There is no graph here: a direct itinerary is a shared route between the
//! boarding and alighting stops, a transfer itinerary joins two routes at a
//! stop they both visit.

mod config;
mod finder;
pub mod itinerary;
mod segment;

pub use config::RoutingConfig;
pub use finder::{ItineraryFinder, find_all_routes, find_route};
pub use itinerary::{
    Itinerary, ItineraryKind, Segment, WalkingTransfer, get_route_directions,
};
