//! Application-facing layer of the lakbay bus planner.
//!
//! [`TripPlanner`] owns the network snapshot and answers itinerary queries,
//! [`NavigationStore`] holds the rider's navigation state and the live
//! location subscription. Both sit on top of [`lakbay_core`].

pub mod planner;
pub mod store;
pub mod tracking;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use planner::{TripPlanner, create_trip_planner};
pub use store::NavigationStore;
pub use tracking::{LocationFeed, LocationPublisher, location_channel};

pub use lakbay_core::prelude;
