use std::fmt;
use std::sync::Arc;

use geojson::FeatureCollection;
use lakbay_core::prelude::*;

/// Trip planner
///
/// Holds the network snapshot, built once from the route definitions, and
/// the search settings every query runs with. Cloning is cheap: the snapshot
/// is shared behind an [`Arc`], so a planner can be handed to worker threads
/// or request handlers freely.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    snapshot: Arc<NetworkSnapshot>,
    config: RoutingConfig,
}

impl TripPlanner {
    pub fn new(snapshot: NetworkSnapshot, config: RoutingConfig) -> Self {
        Self::from_shared(Arc::new(snapshot), config)
    }

    pub fn from_shared(snapshot: Arc<NetworkSnapshot>, config: RoutingConfig) -> Self {
        Self { snapshot, config }
    }

    pub fn snapshot(&self) -> &Arc<NetworkSnapshot> {
        &self.snapshot
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn stop_count(&self) -> usize {
        self.snapshot.stop_count()
    }

    pub fn route_count(&self) -> usize {
        self.snapshot.route_count()
    }

    pub fn network_info(&self) -> String {
        self.snapshot.network_info()
    }

    fn finder(&self) -> ItineraryFinder<'_> {
        ItineraryFinder::new(&self.snapshot, self.config.clone())
    }

    /// Best single itinerary, honouring the configured transfer limit
    pub fn find_route(&self, origin: Coordinate, destination: Coordinate) -> Option<Itinerary> {
        self.finder()
            .find_route(origin, destination, self.config.max_transfers)
    }

    /// Ranked alternatives, at most `max_results` of them
    pub fn find_all_routes(&self, origin: Coordinate, destination: Coordinate) -> Vec<Itinerary> {
        self.finder()
            .find_all_routes(origin, destination, self.config.max_results)
    }

    pub fn directions(&self, itinerary: &Itinerary) -> Vec<String> {
        get_route_directions(itinerary)
    }

    pub fn route_geojson(&self, route_id: &str) -> Result<FeatureCollection, Error> {
        self.snapshot.route_to_geojson(&RouteId::new(route_id))
    }
}

impl fmt::Display for TripPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TripPlanner with {} stops and {} routes",
            self.stop_count(),
            self.route_count()
        )
    }
}

/// Load every route definition named by `network` and build a planner over it.
///
/// Fails when a configured directory or file cannot be read or parsed.
pub fn create_trip_planner(
    network: &NetworkConfig,
    routing: RoutingConfig,
) -> Result<TripPlanner, Error> {
    create_network_snapshot(network).map(|snapshot| TripPlanner::new(snapshot, routing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{coordinate_of, snapshot};

    #[test]
    fn test_planner_uses_config_limits() {
        let planner = TripPlanner::new(
            snapshot(),
            RoutingConfig {
                max_transfers: 0,
                ..RoutingConfig::default()
            },
        );
        let origin = coordinate_of(&planner, "Roxas Avenue");
        let destination = coordinate_of(&planner, "Ma-a Road");

        assert!(planner.find_route(origin, destination).is_none());
        assert!(planner.find_all_routes(origin, destination).is_empty());
    }

    #[test]
    fn test_planner_finds_transfer() {
        let planner = TripPlanner::new(snapshot(), RoutingConfig::default());
        let origin = coordinate_of(&planner, "Roxas Avenue");
        let destination = coordinate_of(&planner, "Ma-a Road");

        let itinerary = planner.find_route(origin, destination).unwrap();
        assert!(itinerary.is_transfer());
        let directions = planner.directions(&itinerary);
        assert_eq!(directions.first().unwrap(), "Board Route 1 at Roxas Avenue");
        assert_eq!(directions.last().unwrap(), "Get off at Ma-a Road");
    }

    #[test]
    fn test_route_geojson() {
        let planner = TripPlanner::new(snapshot(), RoutingConfig::default());
        assert!(planner.route_geojson("1-AM").is_ok());
        assert!(planner.route_geojson("missing").is_err());
        assert_eq!(planner.to_string(), "TripPlanner with 4 stops and 2 routes");
    }
}
