use lakbay_core::prelude::*;

use crate::TripPlanner;

const ROUTES: &str = r##"[
  {
    "routeNumber": "1",
    "timePeriod": "AM",
    "area": "Poblacion",
    "color": "#e53935",
    "displayName": "Route 1",
    "points": [
      { "name": "Roxas Avenue", "lat": 7.071, "lng": 125.612, "kind": "stop" },
      { "name": "", "lat": 7.0705, "lng": 125.610, "kind": "waypoint" },
      { "name": "San Pedro", "lat": 7.070, "lng": 125.608, "kind": "stop" },
      { "name": "Bankerohan Market", "lat": 7.068, "lng": 125.604, "kind": "stop" }
    ]
  },
  {
    "routeNumber": "2",
    "timePeriod": "AM",
    "area": "Ma-a",
    "color": "#1e88e5",
    "displayName": "Route 2",
    "points": [
      { "name": "Bankerohan Market", "lat": 7.068, "lng": 125.604, "kind": "stop" },
      { "name": "Ma-a Road", "lat": 7.090, "lng": 125.590, "kind": "stop" }
    ]
  }
]"##;

pub(crate) fn snapshot() -> NetworkSnapshot {
    let definitions = parse_route_definitions(ROUTES, "fixture").unwrap();
    build_snapshot(&definitions)
}

pub(crate) fn planner() -> TripPlanner {
    TripPlanner::new(snapshot(), RoutingConfig::default())
}

pub(crate) fn coordinate_of(planner: &TripPlanner, name: &str) -> Coordinate {
    planner
        .snapshot()
        .stop(&StopId::from_name(name))
        .map(|stop| stop.coordinate)
        .unwrap()
}
