//! Small synthetic network shared by unit tests.
//!
//! ```text
//!            E2
//!             \
//!   A1 - A2 - A3 - A4 - A5   D1 - D2
//!    (E: A2, E2, B3)    (D1 sits ~150 m from A4)
//!              |
//!              B2 - B3
//! ```

use crate::loading::{PointKind, RouteDefinition, RoutePoint, build_snapshot};
use crate::model::{Coordinate, NetworkSnapshot, Stop, StopId};

pub(crate) fn stop_point(name: &str, lat: f64, lng: f64) -> RoutePoint {
    RoutePoint {
        name: name.to_string(),
        lat,
        lng,
        kind: PointKind::Stop,
        heading: None,
    }
}

pub(crate) fn route(number: &str, color: &str, points: Vec<RoutePoint>) -> RouteDefinition {
    RouteDefinition {
        route_number: number.to_string(),
        time_period: "AM".to_string(),
        area: "Poblacion".to_string(),
        color: color.to_string(),
        display_name: format!("Route {number}"),
        description: None,
        points,
    }
}

pub(crate) fn definitions() -> Vec<RouteDefinition> {
    vec![
        route(
            "A",
            "#e53935",
            vec![
                stop_point("A1", 7.000, 125.600),
                stop_point("A2", 7.000, 125.610),
                stop_point("A3", 7.000, 125.620),
                stop_point("A4", 7.000, 125.630),
                stop_point("A5", 7.000, 125.640),
            ],
        ),
        route(
            "B",
            "#1e88e5",
            vec![
                stop_point("A3", 7.000, 125.620),
                stop_point("B2", 7.010, 125.620),
                stop_point("B3", 7.020, 125.620),
            ],
        ),
        route(
            "E",
            "#43a047",
            vec![
                stop_point("A2", 7.000, 125.610),
                stop_point("E2", 7.030, 125.610),
                stop_point("B3", 7.020, 125.620),
            ],
        ),
        route(
            "D",
            "#fdd835",
            vec![
                stop_point("D1", 7.001, 125.631),
                stop_point("D2", 7.030, 125.650),
            ],
        ),
    ]
}

pub(crate) fn network() -> NetworkSnapshot {
    build_snapshot(&definitions())
}

pub(crate) fn stop<'a>(snapshot: &'a NetworkSnapshot, name: &str) -> &'a Stop {
    snapshot
        .stop(&StopId::from_name(name))
        .unwrap_or_else(|| panic!("no stop named {name}"))
}

pub(crate) fn at(snapshot: &NetworkSnapshot, name: &str) -> Coordinate {
    stop(snapshot, name).coordinate
}
