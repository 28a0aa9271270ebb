use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, RouteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    #[default]
    Stop,
    Waypoint,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePoint {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub kind: PointKind,
    pub heading: Option<f64>,
}

impl RoutePoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn is_stop(&self) -> bool {
        self.kind == PointKind::Stop
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteDefinition {
    pub route_number: String,
    pub time_period: String,
    pub area: String,
    pub color: String,
    pub display_name: String,
    pub description: Option<String>,
    pub points: Vec<RoutePoint>,
}

impl RouteDefinition {
    pub fn route_id(&self) -> RouteId {
        RouteId::from_parts(&self.route_number, &self.time_period)
    }
}
