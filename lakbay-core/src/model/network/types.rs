use geo::Point;
use serde::{Deserialize, Serialize};

use crate::model::{RouteId, StopId};

/// WGS84 position in degrees. Never validated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.lng, c.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(p: Point<f64>) -> Self {
        Self {
            lat: p.y(),
            lng: p.x(),
        }
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord { x: c.lng, y: c.lat }
    }
}

/// A physical boarding point shared by every route that visits it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coordinate: Coordinate,
    /// Routes visiting this stop, in definition order
    pub route_ids: Vec<RouteId>,
}

impl Stop {
    pub fn is_served_by(&self, route_id: &RouteId) -> bool {
        self.route_ids.contains(route_id)
    }
}

/// One bus line in one time period, e.g. `R103-AM`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub route_number: String,
    pub time_period: String,
    pub area: String,
    pub name: String,
    pub color: String,
    pub description: String,
    /// Every point of the definition, stops and waypoints alike
    pub polyline: Vec<Coordinate>,
}
