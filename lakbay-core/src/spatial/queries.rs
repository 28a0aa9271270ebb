//! Haversine distances and linear-scan stop queries.
//!
//! The network is a few hundred stops, so every query is a plain scan over
//! the snapshot's stop list; that also keeps tie-breaking deterministic.

use itertools::Itertools;
use serde::Serialize;

use crate::model::{Coordinate, Stop};
use crate::{AVERAGE_BUS_SPEED_KMH, EARTH_RADIUS_KM, Km, Minutes};

/// A stop paired with its distance from a query point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StopDistance<'a> {
    pub stop: &'a Stop,
    pub distance: Km,
}

/// Great-circle distance between two coordinates in kilometres
pub fn distance(a: Coordinate, b: Coordinate) -> Km {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Closest stop to `point`. The first stop wins ties.
pub fn nearest<'a, I>(point: Coordinate, stops: I) -> Option<StopDistance<'a>>
where
    I: IntoIterator<Item = &'a Stop>,
{
    let mut best: Option<StopDistance<'a>> = None;
    for stop in stops {
        let d = distance(point, stop.coordinate);
        if best.is_none_or(|b| d < b.distance) {
            best = Some(StopDistance { stop, distance: d });
        }
    }
    best
}

/// Stops within `radius_km` of `point`, nearest first
pub fn within_radius<'a, I>(point: Coordinate, stops: I, radius_km: Km) -> Vec<StopDistance<'a>>
where
    I: IntoIterator<Item = &'a Stop>,
{
    let mut found: Vec<StopDistance<'a>> = stops
        .into_iter()
        .map(|stop| StopDistance {
            stop,
            distance: distance(point, stop.coordinate),
        })
        .filter(|sd| sd.distance <= radius_km)
        .collect();
    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    found
}

/// Length of a path through `points` in order
pub fn route_polyline_length(points: &[Coordinate]) -> Km {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance(*a, *b))
        .sum()
}

/// Riding time at a flat average bus speed, rounded to whole minutes
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate_duration(km: Km) -> Minutes {
    (km / AVERAGE_BUS_SPEED_KMH * 60.0).round().max(0.0) as Minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RouteId, StopId};
    use approx::assert_abs_diff_eq;

    fn stop(name: &str, lat: f64, lng: f64) -> Stop {
        Stop {
            id: StopId::from_name(name),
            name: name.to_string(),
            coordinate: Coordinate::new(lat, lng),
            route_ids: vec![RouteId::new("R1-AM")],
        }
    }

    #[test]
    fn test_distance_symmetry_and_identity() {
        let pairs = [
            (Coordinate::new(7.0731, 125.6128), Coordinate::new(7.0907, 125.6110)),
            (Coordinate::new(-33.86, 151.21), Coordinate::new(51.5, -0.12)),
            (Coordinate::new(0.0, 179.9), Coordinate::new(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert_abs_diff_eq!(distance(a, b), distance(b, a), epsilon = 1e-9);
            assert_abs_diff_eq!(distance(a, a), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_distance_known_value() {
        // One degree of latitude on a 6371 km sphere
        let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert_abs_diff_eq!(d, 111.195, epsilon = 0.01);
    }

    #[test]
    fn test_triangle_inequality() {
        let a = Coordinate::new(7.05, 125.58);
        let b = Coordinate::new(7.08, 125.61);
        let c = Coordinate::new(7.12, 125.66);
        assert!(distance(a, c) <= distance(a, b) + distance(b, c) + 1e-9);
    }

    #[test]
    fn test_nearest_picks_minimum() {
        let stops = vec![
            stop("Far", 7.20, 125.70),
            stop("Close", 7.071, 125.611),
            stop("Middle", 7.10, 125.65),
        ];
        let found = nearest(Coordinate::new(7.07, 125.61), &stops).unwrap();
        assert_eq!(found.stop.name, "Close");
    }

    #[test]
    fn test_nearest_first_wins_ties() {
        let stops = vec![stop("First", 7.08, 125.61), stop("Second", 7.08, 125.61)];
        let found = nearest(Coordinate::new(7.07, 125.61), &stops).unwrap();
        assert_eq!(found.stop.name, "First");
    }

    #[test]
    fn test_nearest_empty() {
        let stops: Vec<Stop> = Vec::new();
        assert!(nearest(Coordinate::new(7.07, 125.61), &stops).is_none());
    }

    #[test]
    fn test_within_radius_sorted_and_filtered() {
        let stops = vec![
            stop("B", 7.075, 125.61),
            stop("A", 7.071, 125.61),
            stop("Outside", 7.5, 125.61),
        ];
        let found = within_radius(Coordinate::new(7.07, 125.61), &stops, 1.0);
        let names: Vec<_> = found.iter().map(|sd| sd.stop.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert!(within_radius(Coordinate::new(0.0, 0.0), &stops, 1.0).is_empty());
    }

    #[test]
    fn test_polyline_length() {
        assert_abs_diff_eq!(route_polyline_length(&[]), 0.0);
        assert_abs_diff_eq!(route_polyline_length(&[Coordinate::new(7.0, 125.0)]), 0.0);
        let a = Coordinate::new(7.0, 125.0);
        let b = Coordinate::new(7.01, 125.0);
        let c = Coordinate::new(7.02, 125.0);
        assert_abs_diff_eq!(
            route_polyline_length(&[a, b, c]),
            distance(a, b) + distance(b, c),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_estimate_duration() {
        assert_eq!(estimate_duration(0.0), 0);
        assert_eq!(estimate_duration(10.0), 30);
        assert_eq!(estimate_duration(1.0), 3);
        assert_eq!(estimate_duration(0.2), 1);
    }
}
