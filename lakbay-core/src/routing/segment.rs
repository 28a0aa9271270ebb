use crate::Coordinate;
use crate::model::{NetworkSnapshot, RouteId, Stop};
use crate::routing::Segment;
use crate::spatial::route_polyline_length;

/// Ride on `route_id` from `boarding` to `alighting`.
///
/// The stop range spans the two stops' positions on the route whichever
/// comes first; the stop list is reported in travel order. Returns `None`
/// when either stop is not on the route or both are the same stop.
pub(crate) fn build_segment(
    snapshot: &NetworkSnapshot,
    route_id: &RouteId,
    boarding: &Stop,
    alighting: &Stop,
) -> Option<Segment> {
    if boarding.id == alighting.id {
        return None;
    }
    let route = snapshot.route(route_id)?;
    let from = snapshot.stop_order(route_id, &boarding.id)?;
    let to = snapshot.stop_order(route_id, &alighting.id)?;

    let stops = snapshot.stops_between(route_id, from, to);
    let coords: Vec<Coordinate> = stops.iter().map(|s| s.coordinate).collect();
    let intermediate_stops = stops
        .get(1..stops.len().saturating_sub(1))
        .unwrap_or_default()
        .iter()
        .map(|&s| s.clone())
        .collect();

    Some(Segment {
        route_id: route_id.clone(),
        route_name: route.name.clone(),
        route_color: route.color.clone(),
        boarding_stop: boarding.clone(),
        alighting_stop: alighting.clone(),
        intermediate_stops,
        stop_count: stops.len(),
        distance_km: route_polyline_length(&coords),
        walking_transfer: None,
    })
}
