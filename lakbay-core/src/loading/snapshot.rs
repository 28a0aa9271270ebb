//! Two-pass construction of the network snapshot.
//!
//! The same physical stop appears once in every route file that visits it,
//! each time under a different raw identifier. Stops are therefore keyed by
//! their normalized name, and a stop's route membership is only known after
//! every definition has been scanned.

use hashbrown::{HashMap, HashSet};
use log::{debug, warn};

use super::definitions::{RouteDefinition, RoutePoint};
use crate::model::{NetworkSnapshot, Route, RouteId, Stop, StopId};

/// Build the network snapshot from route definitions.
///
/// Pure and deterministic for a fixed input order, so callers can build once
/// and reuse the result. Stop points without a name are skipped.
pub fn build_snapshot(definitions: &[RouteDefinition]) -> NetworkSnapshot {
    let memberships = collect_memberships(definitions);

    let mut snapshot = NetworkSnapshot::default();
    let mut skipped = 0usize;

    for definition in definitions {
        let route_id = definition.route_id();
        if snapshot.route_index.contains_key(&route_id) {
            warn!("Duplicate route id {route_id}, later definition is ignored");
            continue;
        }

        let mut stop_ids: Vec<StopId> = Vec::new();
        for point in definition.points.iter().filter(|p| p.is_stop()) {
            let Some(stop_id) = stop_id_for(point) else {
                debug!("Skipping unnamed stop point on {route_id} at {:?}", point.coordinate());
                skipped += 1;
                continue;
            };
            if !snapshot.stop_index.contains_key(&stop_id) {
                let route_ids = memberships.get(&stop_id).cloned().unwrap_or_default();
                insert_stop(&mut snapshot, stop_id.clone(), point, route_ids);
            }
            stop_ids.push(stop_id);
        }

        let mut orders: HashMap<StopId, usize> = HashMap::with_capacity(stop_ids.len());
        for (position, stop_id) in stop_ids.iter().enumerate() {
            orders.entry(stop_id.clone()).or_insert(position);
        }

        snapshot.route_index.insert(route_id.clone(), snapshot.routes.len());
        snapshot.routes.push(route_from_definition(route_id.clone(), definition));
        snapshot.stop_orders.insert(route_id.clone(), orders);
        snapshot.route_stops.insert(route_id, stop_ids);
    }

    for stop in &snapshot.stops {
        snapshot
            .stop_routes
            .insert(stop.id.clone(), stop.route_ids.clone());
    }

    if skipped > 0 {
        warn!("Skipped {skipped} stop points without a name");
    }
    snapshot
}

/// First pass: normalized stop id to every route touching it, in definition order
fn collect_memberships(definitions: &[RouteDefinition]) -> HashMap<StopId, Vec<RouteId>> {
    let mut memberships: HashMap<StopId, Vec<RouteId>> = HashMap::new();
    let mut seen: HashSet<RouteId> = HashSet::new();
    for definition in definitions {
        let route_id = definition.route_id();
        if !seen.insert(route_id.clone()) {
            continue;
        }
        for point in definition.points.iter().filter(|p| p.is_stop()) {
            if let Some(stop_id) = stop_id_for(point) {
                let routes = memberships.entry(stop_id).or_default();
                if !routes.contains(&route_id) {
                    routes.push(route_id.clone());
                }
            }
        }
    }
    memberships
}

fn stop_id_for(point: &RoutePoint) -> Option<StopId> {
    let id = StopId::from_name(&point.name);
    (!id.as_str().is_empty()).then_some(id)
}

fn insert_stop(
    snapshot: &mut NetworkSnapshot,
    stop_id: StopId,
    point: &RoutePoint,
    route_ids: Vec<RouteId>,
) {
    snapshot.stop_index.insert(stop_id.clone(), snapshot.stops.len());
    snapshot.stops.push(Stop {
        id: stop_id,
        name: point.name.trim().to_string(),
        coordinate: point.coordinate(),
        route_ids,
    });
}

fn route_from_definition(id: RouteId, definition: &RouteDefinition) -> Route {
    Route {
        id,
        route_number: definition.route_number.clone(),
        time_period: definition.time_period.clone(),
        area: definition.area.clone(),
        name: definition.display_name.clone(),
        color: definition.color.clone(),
        description: definition
            .description
            .clone()
            .unwrap_or_else(|| definition.area.clone()),
        polyline: definition.points.iter().map(RoutePoint::coordinate).collect(),
    }
}
