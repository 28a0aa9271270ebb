//! Network snapshot and the lookups routing performs on it

use hashbrown::HashMap;
use serde::Serialize;

use super::types::{Route, Stop};
use crate::model::{RouteId, StopId};
use crate::spatial::route_polyline_length;
use crate::{Coordinate, Km};

/// Immutable in-memory index of every route and stop.
///
/// Built once by [`crate::build_snapshot`] and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NetworkSnapshot {
    /// Routes in definition order
    pub(crate) routes: Vec<Route>,
    pub(crate) route_index: HashMap<RouteId, usize>,
    /// Stops in first-seen order, so scans over them are deterministic
    pub(crate) stops: Vec<Stop>,
    pub(crate) stop_index: HashMap<StopId, usize>,
    /// Ordered stop sequence for each route
    pub(crate) route_stops: HashMap<RouteId, Vec<StopId>>,
    /// Routes through each stop
    pub(crate) stop_routes: HashMap<StopId, Vec<RouteId>>,
    /// Position of each stop on each route, keyed per route
    pub(crate) stop_orders: HashMap<RouteId, HashMap<StopId, usize>>,
}

impl NetworkSnapshot {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn route(&self, route_id: &RouteId) -> Option<&Route> {
        self.route_index.get(route_id).map(|&idx| &self.routes[idx])
    }

    pub fn stop(&self, stop_id: &StopId) -> Option<&Stop> {
        self.stop_index.get(stop_id).map(|&idx| &self.stops[idx])
    }

    /// Ordered stop ids of a route; empty for unknown routes
    pub fn route_stops(&self, route_id: &RouteId) -> &[StopId] {
        self.route_stops.get(route_id).map_or(&[], Vec::as_slice)
    }

    /// Routes through a stop; empty for unknown stops
    pub fn stop_routes(&self, stop_id: &StopId) -> &[RouteId] {
        self.stop_routes.get(stop_id).map_or(&[], Vec::as_slice)
    }

    /// Position of `stop_id` on `route_id` (first occurrence for loop routes)
    pub fn stop_order(&self, route_id: &RouteId, stop_id: &StopId) -> Option<usize> {
        self.stop_orders.get(route_id)?.get(stop_id).copied()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops of `route_id` between two positions, inclusive, in travel order.
    ///
    /// When `from` lies after `to` the slice is walked backwards.
    pub(crate) fn stops_between(&self, route_id: &RouteId, from: usize, to: usize) -> Vec<&Stop> {
        let ids = self.route_stops(route_id);
        let (lo, hi) = (from.min(to), from.max(to));
        let Some(range) = ids.get(lo..=hi) else {
            return Vec::new();
        };
        let stops = range.iter().filter_map(|id| self.stop(id));
        if from <= to {
            stops.collect()
        } else {
            let mut stops: Vec<_> = stops.collect();
            stops.reverse();
            stops
        }
    }

    /// Ride distance along a route between two of its stops
    pub(crate) fn ride_distance(&self, route_id: &RouteId, from: &StopId, to: &StopId) -> Option<Km> {
        let from_idx = self.stop_order(route_id, from)?;
        let to_idx = self.stop_order(route_id, to)?;
        let coords: Vec<Coordinate> = self
            .stops_between(route_id, from_idx, to_idx)
            .iter()
            .map(|stop| stop.coordinate)
            .collect();
        Some(route_polyline_length(&coords))
    }

    pub fn network_info(&self) -> String {
        format!(
            "Network snapshot with {} routes and {} stops ({} shared by several routes)",
            self.route_count(),
            self.stop_count(),
            self.stops.iter().filter(|s| s.route_ids.len() > 1).count()
        )
    }
}
