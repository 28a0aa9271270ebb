//! Itinerary, segment and walking-transfer types returned to the UI

mod directions;
mod to_geojson;

use serde::{Deserialize, Serialize};

use crate::model::{RouteId, Stop};
use crate::routing::RoutingConfig;
use crate::spatial::estimate_duration;
use crate::{Km, Minutes};

pub use directions::get_route_directions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItineraryKind {
    Single,
    Transfer,
}

/// Walk between two nearby stops that do not share a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkingTransfer {
    pub from_stop: Stop,
    pub to_stop: Stop,
    pub distance_km: Km,
    pub duration_minutes: Minutes,
}

/// One continuous ride on a single route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub route_id: RouteId,
    pub route_name: String,
    pub route_color: String,
    pub boarding_stop: Stop,
    pub alighting_stop: Stop,
    /// Stops passed between boarding and alighting, in travel order
    pub intermediate_stops: Vec<Stop>,
    /// Includes both the boarding and the alighting stop
    pub stop_count: usize,
    pub distance_km: Km,
    /// Walk taken before boarding this segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walking_transfer: Option<WalkingTransfer>,
}

impl Segment {
    /// Every stop of the ride, boarding first
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        std::iter::once(&self.boarding_stop)
            .chain(&self.intermediate_stops)
            .chain(std::iter::once(&self.alighting_stop))
    }
}

/// A complete suggested trip of one or two rides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(rename = "type")]
    pub kind: ItineraryKind,
    pub segments: Vec<Segment>,
    pub stops_count: usize,
    pub total_distance_km: Km,
    pub transfer_stops: Vec<Stop>,
    pub estimated_duration: Option<Minutes>,
}

impl Itinerary {
    pub(crate) fn single(segment: Segment) -> Self {
        Self {
            kind: ItineraryKind::Single,
            stops_count: segment.stop_count,
            total_distance_km: segment.distance_km,
            estimated_duration: Some(estimate_duration(segment.distance_km)),
            transfer_stops: Vec::new(),
            segments: vec![segment],
        }
    }

    /// Two rides joined at a shared stop, or by a walk recorded on `second`
    pub(crate) fn transfer(first: Segment, second: Segment, config: &RoutingConfig) -> Self {
        let ride_km = first.distance_km + second.distance_km;
        let mut duration =
            estimate_duration(ride_km).saturating_add(config.transfer_penalty_minutes);

        let (stops_count, total_distance_km, transfer_stops) = match &second.walking_transfer {
            Some(walk) => {
                duration = duration.saturating_add(walk.duration_minutes);
                (
                    first.stop_count + second.stop_count,
                    ride_km + walk.distance_km,
                    vec![walk.from_stop.clone(), walk.to_stop.clone()],
                )
            }
            None => (
                first.stop_count + second.stop_count - 1,
                ride_km,
                vec![first.alighting_stop.clone()],
            ),
        };

        Self {
            kind: ItineraryKind::Transfer,
            segments: vec![first, second],
            stops_count,
            total_distance_km,
            transfer_stops,
            estimated_duration: Some(duration),
        }
    }

    pub fn first_segment(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn route_ids(&self) -> Vec<RouteId> {
        self.segments.iter().map(|s| s.route_id.clone()).collect()
    }

    pub fn is_transfer(&self) -> bool {
        self.kind == ItineraryKind::Transfer
    }
}
