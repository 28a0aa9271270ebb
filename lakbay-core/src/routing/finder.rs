use itertools::Itertools;
use log::{debug, trace};
use rayon::prelude::*;

use super::segment::build_segment;
use super::{Itinerary, RoutingConfig, Segment, WalkingTransfer};
use crate::model::{Coordinate, NetworkSnapshot, RouteId, Stop};
use crate::spatial::{distance, nearest, within_radius};
use crate::{Km, Minutes};

/// Itinerary search bound to one snapshot and configuration
#[derive(Debug, Clone)]
pub struct ItineraryFinder<'a> {
    snapshot: &'a NetworkSnapshot,
    config: RoutingConfig,
}

struct TransferCandidate<'a> {
    transfer_stop: &'a Stop,
    first_route: &'a RouteId,
    second_route: &'a RouteId,
    score: Km,
}

struct WalkCandidate<'a> {
    from_stop: &'a Stop,
    to_stop: &'a Stop,
    first_route: &'a RouteId,
    second_route: &'a RouteId,
    walk_km: Km,
    score: Km,
}

impl<'a> ItineraryFinder<'a> {
    pub fn new(snapshot: &'a NetworkSnapshot, config: RoutingConfig) -> Self {
        Self { snapshot, config }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Best itinerary between the stops nearest to `origin` and `destination`.
    ///
    /// Tries a direct ride first and only then a single transfer. This is the
    /// fast path; [`Self::find_all_routes`] searches more stops and may rank a
    /// different itinerary first.
    pub fn find_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        max_transfers: usize,
    ) -> Option<Itinerary> {
        let boarding = nearest(origin, self.snapshot.stops())?.stop;
        let alighting = nearest(destination, self.snapshot.stops())?.stop;
        if boarding.id == alighting.id {
            debug!("Origin and destination both resolve to {}", boarding.id);
            return None;
        }

        self.direct_between(boarding, alighting).or_else(|| {
            if max_transfers == 0 {
                return None;
            }
            self.transfer_between(boarding, alighting)
                .or_else(|| self.walking_transfer_between(boarding, alighting))
        })
    }

    /// Up to `max_results` itineraries between every pair of candidate stops,
    /// shortest first.
    pub fn find_all_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        max_results: usize,
    ) -> Vec<Itinerary> {
        let boardings = self.candidate_stops(origin);
        let alightings = self.candidate_stops(destination);
        let pairs: Vec<(&Stop, &Stop)> = boardings
            .into_iter()
            .cartesian_product(alightings)
            .filter(|(b, a)| b.id != a.id)
            .collect();
        debug!("Evaluating {} boarding/alighting pairs", pairs.len());

        let found: Vec<Itinerary> = pairs
            .par_iter()
            .flat_map_iter(|&(boarding, alighting)| {
                let transfer = if self.config.max_transfers >= 1 {
                    self.transfer_between(boarding, alighting)
                } else {
                    None
                };
                self.direct_between(boarding, alighting)
                    .into_iter()
                    .chain(transfer)
            })
            .collect();

        let mut unique: Vec<Itinerary> = found
            .into_iter()
            .unique_by(|it| {
                it.first_segment()
                    .map(|s| (s.route_id.clone(), s.boarding_stop.id.clone()))
            })
            .collect();
        unique.sort_by(|a, b| a.total_distance_km.total_cmp(&b.total_distance_km));
        unique.truncate(max_results);
        unique
    }

    /// Stops near `point`, widening to the fallback radius when none are close
    fn candidate_stops(&self, point: Coordinate) -> Vec<&'a Stop> {
        let stops = self.snapshot.stops();
        let mut near = within_radius(point, stops, self.config.near_radius_km);
        if near.is_empty() {
            near = within_radius(point, stops, self.config.fallback_radius_km);
        }
        near.into_iter().map(|sd| sd.stop).collect()
    }

    /// First route serving both stops, in the boarding stop's route order
    pub(crate) fn direct_between(&self, boarding: &Stop, alighting: &Stop) -> Option<Itinerary> {
        let route_id = boarding
            .route_ids
            .iter()
            .find(|r| alighting.is_served_by(r))?;
        build_segment(self.snapshot, route_id, boarding, alighting).map(Itinerary::single)
    }

    /// Cheapest single transfer at a stop shared by a boarding route and an
    /// alighting route. Ties keep the first candidate found.
    pub(crate) fn transfer_between(&self, boarding: &Stop, alighting: &Stop) -> Option<Itinerary> {
        let snapshot = self.snapshot;
        let mut best: Option<TransferCandidate<'a>> = None;

        for first_route in &snapshot.stop(&boarding.id)?.route_ids {
            for stop_id in snapshot.route_stops(first_route) {
                if *stop_id == boarding.id || *stop_id == alighting.id {
                    continue;
                }
                let Some(transfer_stop) = snapshot.stop(stop_id) else {
                    continue;
                };
                for second_route in &transfer_stop.route_ids {
                    if second_route == first_route || !alighting.is_served_by(second_route) {
                        continue;
                    }
                    let (Some(first_km), Some(second_km)) = (
                        snapshot.ride_distance(first_route, &boarding.id, stop_id),
                        snapshot.ride_distance(second_route, stop_id, &alighting.id),
                    ) else {
                        continue;
                    };
                    let score = first_km + second_km;
                    trace!("Transfer at {stop_id} via {first_route}/{second_route}: {score:.3} km");
                    if best.as_ref().is_none_or(|b| score < b.score) {
                        best = Some(TransferCandidate {
                            transfer_stop,
                            first_route,
                            second_route,
                            score,
                        });
                    }
                }
            }
        }

        let best = best?;
        let first = build_segment(snapshot, best.first_route, boarding, best.transfer_stop)?;
        let second = build_segment(snapshot, best.second_route, best.transfer_stop, alighting)?;
        Some(Itinerary::transfer(first, second, &self.config))
    }

    /// Transfer on foot between two nearby stops whose routes never meet.
    /// Only searched when a walking radius is configured.
    pub(crate) fn walking_transfer_between(
        &self,
        boarding: &Stop,
        alighting: &Stop,
    ) -> Option<Itinerary> {
        let radius = self.config.walking_transfer_radius_km?;
        let snapshot = self.snapshot;
        let mut best: Option<WalkCandidate<'a>> = None;

        for first_route in &snapshot.stop(&boarding.id)?.route_ids {
            for from_id in snapshot.route_stops(first_route) {
                let Some(from_stop) = snapshot.stop(from_id) else {
                    continue;
                };
                let Some(first_km) = snapshot.ride_distance(first_route, &boarding.id, from_id)
                else {
                    continue;
                };
                if from_stop.id == boarding.id || from_stop.id == alighting.id {
                    continue;
                }
                for second_route in &snapshot.stop(&alighting.id)?.route_ids {
                    if second_route == first_route {
                        continue;
                    }
                    for to_id in snapshot.route_stops(second_route) {
                        if *to_id == alighting.id || to_id == from_id {
                            continue;
                        }
                        let Some(to_stop) = snapshot.stop(to_id) else {
                            continue;
                        };
                        let walk_km = distance(from_stop.coordinate, to_stop.coordinate);
                        if walk_km > radius {
                            continue;
                        }
                        let Some(second_km) =
                            snapshot.ride_distance(second_route, to_id, &alighting.id)
                        else {
                            continue;
                        };
                        let score = first_km + walk_km + second_km;
                        if best.as_ref().is_none_or(|b| score < b.score) {
                            best = Some(WalkCandidate {
                                from_stop,
                                to_stop,
                                first_route,
                                second_route,
                                walk_km,
                                score,
                            });
                        }
                    }
                }
            }
        }

        let best = best?;
        let first = build_segment(snapshot, best.first_route, boarding, best.from_stop)?;
        let second = build_segment(snapshot, best.second_route, best.to_stop, alighting)?;
        let second = Segment {
            walking_transfer: Some(WalkingTransfer {
                from_stop: best.from_stop.clone(),
                to_stop: best.to_stop.clone(),
                distance_km: best.walk_km,
                duration_minutes: self.walking_minutes(best.walk_km),
            }),
            ..second
        };
        Some(Itinerary::transfer(first, second, &self.config))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn walking_minutes(&self, km: Km) -> Minutes {
        (km / self.config.walking_speed_kmh * 60.0).round().max(0.0) as Minutes
    }
}

/// [`ItineraryFinder::find_route`] with the default configuration
pub fn find_route(
    snapshot: &NetworkSnapshot,
    origin: Coordinate,
    destination: Coordinate,
    max_transfers: usize,
) -> Option<Itinerary> {
    ItineraryFinder::new(snapshot, RoutingConfig::default()).find_route(
        origin,
        destination,
        max_transfers,
    )
}

/// [`ItineraryFinder::find_all_routes`] with the default configuration
pub fn find_all_routes(
    snapshot: &NetworkSnapshot,
    origin: Coordinate,
    destination: Coordinate,
    max_results: usize,
) -> Vec<Itinerary> {
    ItineraryFinder::new(snapshot, RoutingConfig::default()).find_all_routes(
        origin,
        destination,
        max_results,
    )
}
