use chrono::{DateTime, Utc};
use lakbay_core::prelude::*;
use log::{debug, info};

use crate::tracking::{LocationFeed, LocationPublisher, location_channel};

/// Application-owned home of the navigation state.
///
/// Every change goes through [`apply`]; the store only adds the wall clock
/// and the lifetime of the location feed, which is dropped whenever tracking
/// turns off (stop, cancel, completion or reset).
#[derive(Debug, Default)]
pub struct NavigationStore {
    state: NavigationState,
    feed: Option<LocationFeed>,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn session(&self) -> Option<&NavigationSession> {
        self.state.session()
    }

    pub fn status(&self) -> Option<NavigationStatus> {
        self.state.status()
    }

    pub fn is_tracking(&self) -> bool {
        self.state.tracking && self.feed.is_some()
    }

    pub fn dispatch(&mut self, event: NavigationEvent) -> &NavigationState {
        self.dispatch_at(event, Utc::now())
    }

    pub fn dispatch_at(&mut self, event: NavigationEvent, now: DateTime<Utc>) -> &NavigationState {
        let state = std::mem::take(&mut self.state);
        self.state = apply(state, event, now);
        if !self.state.tracking && self.feed.take().is_some() {
            debug!("Tracking stopped, releasing location feed");
        }
        &self.state
    }

    pub fn set_origin(&mut self, origin: Option<Coordinate>) {
        self.dispatch(NavigationEvent::SetOrigin(origin));
    }

    pub fn set_destination(&mut self, destination: Option<Coordinate>) {
        self.dispatch(NavigationEvent::SetDestination(destination));
    }

    pub fn set_candidates(&mut self, candidates: Vec<Itinerary>) {
        self.dispatch(NavigationEvent::SetCandidates(candidates));
    }

    pub fn select_itinerary(&mut self, itinerary: Option<Itinerary>) {
        self.dispatch(NavigationEvent::SelectItinerary(itinerary));
    }

    pub fn start_navigation(&mut self, itinerary: Itinerary) {
        self.dispatch(NavigationEvent::Start(itinerary));
    }

    pub fn mark_at_stop(&mut self) {
        self.dispatch(NavigationEvent::MarkAtStop);
    }

    pub fn mark_on_bus(&mut self) {
        self.dispatch(NavigationEvent::MarkOnBus);
    }

    pub fn mark_dropped_off(&mut self) {
        self.dispatch(NavigationEvent::MarkDroppedOff);
    }

    pub fn mark_at_transfer(&mut self) {
        self.dispatch(NavigationEvent::MarkAtTransfer);
    }

    pub fn complete_milestone(&mut self, milestone_id: &str) {
        self.dispatch(NavigationEvent::CompleteMilestone(milestone_id.to_string()));
    }

    pub fn update_location(&mut self, location: Coordinate) {
        self.dispatch(NavigationEvent::UpdateLocation(location));
    }

    pub fn cancel_navigation(&mut self) {
        self.dispatch(NavigationEvent::Cancel);
    }

    pub fn reset(&mut self) {
        self.dispatch(NavigationEvent::Reset);
    }

    /// Subscribe to location fixes for the live session.
    ///
    /// Returns `None` when there is no active session to track. A previous
    /// subscription is replaced and its publisher sees the cancellation.
    pub fn start_location_tracking(&mut self) -> Option<LocationPublisher> {
        self.dispatch(NavigationEvent::StartTracking);
        if !self.state.tracking {
            return None;
        }
        let (publisher, feed) = location_channel();
        if let Some(session) = self.state.session() {
            info!("Location tracking started for {}", session.id);
        }
        self.feed = Some(feed);
        Some(publisher)
    }

    pub fn stop_location_tracking(&mut self) {
        self.dispatch(NavigationEvent::StopTracking);
    }

    /// Apply every pending location fix, oldest first. Returns how many were
    /// applied; fixes left over after tracking turns off are discarded.
    pub fn poll_location(&mut self) -> usize {
        self.poll_location_at(Utc::now())
    }

    pub fn poll_location_at(&mut self, now: DateTime<Utc>) -> usize {
        let Some(feed) = &self.feed else {
            return 0;
        };
        let fixes = feed.drain();
        let mut applied = 0;
        for location in fixes {
            if self.feed.is_none() {
                break;
            }
            self.dispatch_at(NavigationEvent::UpdateLocation(location), now);
            applied += 1;
        }
        applied
    }

    /// Summary handed to the feedback collaborator once the trip completed
    pub fn trip_summary(&self) -> Option<TripSummary> {
        self.session().and_then(NavigationSession::trip_summary)
    }
}
