//! Pure transition function of the navigation state machine.
//!
//! `apply` consumes the state and returns the next one. Every mutator is a
//! no-op when there is no session, when the session is terminal, or when
//! the session is not in the status the action starts from.

use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;
use log::{debug, info};

use super::milestones::create_milestones_from_route;
use super::types::{NavigationEvent, NavigationSession, NavigationState, NavigationStatus};
use crate::model::Coordinate;
use crate::routing::Itinerary;
use crate::spatial::{distance, estimate_duration};
use crate::Km;

/// A rider this close to an intermediate stop has passed it
pub const ARRIVAL_RADIUS_KM: Km = 0.1;

pub fn apply(state: NavigationState, event: NavigationEvent, now: DateTime<Utc>) -> NavigationState {
    let mut state = state;
    match event {
        NavigationEvent::SetOrigin(origin) => state.origin = origin,
        NavigationEvent::SetDestination(destination) => state.destination = destination,
        NavigationEvent::SetCandidates(candidates) => state.candidates = candidates,
        NavigationEvent::SelectItinerary(itinerary) => state.selected = itinerary,
        NavigationEvent::Start(itinerary) => {
            state.selected = Some(itinerary.clone());
            let session = start_session(itinerary, now);
            info!(
                "Navigation {} started with {} milestones",
                session.id,
                session.milestones.len()
            );
            state.session = Some(session);
        }
        NavigationEvent::Reset => return NavigationState::default(),
        event => {
            let Some(session) = state.session.as_mut() else {
                debug!("Ignoring {event:?} without a navigation session");
                return state;
            };
            if session.status.is_terminal() {
                debug!("Ignoring {event:?} in terminal status {:?}", session.status);
                return state;
            }
            match event {
                NavigationEvent::StartTracking => state.tracking = true,
                NavigationEvent::StopTracking => state.tracking = false,
                NavigationEvent::MarkAtStop => mark_at_stop(session, now),
                NavigationEvent::MarkOnBus => mark_on_bus(session, now),
                NavigationEvent::MarkDroppedOff => mark_dropped_off(session, now),
                NavigationEvent::MarkAtTransfer => mark_at_transfer(session, now),
                NavigationEvent::CompleteMilestone(id) => complete_milestone(session, &id, now),
                NavigationEvent::UpdateLocation(location) => update_location(session, location, now),
                NavigationEvent::Cancel => {
                    info!("Navigation {} cancelled", session.id);
                    session.status = NavigationStatus::Cancelled;
                    session.wait_started_at = None;
                }
                _ => {}
            }
            if session.status.is_terminal() {
                state.tracking = false;
            }
        }
    }
    state
}

pub(crate) fn start_session(itinerary: Itinerary, now: DateTime<Utc>) -> NavigationSession {
    let milestones = create_milestones_from_route(&itinerary);
    let estimated_arrival = itinerary
        .estimated_duration
        .map(|minutes| now + TimeDelta::minutes(i64::from(minutes)));

    let mut session = NavigationSession {
        id: format!("nav-{}", now.timestamp_millis()),
        status: NavigationStatus::WalkingToStop,
        itinerary,
        milestones,
        current_milestone_index: 0,
        current_ride_index: 0,
        user_location: None,
        started_at: now,
        wait_started_at: None,
        estimated_arrival,
        remaining_distance_km: 0.0,
        completed_at: None,
    };
    session.remaining_distance_km = remaining_distance(&session);
    session
}

fn mark_at_stop(session: &mut NavigationSession, now: DateTime<Utc>) {
    if session.status == NavigationStatus::WalkingToStop {
        session.status = NavigationStatus::WaitingForBus;
        session.wait_started_at = Some(now);
    }
}

/// Boarding is confirmed by the rider, so the pending boarding or transfer
/// milestone completes here.
fn mark_on_bus(session: &mut NavigationSession, now: DateTime<Utc>) {
    if session.status != NavigationStatus::WaitingForBus {
        return;
    }
    session.status = NavigationStatus::Riding;
    session.wait_started_at = None;

    let idx = session.current_milestone_index;
    if let Some(milestone) = session.milestones.get_mut(idx)
        && !milestone.completed
        && !milestone.milestone_type.completes_by_proximity()
    {
        milestone.completed = true;
        milestone.completed_at = Some(now);
        advance_current(session, idx);
    }
}

fn mark_dropped_off(session: &mut NavigationSession, now: DateTime<Utc>) {
    if session.status != NavigationStatus::Riding {
        return;
    }

    let ride = session.current_ride_index;
    let mut last_done = None;
    for (idx, milestone) in session.milestones.iter_mut().enumerate() {
        if milestone.segment_index == ride && !milestone.completed {
            milestone.completed = true;
            milestone.completed_at = Some(now);
            last_done = Some(idx);
        }
    }
    if let Some(idx) = last_done {
        advance_current(session, idx);
    }

    if ride + 1 < session.itinerary.segments.len() {
        session.status = NavigationStatus::Transferring;
        session.current_ride_index += 1;
    } else {
        finish(session, now);
    }
}

fn mark_at_transfer(session: &mut NavigationSession, now: DateTime<Utc>) {
    if session.status == NavigationStatus::Transferring {
        session.status = NavigationStatus::WaitingForBus;
        session.wait_started_at = Some(now);
    }
}

fn complete_milestone(session: &mut NavigationSession, id: &str, now: DateTime<Utc>) {
    let Some(idx) = session
        .milestones
        .iter()
        .position(|m| m.id == id && !m.completed)
    else {
        return;
    };

    let milestone = &mut session.milestones[idx];
    milestone.completed = true;
    milestone.completed_at = Some(now);
    let mut next_status = milestone.milestone_type.status_on_completion();
    let segment_index = milestone.segment_index;
    debug!("Milestone {} at {} completed", milestone.id, milestone.stop_name);

    // Alighting before a walking transfer hands over to the next ride
    if next_status == NavigationStatus::Completed && segment_index + 1 < session.itinerary.segments.len() {
        next_status = NavigationStatus::Transferring;
        session.current_ride_index = session.current_ride_index.max(segment_index + 1);
    } else {
        session.current_ride_index = session.current_ride_index.max(segment_index);
    }

    advance_current(session, idx);
    match next_status {
        NavigationStatus::Completed => finish(session, now),
        status => {
            session.status = status;
            session.wait_started_at = None;
        }
    }
}

fn update_location(session: &mut NavigationSession, location: Coordinate, now: DateTime<Utc>) {
    session.user_location = Some(location);

    let passed = session
        .milestones
        .get(session.current_milestone_index)
        .filter(|m| !m.completed && m.milestone_type.completes_by_proximity())
        .filter(|m| distance(location, m.coordinate) <= ARRIVAL_RADIUS_KM)
        .map(|m| m.id.clone());
    if let Some(id) = passed {
        complete_milestone(session, &id, now);
    }

    session.remaining_distance_km = remaining_distance(session);
    if !session.status.is_terminal() {
        let minutes = estimate_duration(session.remaining_distance_km);
        session.estimated_arrival = Some(now + TimeDelta::minutes(i64::from(minutes)));
    }
}

fn finish(session: &mut NavigationSession, now: DateTime<Utc>) {
    info!("Navigation {} completed", session.id);
    session.status = NavigationStatus::Completed;
    session.wait_started_at = None;
    session.completed_at = Some(now);
    session.remaining_distance_km = 0.0;
    session.estimated_arrival = Some(now);
}

/// Point the session at the first incomplete milestone after `completed`,
/// or at the last milestone when none is left
fn advance_current(session: &mut NavigationSession, completed: usize) {
    let last = session.milestones.len().saturating_sub(1);
    session.current_milestone_index = session
        .milestones
        .iter()
        .enumerate()
        .skip(completed + 1)
        .find(|(_, m)| !m.completed)
        .map_or(last, |(idx, _)| idx);
}

/// Distance from the rider to the current milestone plus the rest of the
/// milestone chain
pub(crate) fn remaining_distance(session: &NavigationSession) -> Km {
    let pending = &session.milestones[session.current_milestone_index.min(session.milestones.len())..];
    if pending.iter().all(|m| m.completed) {
        return 0.0;
    }
    let to_current = match (session.user_location, pending.first()) {
        (Some(location), Some(current)) => distance(location, current.coordinate),
        _ => 0.0,
    };
    let along: Km = pending
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance(a.coordinate, b.coordinate))
        .sum();
    to_current + along
}
