//! Read-only derivations of session state for the rendering layer

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use super::types::{MilestoneType, NavigationMilestone, NavigationSession, NavigationStatus};
use crate::model::RouteId;
use crate::Minutes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Completed milestones
    pub current: usize,
    pub total: usize,
}

/// The ride the rider is on or about to take
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideSummary {
    pub ride_index: usize,
    pub total_rides: usize,
    pub route_id: RouteId,
    pub route_name: String,
    pub route_color: String,
    pub boarding_stop_name: String,
    pub alighting_stop_name: String,
    pub stops_remaining: usize,
}

/// What the feedback collaborator receives once a trip is over
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub route_ids: Vec<RouteId>,
    pub origin_stop_name: String,
    pub destination_stop_name: String,
    pub trip_duration_minutes: Minutes,
    pub number_of_rides: usize,
}

impl NavigationSession {
    pub fn current_milestone(&self) -> Option<&NavigationMilestone> {
        self.milestones.get(self.current_milestone_index)
    }

    pub fn next_milestone(&self) -> Option<&NavigationMilestone> {
        self.milestones.get(self.current_milestone_index + 1)
    }

    pub fn remaining_milestones(&self) -> Vec<&NavigationMilestone> {
        self.milestones.iter().filter(|m| !m.completed).collect()
    }

    pub fn completed_milestones(&self) -> Vec<&NavigationMilestone> {
        self.milestones.iter().filter(|m| m.completed).collect()
    }

    pub fn current_ride(&self) -> Option<RideSummary> {
        let segment = self.itinerary.segments.get(self.current_ride_index)?;
        let stops_remaining = self
            .milestones
            .iter()
            .filter(|m| m.segment_index == self.current_ride_index && !m.completed)
            .count();
        Some(RideSummary {
            ride_index: self.current_ride_index,
            total_rides: self.itinerary.segments.len(),
            route_id: segment.route_id.clone(),
            route_name: segment.route_name.clone(),
            route_color: segment.route_color.clone(),
            boarding_stop_name: segment.boarding_stop.name.clone(),
            alighting_stop_name: segment.alighting_stop.name.clone(),
            stops_remaining,
        })
    }

    /// Where the rider gets off the current ride: the ride's own alighting
    /// milestone if it has one, otherwise the next ride's transfer milestone
    pub fn drop_off_milestone(&self) -> Option<&NavigationMilestone> {
        let ride = self.current_ride_index;
        self.milestones
            .iter()
            .find(|m| m.segment_index == ride && m.milestone_type == MilestoneType::Alighting)
            .or_else(|| {
                self.milestones.iter().find(|m| {
                    m.segment_index == ride + 1 && m.milestone_type == MilestoneType::Transfer
                })
            })
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.milestones.iter().filter(|m| m.completed).count(),
            total: self.milestones.len(),
        }
    }

    /// How long the rider has been waiting at the current stop
    pub fn wait_duration(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.wait_started_at
            .map(|started| (now - started).max(TimeDelta::zero()))
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Available once the trip has completed
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn trip_summary(&self) -> Option<TripSummary> {
        if self.status != NavigationStatus::Completed {
            return None;
        }
        let first = self.itinerary.first_segment()?;
        let last = self.itinerary.last_segment()?;
        let finished = self.completed_at.unwrap_or(self.started_at);
        let minutes = (finished - self.started_at).num_minutes().max(0) as Minutes;

        Some(TripSummary {
            route_ids: self.itinerary.route_ids(),
            origin_stop_name: first.boarding_stop.name.clone(),
            destination_stop_name: last.alighting_stop.name.clone(),
            trip_duration_minutes: minutes,
            number_of_rides: self.itinerary.segments.len(),
        })
    }
}
