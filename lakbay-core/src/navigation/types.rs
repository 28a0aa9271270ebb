use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, RouteId, StopId};
use crate::routing::Itinerary;
use crate::Km;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationStatus {
    WalkingToStop,
    WaitingForBus,
    Riding,
    Transferring,
    Completed,
    Cancelled,
}

impl NavigationStatus {
    /// No transition leaves a terminal status
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneType {
    Boarding,
    Transfer,
    Intermediate,
    Alighting,
}

impl MilestoneType {
    /// Status a session moves to once a milestone of this type is completed
    pub fn status_on_completion(self) -> NavigationStatus {
        match self {
            Self::Boarding | Self::Transfer | Self::Intermediate => NavigationStatus::Riding,
            Self::Alighting => NavigationStatus::Completed,
        }
    }

    /// Only passing an intermediate stop may be confirmed by location alone
    pub fn completes_by_proximity(self) -> bool {
        self == Self::Intermediate
    }
}

/// One expected stop visit during a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationMilestone {
    pub id: String,
    pub stop_id: StopId,
    pub stop_name: String,
    pub coordinate: Coordinate,
    pub route_id: RouteId,
    pub route_name: String,
    pub route_color: String,
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    pub order: usize,
    /// Index of the itinerary segment this visit belongs to
    pub segment_index: usize,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// The live trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSession {
    pub id: String,
    pub status: NavigationStatus,
    pub itinerary: Itinerary,
    pub milestones: Vec<NavigationMilestone>,
    pub current_milestone_index: usize,
    pub current_ride_index: usize,
    pub user_location: Option<Coordinate>,
    pub started_at: DateTime<Utc>,
    pub wait_started_at: Option<DateTime<Utc>>,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub remaining_distance_km: Km,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Everything the client holds: trip planning inputs and the live session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub origin: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    pub candidates: Vec<Itinerary>,
    pub selected: Option<Itinerary>,
    pub session: Option<NavigationSession>,
    /// Whether live location fixes are wanted
    pub tracking: bool,
}

impl NavigationState {
    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> Option<NavigationStatus> {
        self.session.as_ref().map(|s| s.status)
    }
}

/// Inputs to [`super::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    SetOrigin(Option<Coordinate>),
    SetDestination(Option<Coordinate>),
    SetCandidates(Vec<Itinerary>),
    SelectItinerary(Option<Itinerary>),
    /// Commit to an itinerary; replaces any live session
    Start(Itinerary),
    StartTracking,
    StopTracking,
    MarkAtStop,
    MarkOnBus,
    MarkDroppedOff,
    MarkAtTransfer,
    CompleteMilestone(String),
    UpdateLocation(Coordinate),
    Cancel,
    Reset,
}
