//! Rider navigation through a chosen itinerary.
//!
//! The session is a finite-state machine over [`NavigationStatus`], advanced
//! by explicit rider confirmations and live location fixes. State lives in a
//! plain [`NavigationState`] value and changes only through [`apply`], so the
//! application decides where the state is stored.

mod milestones;
mod queries;
mod transitions;
mod types;

pub use milestones::create_milestones_from_route;
pub use queries::{Progress, RideSummary, TripSummary};
pub use transitions::{ARRIVAL_RADIUS_KM, apply};
pub use types::{
    MilestoneType, NavigationEvent, NavigationMilestone, NavigationSession, NavigationState,
    NavigationStatus,
};
