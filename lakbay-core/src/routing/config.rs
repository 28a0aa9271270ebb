use serde::{Deserialize, Serialize};

use crate::{Km, Minutes};

/// Tunables of the itinerary search. Defaults are the production values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Radius for candidate stops around each end in the exhaustive search
    pub near_radius_km: Km,
    /// Used per side when nothing lies within `near_radius_km`
    pub fallback_radius_km: Km,
    pub max_transfers: usize,
    pub max_results: usize,
    /// Added to the riding estimate of every transfer itinerary
    pub transfer_penalty_minutes: Minutes,
    /// Enables walking transfers between stops at most this far apart
    pub walking_transfer_radius_km: Option<Km>,
    pub walking_speed_kmh: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            near_radius_km: 0.5,
            fallback_radius_km: 2.0,
            max_transfers: 1,
            max_results: 3,
            transfer_penalty_minutes: 5,
            walking_transfer_radius_km: None,
            walking_speed_kmh: 5.0,
        }
    }
}
