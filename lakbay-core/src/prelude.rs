// Re-export key components
pub use crate::loading::{
    NetworkConfig, RouteDefinition, RoutePoint, build_snapshot, create_network_snapshot,
    load_route_definitions, parse_route_definitions,
};
pub use crate::model::{Coordinate, NetworkSnapshot, Route, RouteId, Stop, StopId};
pub use crate::navigation::{
    MilestoneType, NavigationEvent, NavigationMilestone, NavigationSession, NavigationState,
    NavigationStatus, Progress, RideSummary, TripSummary, apply, create_milestones_from_route,
};
pub use crate::routing::{
    Itinerary, ItineraryFinder, ItineraryKind, RoutingConfig, Segment, WalkingTransfer,
    find_all_routes, find_route, get_route_directions,
};
pub use crate::spatial::{
    distance, estimate_duration, format_distance, format_duration, nearest, route_polyline_length,
    within_radius,
};

pub use crate::Error;
pub use crate::{Km, Minutes};
