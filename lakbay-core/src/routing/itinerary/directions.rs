use super::Itinerary;
use crate::spatial::format_distance;

/// Step-by-step text for an itinerary, one line per event in ride order
pub fn get_route_directions(itinerary: &Itinerary) -> Vec<String> {
    let mut lines = Vec::new();

    for (idx, segment) in itinerary.segments.iter().enumerate() {
        if let Some(walk) = &segment.walking_transfer {
            lines.push(format!(
                "Walk {} from {} to {}",
                format_distance(walk.distance_km),
                walk.from_stop.name,
                walk.to_stop.name
            ));
        }

        if idx == 0 {
            lines.push(format!(
                "Board {} at {}",
                segment.route_name, segment.boarding_stop.name
            ));
        } else {
            lines.push(format!(
                "Transfer to {} at {}",
                segment.route_name, segment.boarding_stop.name
            ));
        }

        match segment.intermediate_stops.len() {
            0 => {}
            1 => lines.push("Ride 1 stop".to_string()),
            n => lines.push(format!("Ride {n} stops")),
        }

        lines.push(format!("Get off at {}", segment.alighting_stop.name));
    }

    lines
}
