use super::types::{MilestoneType, NavigationMilestone};
use crate::model::Stop;
use crate::routing::{Itinerary, Segment};

/// Expected stop visits for an itinerary, in ride order.
///
/// The first ride starts with a boarding milestone and later rides with a
/// transfer milestone. The final ride contributes an alighting milestone.
/// An earlier ride ends where the next one's transfer begins, unless the
/// rider walks between them, in which case the ride gets its own alighting
/// milestone.
pub fn create_milestones_from_route(itinerary: &Itinerary) -> Vec<NavigationMilestone> {
    let mut milestones = Vec::new();
    let last = itinerary.segments.len().saturating_sub(1);

    for (segment_index, segment) in itinerary.segments.iter().enumerate() {
        let boarding_type = if segment_index == 0 {
            MilestoneType::Boarding
        } else {
            MilestoneType::Transfer
        };
        push(&mut milestones, segment, segment_index, &segment.boarding_stop, boarding_type);

        for stop in &segment.intermediate_stops {
            push(&mut milestones, segment, segment_index, stop, MilestoneType::Intermediate);
        }

        let walks_on = itinerary
            .segments
            .get(segment_index + 1)
            .is_some_and(|next| next.walking_transfer.is_some());
        if segment_index == last || walks_on {
            push(
                &mut milestones,
                segment,
                segment_index,
                &segment.alighting_stop,
                MilestoneType::Alighting,
            );
        }
    }

    milestones
}

fn push(
    milestones: &mut Vec<NavigationMilestone>,
    segment: &Segment,
    segment_index: usize,
    stop: &Stop,
    milestone_type: MilestoneType,
) {
    let order = milestones.len();
    milestones.push(NavigationMilestone {
        id: format!("m{order}-{}", stop.id),
        stop_id: stop.id.clone(),
        stop_name: stop.name.clone(),
        coordinate: stop.coordinate,
        route_id: segment.route_id.clone(),
        route_name: segment.route_name.clone(),
        route_color: segment.route_color.clone(),
        milestone_type,
        order,
        segment_index,
        completed: false,
        completed_at: None,
    });
}
