use std::path::PathBuf;

use chrono::{TimeDelta, TimeZone, Utc};
use lakbay_core::prelude::*;

fn sample_config() -> NetworkConfig {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/routes");
    NetworkConfig::from_dirs([dir])
}

fn coordinate(snapshot: &NetworkSnapshot, name: &str) -> Coordinate {
    snapshot.stop(&StopId::from_name(name)).unwrap().coordinate
}

#[test]
fn test_sample_network_loads() {
    let snapshot = create_network_snapshot(&sample_config()).unwrap();
    assert_eq!(snapshot.route_count(), 3);
    assert_eq!(snapshot.stop_count(), 7);

    let city_hall = snapshot.stop(&StopId::from_name("City Hall")).unwrap();
    assert_eq!(
        city_hall.route_ids,
        [RouteId::new("1-AM"), RouteId::new("3-AM")]
    );
    assert_eq!(
        snapshot.stop_order(&RouteId::new("3-AM"), &city_hall.id),
        Some(0)
    );
    assert_eq!(
        snapshot.stop_order(&RouteId::new("1-AM"), &city_hall.id),
        Some(2)
    );
}

#[test]
fn test_transfer_points_follow_shared_stops() {
    let snapshot = create_network_snapshot(&sample_config()).unwrap();
    let roxas = coordinate(&snapshot, "Roxas Avenue");

    let to_matina = find_route(&snapshot, roxas, coordinate(&snapshot, "Matina Crossing"), 1).unwrap();
    assert!(to_matina.is_transfer());
    assert_eq!(to_matina.transfer_stops[0].name, "City Hall");
    assert_eq!(to_matina.route_ids(), [RouteId::new("1-AM"), RouteId::new("3-AM")]);

    let to_maa = find_route(&snapshot, roxas, coordinate(&snapshot, "Ma-a Road"), 1).unwrap();
    assert_eq!(to_maa.transfer_stops[0].name, "Bankerohan Market");
    let directions = get_route_directions(&to_maa);
    assert_eq!(
        directions,
        [
            "Board Route 1 Roxas - Bankerohan at Roxas Avenue",
            "Ride 2 stops",
            "Get off at Bankerohan Market",
            "Transfer to Route 2 Bankerohan - Ma-a at Bankerohan Market",
            "Ride 1 stop",
            "Get off at Ma-a Road",
        ]
    );
}

#[test]
fn test_navigate_sample_trip() {
    let snapshot = create_network_snapshot(&sample_config()).unwrap();
    let itinerary = find_route(
        &snapshot,
        coordinate(&snapshot, "Roxas Avenue"),
        coordinate(&snapshot, "Matina Crossing"),
        1,
    )
    .unwrap();

    let start = Utc.with_ymd_and_hms(2026, 3, 2, 6, 30, 0).unwrap();
    let steps = [
        (NavigationEvent::Start(itinerary), 0),
        (NavigationEvent::MarkAtStop, 3),
        (NavigationEvent::MarkOnBus, 8),
        (NavigationEvent::UpdateLocation(coordinate(&snapshot, "San Pedro Street")), 10),
        (NavigationEvent::MarkDroppedOff, 14),
        (NavigationEvent::MarkAtTransfer, 15),
        (NavigationEvent::MarkOnBus, 20),
        (NavigationEvent::MarkDroppedOff, 32),
    ];
    let state = steps
        .into_iter()
        .fold(NavigationState::default(), |state, (event, minute)| {
            apply(state, event, start + TimeDelta::minutes(minute))
        });

    let session = state.session().unwrap();
    assert_eq!(session.status, NavigationStatus::Completed);
    assert!(session.milestones.iter().all(|m| m.completed));

    let summary = session.trip_summary().unwrap();
    assert_eq!(summary.origin_stop_name, "Roxas Avenue");
    assert_eq!(summary.destination_stop_name, "Matina Crossing");
    assert_eq!(summary.trip_duration_minutes, 32);
    assert_eq!(summary.number_of_rides, 2);
}
