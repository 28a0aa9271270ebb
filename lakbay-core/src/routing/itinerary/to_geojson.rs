use geo::{Coord, LineString, Point, line_string};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::{Itinerary, Segment, WalkingTransfer};
use crate::Error;
use crate::model::Stop;

impl Itinerary {
    /// Converts the itinerary to a `GeoJSON` `FeatureCollection` for the map
    /// layer: one line per ride and walk, plus the boarding and alighting
    /// points of every ride.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            if let Some(walk) = &segment.walking_transfer {
                features.push(create_walk_feature(idx, walk)?);
            }
            features.push(create_ride_feature(idx, segment)?);
            features.push(create_stop_feature(idx, &segment.boarding_stop, "boarding")?);
            features.push(create_stop_feature(idx, &segment.alighting_stop, "alighting")?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn create_ride_feature(leg_idx: usize, segment: &Segment) -> Result<Feature, Error> {
    let coords: Vec<Coord<f64>> = segment.stops().map(|s| s.coordinate.into()).collect();
    let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_type": "ride",
            "leg_index": leg_idx,
            "route_id": segment.route_id,
            "route_name": segment.route_name,
            "color": segment.route_color,
            "from_name": segment.boarding_stop.name,
            "to_name": segment.alighting_stop.name,
            "stop_count": segment.stop_count,
            "distance_km": segment.distance_km,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_walk_feature(leg_idx: usize, walk: &WalkingTransfer) -> Result<Feature, Error> {
    let from = walk.from_stop.coordinate;
    let to = walk.to_stop.coordinate;
    let line = line_string![
        (x: from.lng, y: from.lat),
        (x: to.lng, y: to.lat)
    ];

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&line)),
        "properties": {
            "leg_type": "walk",
            "leg_index": leg_idx,
            "from_name": walk.from_stop.name,
            "to_name": walk.to_stop.name,
            "distance_km": walk.distance_km,
            "duration": walk.duration_minutes,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_stop_feature(leg_idx: usize, stop: &Stop, role: &str) -> Result<Feature, Error> {
    let point: Point<f64> = stop.coordinate.into();

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&point)),
        "properties": {
            "leg_type": role,
            "leg_index": leg_idx,
            "stop_id": stop.id,
            "stop_name": stop.name,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::routing::{ItineraryFinder, RoutingConfig, find_route};
    use crate::test_support::{at, network};

    #[test]
    fn test_transfer_itinerary_features() {
        let net = network();
        let itinerary = find_route(&net, at(&net, "A1"), at(&net, "B3"), 1).unwrap();
        let collection = itinerary.to_geojson().unwrap();

        // Two rides plus their boarding and alighting points
        assert_eq!(collection.features.len(), 6);
        let first = &collection.features[0];
        assert_eq!(first.property("leg_type").unwrap(), "ride");
        assert_eq!(first.property("route_id").unwrap(), "A-AM");
        assert_eq!(first.property("stop_count").unwrap(), 3);

        let text = itinerary.to_geojson_string().unwrap();
        assert!(text.contains("FeatureCollection"));
    }

    #[test]
    fn test_walking_leg_feature() {
        let net = network();
        let config = RoutingConfig {
            walking_transfer_radius_km: Some(0.3),
            ..RoutingConfig::default()
        };
        let itinerary = ItineraryFinder::new(&net, config)
            .find_route(at(&net, "A1"), at(&net, "D2"), 1)
            .unwrap();
        let collection = itinerary.to_geojson().unwrap();

        assert_eq!(collection.features.len(), 7);
        let walks: Vec<_> = collection
            .features
            .iter()
            .filter(|f| f.property("leg_type").is_some_and(|v| v == "walk"))
            .collect();
        assert_eq!(walks.len(), 1);
        assert_eq!(walks[0].property("from_name").unwrap(), "A4");
    }
}
