use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::NetworkSnapshot;
use crate::Error;
use crate::model::RouteId;

impl NetworkSnapshot {
    /// Route polyline and its stops as a `GeoJSON` `FeatureCollection`
    pub fn route_to_geojson(&self, route_id: &RouteId) -> Result<FeatureCollection, Error> {
        let route = self
            .route(route_id)
            .ok_or_else(|| Error::UnknownRoute(route_id.to_string()))?;

        let coords: Vec<Coord<f64>> = route.polyline.iter().map(|&c| c.into()).collect();
        let line = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeoJsonValue::from(&LineString::new(coords))),
            "properties": {
                "route_id": route.id,
                "name": route.name,
                "color": route.color,
                "description": route.description,
                "time_period": route.time_period,
            }
        });

        let mut features =
            vec![Feature::from_json_value(line).map_err(|e| Error::GeoJsonError(e.to_string()))?];

        for (order, stop_id) in self.route_stops(route_id).iter().enumerate() {
            let Some(stop) = self.stop(stop_id) else {
                continue;
            };
            let point: Point<f64> = stop.coordinate.into();
            let value = json!({
                "type": "Feature",
                "geometry": Geometry::new(GeoJsonValue::from(&point)),
                "properties": {
                    "stop_id": stop.id,
                    "name": stop.name,
                    "order": order,
                    "route_ids": stop.route_ids,
                }
            });
            features
                .push(Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;
    use crate::model::RouteId;
    use crate::test_support::network;

    #[test]
    fn test_route_features() {
        let net = network();
        let collection = net.route_to_geojson(&RouteId::new("B-AM")).unwrap();

        // Polyline plus one point per stop
        assert_eq!(collection.features.len(), 4);
        assert_eq!(collection.features[0].property("name").unwrap(), "Route B");
        assert_eq!(collection.features[3].property("order").unwrap(), 2);
    }

    #[test]
    fn test_unknown_route() {
        let net = network();
        let err = net.route_to_geojson(&RouteId::new("Z-PM")).unwrap_err();
        assert!(matches!(err, Error::UnknownRoute(id) if id == "Z-PM"));
    }
}
