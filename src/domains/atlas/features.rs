//! Conversion of layer query responses into GeoJSON.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domains::geometry::{Feature, FeatureCollection, GeoJsonGeometry, convert_to_geojson};

/// Convert the `features` of an ArcGIS query response into a FeatureCollection.
///
/// Each feature's `geometry` goes through the Esri translator. Features whose
/// geometry is missing or unrecognized fall back to numeric `latitude` and
/// `longitude` attributes (as the river gauge layer provides); features with
/// neither are dropped. Coordinates are copied as received.
pub fn features_to_geojson(body: &Value) -> FeatureCollection {
    let Some(features) = body.get("features").and_then(Value::as_array) else {
        return FeatureCollection::default();
    };

    let mut converted = Vec::with_capacity(features.len());
    for feature in features {
        let properties = feature
            .get("attributes")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let geometry = feature.get("geometry").and_then(convert_to_geojson);

        match geometry.or_else(|| point_from_attributes(&properties)) {
            Some(geometry) => converted.push(Feature::new(geometry, properties)),
            None => debug!("Dropping feature without usable geometry"),
        }
    }

    FeatureCollection::new(converted)
}

fn point_from_attributes(attributes: &Map<String, Value>) -> Option<GeoJsonGeometry> {
    let latitude = attributes.get("latitude").and_then(Value::as_f64)?;
    let longitude = attributes.get("longitude").and_then(Value::as_f64)?;
    Some(GeoJsonGeometry::point(longitude, latitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_converts_geometries_and_keeps_attributes() {
        let body = json!({
            "features": [
                {"attributes": {"NAME": "Kent"}, "geometry": {"rings": [[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}},
                {"attributes": {"gaugelid": "GRRM4"}, "geometry": {"x": -85.6, "y": 42.9}}
            ]
        });
        let collection = features_to_geojson(&body);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.features[0].properties["NAME"], json!("Kent"));
        assert_eq!(
            collection.features[1].geometry,
            GeoJsonGeometry::point(-85.6, 42.9)
        );
    }

    #[test]
    fn test_falls_back_to_lat_lon_attributes() {
        let body = json!({
            "features": [
                {"attributes": {"latitude": 38.9, "longitude": -77.0, "state": "DC"}}
            ]
        });
        let collection = features_to_geojson(&body);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.features[0].geometry.as_point(), Some([-77.0, 38.9]));
    }

    #[test]
    fn test_drops_features_without_geometry() {
        let body = json!({
            "features": [
                {"attributes": {"id": 1}, "geometry": {"xmin": 0, "ymin": 0}},
                {"attributes": {"id": 2}},
                {"attributes": {"id": 3, "latitude": null, "longitude": -80.0}}
            ]
        });
        assert!(features_to_geojson(&body).is_empty());
    }

    #[test]
    fn test_count_response_is_empty_collection() {
        assert!(features_to_geojson(&json!({"count": 42})).is_empty());
    }

    #[test]
    fn test_odd_coordinates_do_not_fail_the_collection() {
        let body = json!({
            "features": [
                {"attributes": {"id": 1}, "geometry": {"paths": [[[1.0, 2.0, null], [3.0, 4.0, null]]]}},
                {"attributes": {"id": 2}, "geometry": {"rings": [[[0, 0], [0, 2], [3, 2], [0, 0]]]}}
            ]
        });
        let collection = features_to_geojson(&body);
        assert_eq!(collection.len(), 2);
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(
            value["features"][0]["geometry"]["coordinates"],
            json!([[1.0, 2.0, null], [3.0, 4.0, null]])
        );
        assert_eq!(
            value["features"][1]["geometry"]["coordinates"],
            json!([[[0, 0], [0, 2], [3, 2], [0, 0]]])
        );
    }
}
