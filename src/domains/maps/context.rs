//! Reading GeoJSON inputs and deriving what a map page needs from them.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::error::{MapError, MapResult};
use crate::domains::geometry::Envelope;

/// Map center used when the data has no Point features.
pub const DEFAULT_CENTER: (f64, f64) = (-77.0, 39.0);

/// Read a GeoJSON file. Any JSON document is accepted.
pub fn load_geojson(path: &Path) -> MapResult<Value> {
    let text = fs::read_to_string(path).map_err(|source| MapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| MapError::InvalidGeoJson {
        path: path.to_path_buf(),
        source,
    })
}

fn features(geojson: &Value) -> &[Value] {
    geojson
        .get("features")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// The `state` property of the first feature.
pub fn first_feature_state(geojson: &Value) -> MapResult<String> {
    let first = features(geojson).first().ok_or(MapError::NoFeatures)?;
    first
        .pointer("/properties/state")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(MapError::MissingState)
}

/// Midpoint of the bounds of all Point features, or [`DEFAULT_CENTER`].
pub fn point_center(geojson: &Value) -> (f64, f64) {
    let points = features(geojson).iter().filter_map(|feature| {
        let geometry = feature.get("geometry")?;
        if geometry.get("type").and_then(Value::as_str) != Some("Point") {
            return None;
        }
        let coordinates = geometry.get("coordinates")?.as_array()?;
        Some((coordinates.first()?.as_f64()?, coordinates.get(1)?.as_f64()?))
    });

    Envelope::from_points(points)
        .map(|envelope| envelope.center())
        .unwrap_or(DEFAULT_CENTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn gauges() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-85.0, 42.0] },
                  "properties": { "state": "MI", "status": "minor" } },
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-83.0, 44.0] },
                  "properties": { "state": "MI" } },
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] },
                  "properties": {} }
            ]
        })
    }

    #[test]
    fn test_first_feature_state() {
        assert_eq!(first_feature_state(&gauges()).unwrap(), "MI");
    }

    #[test]
    fn test_no_features() {
        let empty = json!({ "type": "FeatureCollection", "features": [] });
        assert!(matches!(first_feature_state(&empty), Err(MapError::NoFeatures)));
        assert!(matches!(first_feature_state(&json!({})), Err(MapError::NoFeatures)));
    }

    #[test]
    fn test_missing_state() {
        let data = json!({ "features": [ { "properties": { "name": "x" } } ] });
        assert!(matches!(first_feature_state(&data), Err(MapError::MissingState)));
    }

    #[test]
    fn test_point_center_ignores_other_geometries() {
        assert_eq!(point_center(&gauges()), (-84.0, 43.0));
    }

    #[test]
    fn test_point_center_default() {
        assert_eq!(point_center(&json!({ "features": [] })), DEFAULT_CENTER);
    }

    #[test]
    fn test_load_geojson() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.geojson");
        let bad = dir.path().join("bad.geojson");
        fs::write(&good, gauges().to_string()).unwrap();
        fs::write(&bad, "not json").unwrap();

        assert_eq!(load_geojson(&good).unwrap(), gauges());
        assert!(matches!(load_geojson(&bad), Err(MapError::InvalidGeoJson { .. })));
        assert!(matches!(
            load_geojson(&dir.path().join("missing.geojson")),
            Err(MapError::Read { .. })
        ));
    }
}
