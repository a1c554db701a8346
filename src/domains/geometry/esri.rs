//! Esri JSON geometry types.
//!
//! ArcGIS encodes geometry without a `type` member; the shape is identified by
//! which keys are present. Recognition order is `x`&`y`, then `rings`, then
//! `paths`. Coordinate values are carried through untouched: integers stay
//! integers, and `z`/`m` ordinates (including `null` m values) survive.

use serde::Deserialize;
use serde_json::Value;

use super::error::GeometryError;
use super::geojson::GeoJsonGeometry;

/// An Esri JSON geometry with a recognized shape.
#[derive(Debug, Clone, PartialEq)]
pub enum EsriGeometry {
    Point { x: Value, y: Value },
    Polygon { rings: Value },
    Polyline { paths: Value },
}

impl EsriGeometry {
    /// Recognize an Esri geometry object by its keys. `None` when no
    /// recognized shape key is present, including for non-object input.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        if let (Some(x), Some(y)) = (object.get("x"), object.get("y")) {
            return Some(Self::Point {
                x: x.clone(),
                y: y.clone(),
            });
        }
        if let Some(rings) = object.get("rings") {
            return Some(Self::Polygon {
                rings: rings.clone(),
            });
        }
        object.get("paths").map(|paths| Self::Polyline {
            paths: paths.clone(),
        })
    }

    /// Translate into GeoJSON.
    ///
    /// Polylines keep only their first path; any further paths are dropped.
    /// An empty `paths` array becomes an empty LineString.
    pub fn into_geojson(self) -> GeoJsonGeometry {
        match self {
            Self::Point { x, y } => GeoJsonGeometry::Point([x, y]),
            Self::Polygon { rings } => GeoJsonGeometry::Polygon(rings),
            Self::Polyline { paths } => GeoJsonGeometry::LineString(
                paths
                    .as_array()
                    .and_then(|paths| paths.first())
                    .cloned()
                    .unwrap_or_else(|| Value::Array(Vec::new())),
            ),
        }
    }
}

/// Decode every `(x, y)` under a `rings` value. Extra ordinates are ignored.
pub(super) fn ring_points(rings: &Value) -> Result<Vec<(f64, f64)>, GeometryError> {
    let rings = Vec::<Vec<Vec<Value>>>::deserialize(rings)
        .map_err(|e| GeometryError::malformed("rings", e))?;

    rings
        .iter()
        .flatten()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok((
                x.as_f64().ok_or_else(|| GeometryError::non_numeric("x", x))?,
                y.as_f64().ok_or_else(|| GeometryError::non_numeric("y", y))?,
            )),
            _ => Err(GeometryError::short_position(position.len())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_wins_over_rings() {
        let geometry = EsriGeometry::from_value(&json!({"x": 1, "y": 2, "rings": []})).unwrap();
        assert_eq!(
            geometry,
            EsriGeometry::Point {
                x: json!(1),
                y: json!(2)
            }
        );
    }

    #[test]
    fn test_rings_win_over_paths() {
        let geometry =
            EsriGeometry::from_value(&json!({"rings": [], "paths": [[[0, 0]]]})).unwrap();
        assert_eq!(geometry, EsriGeometry::Polygon { rings: json!([]) });
    }

    #[test]
    fn test_spatial_reference_is_ignored() {
        let geometry = EsriGeometry::from_value(&json!({
            "x": -83.0,
            "y": 42.3,
            "spatialReference": {"wkid": 4326}
        }))
        .unwrap();
        assert_eq!(
            geometry.into_geojson(),
            GeoJsonGeometry::Point([json!(-83.0), json!(42.3)])
        );
    }

    #[test]
    fn test_null_m_values_survive() {
        let paths = json!([[[1.0, 2.0, null], [3.0, 4.0, null]]]);
        let geometry = EsriGeometry::from_value(&json!({ "paths": paths.clone() })).unwrap();
        assert_eq!(
            geometry.into_geojson(),
            GeoJsonGeometry::LineString(paths[0].clone())
        );
    }

    #[test]
    fn test_ring_points_ignore_extra_ordinates() {
        let points = ring_points(&json!([[[1, 2, 30, null], [3.5, -4]]])).unwrap();
        assert_eq!(points, vec![(1.0, 2.0), (3.5, -4.0)]);
    }

    #[test]
    fn test_ring_points_reject_bad_positions() {
        assert!(matches!(
            ring_points(&json!([[[1.0]]])),
            Err(GeometryError::ShortPosition { len: 1 })
        ));
        assert!(matches!(
            ring_points(&json!([[[null, 2.0]]])),
            Err(GeometryError::NonNumeric { key: "x", .. })
        ));
        assert!(matches!(
            ring_points(&json!("rings")),
            Err(GeometryError::Malformed { key: "rings", .. })
        ));
    }
}
