//! GeoJSON output types (RFC 7946 subset).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GeoJSON geometry produced from an Esri geometry.
///
/// Coordinates hold the source JSON values as they were received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeoJsonGeometry {
    Point([Value; 2]),
    LineString(Value),
    Polygon(Value),
}

impl GeoJsonGeometry {
    /// Point from numeric longitude and latitude.
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point([Value::from(x), Value::from(y)])
    }

    /// Numeric point coordinates, if this is a Point with numeric values.
    pub fn as_point(&self) -> Option<[f64; 2]> {
        match self {
            Self::Point([x, y]) => Some([x.as_f64()?, y.as_f64()?]),
            _ => None,
        }
    }
}

/// GeoJSON feature: a geometry plus the source attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: GeoJsonGeometry,
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: GeoJsonGeometry, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }
}

/// GeoJSON feature collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
