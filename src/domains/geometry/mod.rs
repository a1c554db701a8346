//! Geometry domain module.
//!
//! Translation from the ArcGIS REST geometry encoding (Esri JSON) into GeoJSON,
//! plus bounding-envelope computation for building spatial filters.
//!
//! ## Architecture
//!
//! - `esri.rs` - Esri JSON geometry types, recognized by shape key
//! - `geojson.rs` - GeoJSON geometry, feature and feature collection types
//! - `envelope.rs` - Axis-aligned bounding envelope
//! - `error.rs` - Decode errors for coordinates that cannot be read as numbers
//!
//! Everything here is pure: no I/O, no shared state.

mod envelope;
mod error;
mod esri;
mod geojson;

pub use envelope::Envelope;
pub use error::GeometryError;
pub use esri::EsriGeometry;
pub use geojson::{Feature, FeatureCollection, GeoJsonGeometry};

use serde_json::Value;

/// Convert a decoded Esri JSON geometry object into a GeoJSON geometry.
///
/// Returns `None` when the object carries none of the recognized shape keys
/// (`x`&`y`, `rings`, `paths`). Callers skip the feature in that case.
/// Coordinates are not validated.
pub fn convert_to_geojson(esri_geometry: &Value) -> Option<GeoJsonGeometry> {
    EsriGeometry::from_value(esri_geometry).map(EsriGeometry::into_geojson)
}

/// Compute the bounding envelope of every position in a polygon's rings.
///
/// Returns `Ok(None)` when the geometry has no `rings` key or the rings hold
/// no positions at all.
pub fn compute_envelope(polygon_geometry: &Value) -> Result<Option<Envelope>, GeometryError> {
    let Some(rings) = polygon_geometry.get("rings") else {
        return Ok(None);
    };
    Ok(Envelope::from_points(esri::ring_points(rings)?))
}
