//! Query parameters for the ArcGIS `/query` endpoint.

use serde_json::Value;

use super::error::{AtlasError, AtlasResult};
use crate::domains::geometry::Envelope;

const SPATIAL_REL_INTERSECTS: &str = "esriSpatialRelIntersects";

/// Spatial restriction applied to a layer query.
#[derive(Debug, Clone, PartialEq)]
pub enum SpatialFilter {
    /// Polygon geometry, sent as its Esri JSON text.
    Polygon(String),

    /// Bounding box, sent as `xmin,ymin,xmax,ymax`.
    Envelope(Envelope),
}

impl SpatialFilter {
    /// Parse a filter supplied as a JSON string.
    ///
    /// An object with `rings` is a polygon filter; anything else must carry
    /// numeric `xmin`, `ymin`, `xmax` and `ymax`.
    pub fn parse(text: &str) -> AtlasResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AtlasError::invalid_filter(format!("not valid JSON: {}", e)))?;
        Self::from_value(&value)
    }

    /// Build a filter from an already decoded geometry object.
    pub fn from_value(value: &Value) -> AtlasResult<Self> {
        if !value.is_object() {
            return Err(AtlasError::invalid_filter("expected a JSON object"));
        }

        if value.get("rings").is_some() {
            return Ok(Self::Polygon(value.to_string()));
        }

        let coordinate = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_f64)
                .ok_or_else(|| AtlasError::invalid_filter(format!("missing numeric '{}'", key)))
        };

        Ok(Self::Envelope(Envelope {
            xmin: coordinate("xmin")?,
            ymin: coordinate("ymin")?,
            xmax: coordinate("xmax")?,
            ymax: coordinate("ymax")?,
        }))
    }

    /// Value of the `geometry` query parameter.
    pub fn geometry_param(&self) -> String {
        match self {
            Self::Polygon(json) => json.clone(),
            Self::Envelope(envelope) => envelope.to_query_string(),
        }
    }

    /// Value of the `geometryType` query parameter.
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "esriGeometryPolygon",
            Self::Envelope(_) => "esriGeometryEnvelope",
        }
    }
}

impl From<Envelope> for SpatialFilter {
    fn from(envelope: Envelope) -> Self {
        Self::Envelope(envelope)
    }
}

/// Parameters of a single layer query.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerQuery {
    pub where_clause: String,
    pub out_fields: String,
    pub return_count_only: bool,
    pub return_geometry: bool,
    pub spatial_filter: Option<SpatialFilter>,

    /// Output spatial reference WKID (e.g. 4326 for GeoJSON output).
    pub out_sr: Option<u32>,
}

impl Default for LayerQuery {
    fn default() -> Self {
        Self {
            where_clause: "1=1".to_string(),
            out_fields: "*".to_string(),
            return_count_only: false,
            return_geometry: false,
            spatial_filter: None,
            out_sr: None,
        }
    }
}

impl LayerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_clause(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = where_clause.into();
        self
    }

    pub fn out_fields(mut self, out_fields: impl Into<String>) -> Self {
        self.out_fields = out_fields.into();
        self
    }

    pub fn count_only(mut self, count_only: bool) -> Self {
        self.return_count_only = count_only;
        self
    }

    pub fn with_geometry(mut self, return_geometry: bool) -> Self {
        self.return_geometry = return_geometry;
        self
    }

    pub fn spatial_filter(mut self, filter: Option<SpatialFilter>) -> Self {
        self.spatial_filter = filter;
        self
    }

    pub fn out_sr(mut self, wkid: u32) -> Self {
        self.out_sr = Some(wkid);
        self
    }

    /// Spatially filtered queries are POSTed since polygons can be long.
    pub fn uses_post(&self) -> bool {
        self.spatial_filter.is_some()
    }

    /// Form/query parameters, `f=json` excluded (it is part of the URL).
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("where", self.where_clause.clone()),
            ("outFields", self.out_fields.clone()),
            ("returnCountOnly", self.return_count_only.to_string()),
        ];

        if self.return_geometry {
            params.push(("returnGeometry", "true".to_string()));
        }

        if let Some(wkid) = self.out_sr {
            params.push(("outSR", wkid.to_string()));
        }

        if let Some(filter) = &self.spatial_filter {
            params.push(("geometry", filter.geometry_param()));
            params.push(("geometryType", filter.geometry_type().to_string()));
            params.push(("spatialRel", SPATIAL_REL_INTERSECTS.to_string()));
        }

        params
    }

    /// URL-encoded parameters, for logging.
    pub fn encoded(&self) -> String {
        serde_urlencoded::to_string(self.form_params()).unwrap_or_default()
    }
}

/// Quote a value as an SQL string literal for a `where` clause.
pub fn sql_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
