//! Query a layer and return the features as a GeoJSON FeatureCollection.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{
    blocking_route, default_out_fields, default_where, error_result, structured_result, tool_model,
};
use crate::core::config::Config;
use crate::core::security::validate_output_path;
use crate::domains::atlas::{
    AtlasClient, Layer, LayerQuery, SpatialFilter, features_to_geojson,
};

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

/// WGS 84, the only CRS GeoJSON allows.
const WGS84: u32 = 4326;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryGeoJsonParams {
    /// Layer name, e.g. "usgs-gauges".
    pub layer_name: String,

    /// SQL where clause, e.g. "state = 'MI'".
    #[serde(default = "default_where", rename = "where")]
    pub where_clause: String,

    /// Comma-separated attribute names, or "*".
    #[serde(default = "default_out_fields")]
    pub out_fields: String,

    /// Optional Esri polygon or envelope JSON the features must intersect.
    #[serde(default)]
    pub spatial_filter: Option<String>,

    /// Where to save the GeoJSON. Relative paths are resolved against the
    /// output directory.
    #[serde(default)]
    pub output_path: Option<String>,
}

pub struct QueryGeoJsonTool;

impl QueryGeoJsonTool {
    pub const NAME: &'static str = "query_layer_geojson";

    pub const DESCRIPTION: &'static str = "Query a Living Atlas layer and return the matching features as a GeoJSON FeatureCollection in WGS 84, optionally saving it to a file for the map tools.";

    fn resolve_output(path: &str, config: &Config) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            config.atlas.output_dir.join(path)
        }
    }

    fn run(params: &QueryGeoJsonParams, config: &Config) -> Result<CallToolResult, String> {
        let layer = Layer::lookup(&params.layer_name).map_err(|e| e.to_string())?;
        let filter = params
            .spatial_filter
            .as_deref()
            .map(SpatialFilter::parse)
            .transpose()
            .map_err(|e| e.to_string())?;

        // Check the output location before spending a network round trip.
        let output = params
            .output_path
            .as_deref()
            .map(|p| validate_output_path(&Self::resolve_output(p, config), &config.security))
            .transpose()
            .map_err(|e| format!("Path security validation failed: {}", e))?;

        let query = LayerQuery::new()
            .where_clause(params.where_clause.clone())
            .out_fields(params.out_fields.clone())
            .with_geometry(true)
            .out_sr(WGS84)
            .spatial_filter(filter);

        let body = AtlasClient::new(&config.atlas)
            .and_then(|client| client.query(layer, &query))
            .map_err(|e| e.to_string())?;
        let collection = features_to_geojson(&body);
        let geojson = serde_json::to_value(&collection).map_err(|e| e.to_string())?;

        let mut summary = format!(
            "{} features from {} where {}",
            collection.len(),
            layer.name,
            params.where_clause
        );

        if let Some(path) = output {
            let text = serde_json::to_string_pretty(&geojson).map_err(|e| e.to_string())?;
            std::fs::write(&path, text)
                .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
            info!("Wrote {} features to {}", collection.len(), path.display());
            summary.push_str(&format!("; saved to {}", path.display()));
        }

        Ok(structured_result(summary, geojson))
    }

    #[instrument(skip_all, fields(layer = %params.layer_name))]
    pub fn execute(params: &QueryGeoJsonParams, config: &Config) -> CallToolResult {
        Self::run(params, config).unwrap_or_else(error_result)
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: QueryGeoJsonParams = parse_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    pub fn to_tool() -> Tool {
        tool_model::<QueryGeoJsonParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        blocking_route(Self::to_tool(), config, Self::execute)
    }
}
