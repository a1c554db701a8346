//! Raw attribute / count query against a named layer.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{
    blocking_route, default_out_fields, default_where, error_result, json_result, tool_model,
};
use crate::core::config::Config;
use crate::domains::atlas::{AtlasClient, AtlasResult, Layer, LayerQuery, SpatialFilter};

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryLayerParams {
    /// Layer name, e.g. "usgs-gauges" or "counties". See atlas://layers.
    pub layer_name: String,

    /// SQL where clause.
    #[serde(default = "default_where", rename = "where")]
    pub where_clause: String,

    /// Comma-separated attribute names, or "*".
    #[serde(default = "default_out_fields")]
    pub out_fields: String,

    /// Only return the number of matching features.
    #[serde(default)]
    pub return_count_only: bool,

    /// Esri geometry JSON: a polygon with "rings", or an envelope with
    /// xmin/ymin/xmax/ymax. Features must intersect it.
    #[serde(default)]
    pub spatial_filter: Option<String>,

    /// Include feature geometries in the response.
    #[serde(default)]
    pub return_geometry: bool,
}

pub struct QueryLayerTool;

impl QueryLayerTool {
    pub const NAME: &'static str = "query_layer";

    pub const DESCRIPTION: &'static str = "Query a Living Atlas feature layer by name with a SQL where clause and an optional spatial filter. Returns the raw ArcGIS JSON response (features, or a count).";

    fn run(params: &QueryLayerParams, config: &Config) -> AtlasResult<serde_json::Value> {
        let layer = Layer::lookup(&params.layer_name)?;
        let filter = params
            .spatial_filter
            .as_deref()
            .map(SpatialFilter::parse)
            .transpose()?;

        let query = LayerQuery::new()
            .where_clause(params.where_clause.clone())
            .out_fields(params.out_fields.clone())
            .count_only(params.return_count_only)
            .with_geometry(params.return_geometry)
            .spatial_filter(filter);

        AtlasClient::new(&config.atlas)?.query(layer, &query)
    }

    #[instrument(skip_all, fields(layer = %params.layer_name))]
    pub fn execute(params: &QueryLayerParams, config: &Config) -> CallToolResult {
        info!("Querying {} where {}", params.layer_name, params.where_clause);
        match Self::run(params, config) {
            Ok(body) => json_result(body),
            Err(e) => error_result(e.to_string()),
        }
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: QueryLayerParams = parse_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    pub fn to_tool() -> Tool {
        tool_model::<QueryLayerParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        blocking_route(Self::to_tool(), config, Self::execute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(args: serde_json::Value) -> QueryLayerParams {
        serde_json::from_value(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let p = params(json!({ "layer_name": "states" }));
        assert_eq!(p.where_clause, "1=1");
        assert_eq!(p.out_fields, "*");
        assert!(!p.return_count_only);
        assert!(!p.return_geometry);
        assert!(p.spatial_filter.is_none());
    }

    #[test]
    fn test_where_is_renamed() {
        let p = params(json!({ "layer_name": "dams", "where": "State = 'Texas'" }));
        assert_eq!(p.where_clause, "State = 'Texas'");
    }

    #[test]
    fn test_unknown_layer_lists_available() {
        let result = QueryLayerTool::execute(
            &params(json!({ "layer_name": "volcanoes" })),
            &Config::default(),
        );
        assert_eq!(result.is_error, Some(true));
        let text = serde_json::to_string(&result.content).unwrap();
        assert!(text.contains("Invalid layer name: volcanoes"));
        assert!(text.contains("usgs-gauges"));
    }

    #[test]
    fn test_invalid_spatial_filter() {
        let result = QueryLayerTool::execute(
            &params(json!({ "layer_name": "rivers", "spatial_filter": "{\"xmin\": 1}" })),
            &Config::default(),
        );
        assert_eq!(result.is_error, Some(true));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_missing_layer() {
        let result = QueryLayerTool::http_handler(json!({ "where": "1=1" }), Arc::new(Config::default()));
        assert!(result.is_err());
    }

    #[test]
    #[ignore = "requires network access to ArcGIS Online"]
    fn test_count_states() {
        let result = QueryLayerTool::execute(
            &params(json!({ "layer_name": "states", "return_count_only": true })),
            &Config::default(),
        );
        assert_eq!(result.is_error, Some(false));
        assert!(result.structured_content.unwrap()["count"].as_u64().unwrap() >= 50);
    }
}
