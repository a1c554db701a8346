//! Two-step spatial query: fetch a region's geometry from one layer, then
//! query another layer for features intersecting it.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::super::common::{
    blocking_route, default_out_fields, default_where, error_result, json_result, tool_model,
};
use crate::core::config::Config;
use crate::domains::atlas::{
    AtlasClient, AtlasError, AtlasResult, Layer, LayerQuery, SpatialFilter, first_geometry,
};
use crate::domains::geometry::compute_envelope;

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

fn default_use_envelope() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WithinRegionParams {
    /// Layer holding the region polygon, e.g. "counties" or "states".
    pub region_layer: String,

    /// Where clause selecting the region; the first match is used.
    pub region_where: String,

    /// Layer to search inside the region.
    pub target_layer: String,

    /// Extra where clause on the target layer.
    #[serde(default = "default_where")]
    pub target_where: String,

    #[serde(default = "default_out_fields")]
    pub out_fields: String,

    /// Filter by the region's bounding envelope (default) instead of the
    /// exact polygon.
    #[serde(default = "default_use_envelope")]
    pub use_envelope: bool,

    #[serde(default)]
    pub return_count_only: bool,

    #[serde(default)]
    pub return_geometry: bool,
}

pub struct WithinRegionTool;

impl WithinRegionTool {
    pub const NAME: &'static str = "query_within_region";

    pub const DESCRIPTION: &'static str = "Find features of one layer inside a region taken from another layer, e.g. dams inside Kent County. Uses the region's bounding envelope by default, or its exact polygon.";

    /// Turn the region query response into a spatial filter.
    fn region_filter(body: &Value, use_envelope: bool) -> AtlasResult<SpatialFilter> {
        let geometry = first_geometry(body).ok_or(AtlasError::NoRegion)?;

        if use_envelope {
            compute_envelope(&geometry)?
                .map(SpatialFilter::from)
                .ok_or(AtlasError::NoEnvelope)
        } else {
            SpatialFilter::from_value(&geometry)
        }
    }

    fn run(params: &WithinRegionParams, config: &Config) -> Result<Value, String> {
        let region_layer = Layer::lookup(&params.region_layer).map_err(|e| e.to_string())?;
        let target_layer = Layer::lookup(&params.target_layer).map_err(|e| e.to_string())?;
        let client = AtlasClient::new(&config.atlas).map_err(|e| e.to_string())?;

        let region_query = LayerQuery::new()
            .where_clause(params.region_where.clone())
            .out_fields("")
            .with_geometry(true);
        let region = client
            .query(region_layer, &region_query)
            .map_err(|e| e.to_string())?;

        let filter = Self::region_filter(&region, params.use_envelope).map_err(|e| {
            warn!("Target query not sent: {}", e);
            e.to_string()
        })?;
        info!(
            "Querying {} within {} ({})",
            target_layer.name,
            region_layer.name,
            filter.geometry_type()
        );

        let target_query = LayerQuery::new()
            .where_clause(params.target_where.clone())
            .out_fields(params.out_fields.clone())
            .count_only(params.return_count_only)
            .with_geometry(params.return_geometry)
            .spatial_filter(Some(filter));

        client
            .query(target_layer, &target_query)
            .map_err(|e| e.to_string())
    }

    #[instrument(skip_all, fields(region = %params.region_layer, target = %params.target_layer))]
    pub fn execute(params: &WithinRegionParams, config: &Config) -> CallToolResult {
        match Self::run(params, config) {
            Ok(body) => json_result(body),
            Err(message) => error_result(message),
        }
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: WithinRegionParams = parse_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    pub fn to_tool() -> Tool {
        tool_model::<WithinRegionParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        blocking_route(Self::to_tool(), config, Self::execute)
    }
}
