//! Basic ArcGIS JS page for a GeoJSON file.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use std::sync::Arc;
use tracing::instrument;

use super::super::common::{blocking_route, error_result, structured_result, tool_model};
use super::{GeoJsonFileParams, publish_page};
use crate::core::config::Config;
use crate::domains::maps::geojson_app;

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

pub struct ArcgisAppTool;

impl ArcgisAppTool {
    pub const NAME: &'static str = "create_arcgis_app";

    pub const DESCRIPTION: &'static str = "Create a simple ArcGIS Maps SDK for JavaScript page showing a GeoJSON file on a gray basemap, save it as arcgis_app.html in the output directory and open it in the browser.";

    #[instrument(skip_all, fields(path = %params.geojson_path))]
    pub fn execute(params: &GeoJsonFileParams, config: &Config) -> CallToolResult {
        match publish_page(params, config, geojson_app) {
            Ok(page) => match serde_json::to_value(&page) {
                Ok(data) => structured_result(page.message("ArcGIS app"), data),
                Err(e) => error_result(format!("Error: {}", e)),
            },
            Err(message) => error_result(message),
        }
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: GeoJsonFileParams = parse_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    pub fn to_tool() -> Tool {
        tool_model::<GeoJsonFileParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        blocking_route(Self::to_tool(), config, Self::execute)
    }
}
