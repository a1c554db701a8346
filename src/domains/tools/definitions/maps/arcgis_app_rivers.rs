//! ArcGIS JS page with the state's rivers under the GeoJSON points.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use std::sync::Arc;
use tracing::instrument;

use super::super::common::{blocking_route, error_result, structured_result, tool_model};
use super::{GeoJsonFileParams, publish_page};
use crate::core::config::Config;
use crate::domains::maps::geojson_with_rivers_app;

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

pub struct ArcgisAppWithRiversTool;

impl ArcgisAppWithRiversTool {
    pub const NAME: &'static str = "create_arcgis_app_with_rivers";

    pub const DESCRIPTION: &'static str = "Create an ArcGIS JS page showing a GeoJSON file over the rivers of its state (taken from the first feature's 'state' property), centered on the points. Saved as arcgis_app_with_rivers.html.";

    #[instrument(skip_all, fields(path = %params.geojson_path))]
    pub fn execute(params: &GeoJsonFileParams, config: &Config) -> CallToolResult {
        let page = match publish_page(params, config, geojson_with_rivers_app) {
            Ok(page) => page,
            Err(message) => return error_result(message),
        };

        let what = format!(
            "ArcGIS app with rivers for {}",
            page.state.as_deref().unwrap_or("unknown state")
        );
        match serde_json::to_value(&page) {
            Ok(data) => structured_result(page.message(&what), data),
            Err(e) => error_result(format!("Error: {}", e)),
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

#[cfg(test)]
mod tests {
    use super::super::test_support::workspace;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reports_state() {
        let (dir, config, params) = workspace();
        let result = ArcgisAppWithRiversTool::execute(&params, &config);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["state"], "DC");
        assert!(dir.path().join("arcgis_app_with_rivers.html").exists());
    }

    #[test]
    fn test_no_features() {
        let (dir, config, _) = workspace();
        let empty = dir.path().join("empty.geojson");
        std::fs::write(&empty, json!({ "type": "FeatureCollection", "features": [] }).to_string())
            .unwrap();

        let params = GeoJsonFileParams {
            geojson_path: empty.to_string_lossy().into_owned(),
        };
        let result = ArcgisAppWithRiversTool::execute(&params, &config);
        assert_eq!(result.is_error, Some(true));
        let text = serde_json::to_string(&result.content).unwrap();
        assert!(text.contains("No features found in GeoJSON."));
    }
}
