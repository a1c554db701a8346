//! Water context page: gauges, rivers, watersheds and dams.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use std::sync::Arc;
use tracing::instrument;

use super::super::common::{blocking_route, error_result, structured_result, tool_model};
use super::{GeoJsonFileParams, publish_page};
use crate::core::config::Config;
use crate::domains::maps::water_context_app;

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

pub struct WaterContextTool;

impl WaterContextTool {
    pub const NAME: &'static str = "create_water_map_context";

    pub const DESCRIPTION: &'static str = "Create a water map for a GeoJSON file of USGS gauges: gauges styled by flood status, plus rivers, watersheds and dams of the gauges' state, with a legend. Saved as water_map_context.html.";

    #[instrument(skip_all, fields(path = %params.geojson_path))]
    pub fn execute(params: &GeoJsonFileParams, config: &Config) -> CallToolResult {
        let page = match publish_page(params, config, water_context_app) {
            Ok(page) => page,
            Err(message) => return error_result(message),
        };

        let what = format!(
            "Water map context for {}",
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

    #[test]
    fn test_uses_full_state_name() {
        let (dir, config, params) = workspace();
        let result = WaterContextTool::execute(&params, &config);
        assert_eq!(result.is_error, Some(false));

        let text = serde_json::to_string(&result.content).unwrap();
        assert!(text.contains("Water map context for District of Columbia created:"));

        let html = std::fs::read_to_string(dir.path().join("water_map_context.html")).unwrap();
        assert!(html.contains("State = 'District of Columbia'"));
    }

    #[test]
    fn test_input_outside_root_rejected() {
        let (_dir, mut config, params) = workspace();
        let root = tempfile::TempDir::new().unwrap();
        config.security.root_path = Some(root.path().to_path_buf());

        let result = WaterContextTool::execute(&params, &config);
        assert_eq!(result.is_error, Some(true));
    }
}
