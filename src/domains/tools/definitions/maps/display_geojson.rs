//! Hand a GeoJSON file to an external viewer (geojsonio by default).

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{blocking_route, error_result, success_result, tool_model};
use super::GeoJsonFileParams;
use crate::core::config::Config;
use crate::core::security::validate_path;
use crate::domains::maps::{ViewerOutcome, launcher::VIEWER_TIMEOUT, run_viewer};

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

pub struct DisplayGeoJsonTool;

impl DisplayGeoJsonTool {
    pub const NAME: &'static str = "display_geojson";

    pub const DESCRIPTION: &'static str = "Display a GeoJSON file in a browser map using the geojsonio command line tool.";

    #[instrument(skip_all, fields(path = %params.geojson_path))]
    pub fn execute(params: &GeoJsonFileParams, config: &Config) -> CallToolResult {
        let path = match validate_path(&params.geojson_path, &config.security) {
            Ok(path) => path,
            Err(e) => return error_result(format!("Path security validation failed: {}", e)),
        };

        let command = &config.atlas.geojsonio_command;
        info!("Running {} on {}", command, path.display());

        match run_viewer(command, &path, VIEWER_TIMEOUT) {
            Ok(outcome @ ViewerOutcome::Failed(_)) => error_result(outcome.message(command)),
            Ok(outcome) => success_result(outcome.message(command)),
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

#[cfg(all(test, unix))]
mod tests {
    use super::super::test_support::workspace;
    use super::*;

    #[test]
    fn test_viewer_command_from_config() {
        let (_dir, mut config, params) = workspace();
        config.atlas.geojsonio_command = "true".to_string();

        let result = DisplayGeoJsonTool::execute(&params, &config);
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn test_viewer_failure_is_tool_error() {
        let (_dir, mut config, params) = workspace();
        config.atlas.geojsonio_command = "false".to_string();

        let result = DisplayGeoJsonTool::execute(&params, &config);
        assert_eq!(result.is_error, Some(true));
        let text = serde_json::to_string(&result.content).unwrap();
        assert!(text.contains("Error running false"));
    }

    #[test]
    fn test_missing_viewer() {
        let (_dir, mut config, params) = workspace();
        config.atlas.geojsonio_command = "no-such-geojson-viewer".to_string();

        let result = DisplayGeoJsonTool::execute(&params, &config);
        assert_eq!(result.is_error, Some(true));
    }
}
