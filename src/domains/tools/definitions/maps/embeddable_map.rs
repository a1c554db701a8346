//! Embeddable water map HTML for a state.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use super::super::common::{blocking_route, error_result, success_result, tool_model};
use crate::core::config::Config;
use crate::domains::maps::embeddable_water_map;

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EmbeddableMapParams {
    /// Two-letter state abbreviation, e.g. "TX".
    pub state: String,
}

pub struct EmbeddableMapTool;

impl EmbeddableMapTool {
    pub const NAME: &'static str = "create_embeddable_water_map";

    pub const DESCRIPTION: &'static str = "Return self-contained HTML for a water map of a state (gauges, rivers, HUC6 watersheds, dams) that loads every layer live from its ArcGIS REST service. Nothing is written to disk.";

    #[instrument(skip_all, fields(state = %params.state))]
    pub fn execute(params: &EmbeddableMapParams, _config: &Config) -> CallToolResult {
        if params.state.trim().is_empty() {
            return error_result("State must not be empty.");
        }
        match embeddable_water_map(&params.state) {
            Ok(html) => success_result(html),
            Err(e) => error_result(format!("Error: {}", e)),
        }
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: EmbeddableMapParams = parse_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    pub fn to_tool() -> Tool {
        tool_model::<EmbeddableMapParams>(Self::NAME, Self::DESCRIPTION)
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

    #[test]
    fn test_returns_html() {
        let params = EmbeddableMapParams {
            state: "va".to_string(),
        };
        let result = EmbeddableMapTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(false));
        let text = serde_json::to_string(&result.content).unwrap();
        assert!(text.contains("Water Map - Virginia"));
    }

    #[test]
    fn test_empty_state() {
        let params = EmbeddableMapParams {
            state: "  ".to_string(),
        };
        let result = EmbeddableMapTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(true));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler() {
        let result = EmbeddableMapTool::http_handler(
            serde_json::json!({ "state": "TX" }),
            Arc::new(Config::default()),
        )
        .unwrap();
        assert_eq!(result["isError"], false);
    }
}
