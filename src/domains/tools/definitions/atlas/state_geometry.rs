//! Boundary geometry of a US state.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::super::common::{blocking_route, error_result, json_result, tool_model};
use crate::core::config::Config;
use crate::domains::atlas::{AtlasClient, states};

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StateGeometryParams {
    /// Full state name ("Michigan") or two-letter abbreviation ("MI").
    pub state_name: String,
}

pub struct StateGeometryTool;

impl StateGeometryTool {
    pub const NAME: &'static str = "get_state_geometry";

    pub const DESCRIPTION: &'static str = "Get the Esri polygon geometry of a US state boundary. The result can be passed as spatial_filter to query_layer.";

    /// Abbreviations become full names; anything else is used as given.
    pub fn state_name(input: &str) -> String {
        let input = input.trim();
        states::name_for_abbreviation(input)
            .map(str::to_string)
            .unwrap_or_else(|| input.to_string())
    }

    #[instrument(skip_all, fields(state = %params.state_name))]
    pub fn execute(params: &StateGeometryParams, config: &Config) -> CallToolResult {
        let name = Self::state_name(&params.state_name);
        debug!("Resolved state name: {}", name);

        match AtlasClient::new(&config.atlas).and_then(|client| client.state_geometry(&name)) {
            Ok(geometry) => json_result(geometry),
            Err(e) => error_result(e.to_string()),
        }
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: StateGeometryParams = parse_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    pub fn to_tool() -> Tool {
        tool_model::<StateGeometryParams>(Self::NAME, Self::DESCRIPTION)
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
    fn test_state_name_resolution() {
        assert_eq!(StateGeometryTool::state_name("mi"), "Michigan");
        assert_eq!(StateGeometryTool::state_name(" Ohio "), "Ohio");
        assert_eq!(StateGeometryTool::state_name("DC"), "District of Columbia");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_missing_param() {
        let result = StateGeometryTool::http_handler(serde_json::json!({}), Arc::new(Config::default()));
        assert!(result.is_err());
    }

    #[test]
    #[ignore = "requires network access to ArcGIS Online"]
    fn test_unknown_state() {
        let params = StateGeometryParams {
            state_name: "Atlantis".to_string(),
        };
        let result = StateGeometryTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(true));
    }
}
