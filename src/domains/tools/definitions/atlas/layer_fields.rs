//! Field definitions of a layer.

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{blocking_route, error_result, json_result, tool_model};
use crate::core::config::Config;
use crate::domains::atlas::{AtlasClient, Layer};

#[cfg(feature = "http")]
use super::super::common::{http_response, parse_arguments};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LayerFieldsParams {
    /// Layer name, e.g. "dams".
    pub layer_name: String,
}

pub struct LayerFieldsTool;

impl LayerFieldsTool {
    pub const NAME: &'static str = "get_layer_fields";

    pub const DESCRIPTION: &'static str = "List the attribute fields (name, type, alias) of a Living Atlas layer, for building where clauses and out_fields.";

    #[instrument(skip_all, fields(layer = %params.layer_name))]
    pub fn execute(params: &LayerFieldsParams, config: &Config) -> CallToolResult {
        let layer = match Layer::lookup(&params.layer_name) {
            Ok(layer) => layer,
            Err(e) => return error_result(e.to_string()),
        };

        let fields = AtlasClient::new(&config.atlas).and_then(|client| client.layer_fields(layer));
        match fields {
            Ok(fields) => {
                info!("{} has {} fields", layer.name, fields.len());
                json_result(json!({ "fields": fields }))
            }
            Err(e) => error_result(e.to_string()),
        }
    }

    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: LayerFieldsParams = parse_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    pub fn to_tool() -> Tool {
        tool_model::<LayerFieldsParams>(Self::NAME, Self::DESCRIPTION)
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
    fn test_unknown_layer() {
        let params = LayerFieldsParams {
            layer_name: "lakes".to_string(),
        };
        let result = LayerFieldsTool::execute(&params, &Config::default());
        assert_eq!(result.is_error, Some(true));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_missing_param() {
        let result = LayerFieldsTool::http_handler(serde_json::json!({}), Arc::new(Config::default()));
        assert!(result.is_err());
    }

    #[test]
    #[ignore = "requires network access to ArcGIS Online"]
    fn test_dam_fields() {
        let params = LayerFieldsParams {
            layer_name: "dams".to_string(),
        };
        let result = LayerFieldsTool::execute(&params, &Config::default());
        let fields = result.structured_content.unwrap()["fields"].clone();
        assert!(fields.as_array().unwrap().iter().any(|f| f["name"] == "PRIMARY_DAM_TYPE"));
    }
}
