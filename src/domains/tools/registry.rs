//! Tool registry: names, metadata and HTTP dispatch for every tool.

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

#[cfg(feature = "http")]
use super::ToolError;
use crate::core::config::Config;

use super::definitions::{
    ArcgisAppTool, ArcgisAppWithRiversTool, DisplayGeoJsonTool, EmbeddableMapTool,
    LayerFieldsTool, QueryGeoJsonTool, QueryLayerTool, StateGeometryTool, WaterContextTool,
    WithinRegionTool,
};

pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
}

impl ToolRegistry {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            QueryLayerTool::NAME,
            LayerFieldsTool::NAME,
            StateGeometryTool::NAME,
            QueryGeoJsonTool::NAME,
            WithinRegionTool::NAME,
            DisplayGeoJsonTool::NAME,
            ArcgisAppTool::NAME,
            ArcgisAppWithRiversTool::NAME,
            WaterContextTool::NAME,
            EmbeddableMapTool::NAME,
        ]
    }

    /// Metadata for every tool, in listing order.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            QueryLayerTool::to_tool(),
            LayerFieldsTool::to_tool(),
            StateGeometryTool::to_tool(),
            QueryGeoJsonTool::to_tool(),
            WithinRegionTool::to_tool(),
            DisplayGeoJsonTool::to_tool(),
            ArcgisAppTool::to_tool(),
            ArcgisAppWithRiversTool::to_tool(),
            WaterContextTool::to_tool(),
            EmbeddableMapTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call. Blocks; call it from a blocking thread.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let config = self.config.clone();
        match name {
            QueryLayerTool::NAME => QueryLayerTool::http_handler(arguments, config),
            LayerFieldsTool::NAME => LayerFieldsTool::http_handler(arguments, config),
            StateGeometryTool::NAME => StateGeometryTool::http_handler(arguments, config),
            QueryGeoJsonTool::NAME => QueryGeoJsonTool::http_handler(arguments, config),
            WithinRegionTool::NAME => WithinRegionTool::http_handler(arguments, config),
            DisplayGeoJsonTool::NAME => DisplayGeoJsonTool::http_handler(arguments, config),
            ArcgisAppTool::NAME => ArcgisAppTool::http_handler(arguments, config),
            ArcgisAppWithRiversTool::NAME => ArcgisAppWithRiversTool::http_handler(arguments, config),
            WaterContextTool::NAME => WaterContextTool::http_handler(arguments, config),
            EmbeddableMapTool::NAME => EmbeddableMapTool::http_handler(arguments, config),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::new(test_config()).tool_names();
        assert_eq!(names.len(), 10);
        for expected in [
            "query_layer",
            "get_layer_fields",
            "get_state_geometry",
            "query_layer_geojson",
            "query_within_region",
            "display_geojson",
            "create_arcgis_app",
            "create_arcgis_app_with_rivers",
            "create_water_map_context",
            "create_embeddable_water_map",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_metadata_matches_names() {
        let names = ToolRegistry::new(test_config()).tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), names.len());
        for (tool, name) in tools.iter().zip(names) {
            assert_eq!(tool.name, name);
            assert!(tool.description.is_some());
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_embeddable_map() {
        let registry = ToolRegistry::new(test_config());
        let result = registry.call_tool("create_embeddable_water_map", serde_json::json!({ "state": "MI" }));
        assert!(result.is_ok());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_config());
        assert!(registry.call_tool("unknown", serde_json::json!({})).is_err());
    }
}
