//! Builds the rmcp ToolRouter used by the STDIO and TCP transports.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{
    ArcgisAppTool, ArcgisAppWithRiversTool, DisplayGeoJsonTool, EmbeddableMapTool,
    LayerFieldsTool, QueryGeoJsonTool, QueryLayerTool, StateGeometryTool, WaterContextTool,
    WithinRegionTool,
};

pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(QueryLayerTool::create_route(config.clone()))
        .with_route(LayerFieldsTool::create_route(config.clone()))
        .with_route(StateGeometryTool::create_route(config.clone()))
        .with_route(QueryGeoJsonTool::create_route(config.clone()))
        .with_route(WithinRegionTool::create_route(config.clone()))
        .with_route(DisplayGeoJsonTool::create_route(config.clone()))
        .with_route(ArcgisAppTool::create_route(config.clone()))
        .with_route(ArcgisAppWithRiversTool::create_route(config.clone()))
        .with_route(WaterContextTool::create_route(config.clone()))
        .with_route(EmbeddableMapTool::create_route(config))
}
