//! MCP server handler.
//!
//! Tool routing is built in `domains/tools/router.rs`; this file only wires
//! the rmcp `ServerHandler` to the tool router and the resource service, and
//! exposes the same operations as plain JSON for the HTTP transport.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::config::Config;
use crate::domains::{resources::ResourceService, tools::build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Text returned to clients in `initialize`.
pub const INSTRUCTIONS: &str = "Query Esri ArcGIS Living Atlas feature layers (states, counties, \
USGS gauges, rivers, dams, watersheds, impaired waters, water quality). Use query_layer or \
query_layer_geojson to fetch features, query_within_region to filter one layer by another \
layer's geometry, and the create_* tools to build ArcGIS map pages from GeoJSON. \
Read atlas://layers for the list of layer names.";

#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    resource_service: Arc<ResourceService>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let resource_service = Arc::new(ResourceService::new(config.clone()));

        Self {
            tool_router: build_tool_router::<Self>(config.clone()),
            config,
            resource_service,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// Tool metadata in the shape of an MCP `tools/list` entry.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name on the blocking pool.
    ///
    /// Tools talk to ArcGIS with a blocking HTTP client, so they never run
    /// on an async worker thread.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.config.clone());
        let name = name.to_string();

        tokio::task::spawn_blocking(move || registry.call_tool(&name, arguments))
            .await
            .map_err(|e| format!("Tool task failed: {}", e))?
    }

    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        self.resource_service
            .list_resources()
            .await
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        self.resource_service
            .read_resource(uri)
            .await
            .map(|result| serde_json::json!({ "contents": result.contents }))
            .map_err(|e| e.to_string())
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self.resource_service.list_resources().await;
        debug!("Listing {} resources", resources.len());
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_lists_every_tool() {
        let server = McpServer::new(Config::default());
        let tools = server.list_tools();
        assert_eq!(tools.len(), 10);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_info_advertises_tools_and_resources() {
        let server = McpServer::new(Config::default());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "living-atlas-mcp");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_unknown_tool() {
        let server = McpServer::new(Config::default());
        let err = server
            .call_tool("no_such_tool", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, "Unknown tool: no_such_tool");
    }

    #[tokio::test]
    async fn test_read_layers_resource() {
        let server = McpServer::new(Config::default());
        let result = server.read_resource("atlas://layers").await.unwrap();
        assert!(result["contents"].is_array());
    }
}
