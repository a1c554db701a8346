//! HTTP transport: JSON-RPC 2.0 over POST.
//!
//! Stateless apart from a record of the last `initialize`; every request is
//! answered independently, which is all the `atlas-client` binary needs.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;

/// MCP protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct HttpTransport {
    config: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, -32601, format!("Method not found: {}", method))
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: String,
    client: Arc<RwLock<Option<ClientSession>>>,
}

/// What the most recent `initialize` told us about the client.
#[derive(Debug, Clone)]
struct ClientSession {
    name: String,
    initialized: bool,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Startup banner lines naming the served endpoints.
    fn endpoint_lines(&self) -> [String; 2] {
        [
            format!("  - JSON-RPC: POST {}", self.config.rpc_path),
            "  - Health:   GET /health".to_string(),
        ]
    }

    /// Build the axum router without binding a socket.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
            client: Arc::new(RwLock::new(None)),
        };

        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr,
            if self.config.enable_cors { "enabled" } else { "disabled" }
        );
        for line in self.endpoint_lines() {
            info!("{}", line);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!("POST JSON-RPC messages to {}", state.rpc_path)
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method = %request.method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    debug!("Received JSON-RPC request");
    Json(process_request(&state, request).await)
}

async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(state, request).await,
        "ping" => JsonRpcResponse::success(request.id, json!({})),
        "tools/list" => JsonRpcResponse::success(
            request.id,
            json!({ "tools": state.server.list_tools() }),
        ),
        "tools/call" => handle_tools_call(state, request).await,
        "resources/list" => JsonRpcResponse::success(
            request.id,
            json!({ "resources": state.server.list_resources().await }),
        ),
        "resources/read" => handle_resources_read(state, request).await,
        method if method.starts_with("notifications/") => {
            handle_notification(state, method).await;
            JsonRpcResponse::success(request.id, Value::Null)
        }
        method => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::method_not_found(request.id, method)
        }
    }
}

async fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let client_name = request
        .params
        .as_ref()
        .and_then(|p| p.pointer("/clientInfo/name"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    info!("Initialize from client '{}'", client_name);

    *state.client.write().await = Some(ClientSession {
        name: client_name,
        initialized: false,
    });

    JsonRpcResponse::success(
        request.id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": state.server.name(),
                "version": state.server.version()
            },
            "instructions": INSTRUCTIONS
        }),
    )
}

/// Pull a required string field out of `params`.
fn required_str(params: Option<&Value>, field: &str) -> Result<String, String> {
    let params = params.ok_or_else(|| "Missing params".to_string())?;
    params
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("Missing '{}' in params", field))
}

async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let name = match required_str(request.params.as_ref(), "name") {
        Ok(name) => name,
        Err(msg) => return JsonRpcResponse::invalid_params(request.id, msg),
    };

    let arguments = request
        .params
        .as_ref()
        .and_then(|p| p.get("arguments"))
        .cloned()
        .unwrap_or_else(|| json!({}));

    info!("Calling tool {}", name);
    match state.server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

async fn handle_resources_read(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let uri = match required_str(request.params.as_ref(), "uri") {
        Ok(uri) => uri,
        Err(msg) => return JsonRpcResponse::invalid_params(request.id, msg),
    };

    match state.server.read_resource(&uri).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

async fn handle_notification(state: &AppState, method: &str) {
    if method == "notifications/initialized" {
        if let Some(session) = state.client.write().await.as_mut()
            && !session.initialized
        {
            session.initialized = true;
            info!("Client '{}' initialized", session.name);
        }
    } else {
        debug!("Ignoring notification: {}", method);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        HttpTransport::new(HttpConfig::default()).router(McpServer::new(Config::default()))
    }

    async fn rpc(body: Value) -> Value {
        let request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = rpc(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "clientInfo": { "name": "atlas-client", "version": "0.1.0" } }
        }))
        .await;

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], "living-atlas-mcp");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = rpc(json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" })).await;
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 10);
        assert!(tools.iter().any(|t| t["name"] == "query_layer"));
    }

    #[tokio::test]
    async fn test_tools_call_without_name() {
        let response = rpc(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "arguments": {} }
        }))
        .await;
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = rpc(json!({ "jsonrpc": "2.0", "id": 4, "method": "prompts/list" })).await;
        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let response = rpc(json!({ "jsonrpc": "1.0", "id": 5, "method": "tools/list" })).await;
        assert_eq!(response["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_resources_read_states() {
        let response = rpc(json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "resources/read",
            "params": { "uri": "atlas://states" }
        }))
        .await;
        let text = response["result"]["contents"][0]["text"].as_str().unwrap();
        assert!(text.contains("District of Columbia"));
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_endpoint_lines_are_plain_ascii() {
        let lines = HttpTransport::new(HttpConfig::default()).endpoint_lines();
        assert_eq!(lines[0], "  - JSON-RPC: POST /mcp");
        assert!(lines.iter().all(|line| line.is_ascii()));
    }
}
