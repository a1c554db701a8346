//! Blocking JSON-RPC 2.0 over HTTP POST.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use super::error::{ClientError, ClientResult};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/mcp";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name and description from `tools/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolSummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub struct RpcClient {
    url: String,
    http: reqwest::blocking::Client,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("atlas-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            url: url.into(),
            http,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request and return its `result` member.
    pub fn request(&self, method: &str, params: Value) -> ClientResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!("-> {} (id {})", method, id);

        let response: Value = self
            .http
            .post(&self.url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        extract_result(response)
    }

    pub fn initialize(&self) -> ClientResult<Value> {
        self.request(
            "initialize",
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": "atlas-client",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        )
    }

    pub fn list_tools(&self) -> ClientResult<Vec<ToolSummary>> {
        let result = self.request("tools/list", json!({}))?;
        let tools = result
            .get("tools")
            .cloned()
            .ok_or_else(|| ClientError::Malformed("missing 'tools'".to_string()))?;
        serde_json::from_value(tools).map_err(|e| ClientError::Malformed(e.to_string()))
    }

    /// Call a tool; the raw `result` object is returned.
    pub fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> ClientResult<Value> {
        self.request(
            "tools/call",
            json!({ "name": name, "arguments": arguments }),
        )
    }
}

fn extract_result(mut response: Value) -> ClientResult<Value> {
    if let Some(error) = response.get("error") {
        return Err(ClientError::Rpc {
            code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
            message: error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        });
    }
    response
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| ClientError::Malformed("missing 'result'".to_string()))
}

/// What `call-tool` prints: the structured content when the server sent it,
/// the whole result otherwise.
pub fn display_value(result: &Value) -> &Value {
    match result.get("structuredContent") {
        Some(structured) if !structured.is_null() => structured,
        _ => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_result() {
        let value = extract_result(json!({ "jsonrpc": "2.0", "id": 1, "result": { "ok": true } }))
            .unwrap();
        assert_eq!(value, json!({ "ok": true }));
    }

    #[test]
    fn test_extract_error() {
        let err = extract_result(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32601, "message": "Method not found: nope" }
        }))
        .unwrap_err();
        match err {
            ClientError::Rpc { code, message } => {
                assert_eq!(code, -32601);
                assert_eq!(message, "Method not found: nope");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_result() {
        let err = extract_result(json!({ "jsonrpc": "2.0", "id": 1 })).unwrap_err();
        assert!(matches!(err, ClientError::Malformed(_)));
    }

    #[test]
    fn test_display_prefers_structured_content() {
        let result = json!({
            "content": [{ "type": "text", "text": "3 features" }],
            "structuredContent": { "count": 3 },
            "isError": false
        });
        assert_eq!(display_value(&result), &json!({ "count": 3 }));

        let plain = json!({ "content": [], "isError": false });
        assert_eq!(display_value(&plain), &plain);
    }

    #[test]
    #[ignore] // needs a running server
    fn test_list_tools_live() {
        let client = RpcClient::new(DEFAULT_SERVER_URL).unwrap();
        client.initialize().unwrap();
        assert_eq!(client.list_tools().unwrap().len(), 10);
    }
}
