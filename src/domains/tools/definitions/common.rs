//! Helpers shared by every tool definition.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::super::ToolError;
use crate::core::config::Config;

/// Create an error result with a formatted message.
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    let message = message.into();
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message)])
}

/// Create a success result with text content.
pub fn success_result(content: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.into())])
}

/// Text summary for humans plus the data as structured content.
pub fn structured_result(summary: impl Into<String>, data: Value) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(summary.into())],
        structured_content: Some(data),
        is_error: Some(false),
        meta: None,
    }
}

/// Pretty-printed JSON as text, and the same value as structured content.
pub fn json_result(data: Value) -> CallToolResult {
    match serde_json::to_string_pretty(&data) {
        Ok(text) => structured_result(text, data),
        Err(e) => error_result(format!("Failed to serialize result: {}", e)),
    }
}

/// Default `where` clause: every feature.
pub fn default_where() -> String {
    "1=1".to_string()
}

/// Default `outFields`: every attribute.
pub fn default_out_fields() -> String {
    "*".to_string()
}

/// Tool metadata with the input schema generated from `P`.
pub fn tool_model<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Route that deserializes `P` and runs the tool on the blocking pool.
///
/// Tools use a blocking HTTP client, which must not run on an async worker.
pub fn blocking_route<S, P>(
    tool: Tool,
    config: Arc<Config>,
    run: fn(&P, &Config) -> CallToolResult,
) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let config = config.clone();
        async move {
            let params: P = serde_json::from_value(Value::Object(args))
                .map_err(|e| {
                    McpError::invalid_params(ToolError::invalid_arguments(e.to_string()).to_string(), None)
                })?;

            tokio::task::spawn_blocking(move || run(&params, &config))
                .await
                .map_err(|e| {
                    McpError::internal_error(ToolError::execution_failed(e.to_string()).to_string(), None)
                })
        }
        .boxed()
    })
}

/// Deserialize HTTP `arguments` into a tool's parameter struct.
#[cfg(feature = "http")]
pub fn parse_arguments<P: DeserializeOwned>(arguments: Value) -> Result<P, String> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())
}

/// Shape a tool result as an MCP `tools/call` result object.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });
    if let (Some(structured), Some(object)) = (result.structured_content, response.as_object_mut())
    {
        object.insert("structuredContent".to_string(), structured);
    }
    response
}
