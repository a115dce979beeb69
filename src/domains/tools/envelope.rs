//! Response envelope helpers.

use rmcp::model::{CallToolResult, Content, RawContent};
use serde_json::Value;
use tracing::warn;

/// Wrap a platform result as a single pretty-printed JSON text block.
pub fn json_result(value: &Value) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_result(&format!("Error: failed to serialize result: {}", e)),
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Text of the first content block, if it is text.
pub fn envelope_text(result: &CallToolResult) -> Option<&str> {
    result.content.first().and_then(|content| match &content.raw {
        RawContent::Text(text) => Some(text.text.as_str()),
        _ => None,
    })
}

/// JSON form of an envelope, as sent over the HTTP transport.
pub fn envelope_json(result: &CallToolResult) -> Value {
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}
