//! Tool call and result value objects.
//!
//! A `ToolCall` is a structured request from the LLM to invoke one
//! capability with arguments; a `ToolResult` answers exactly one call and is
//! fed back into the transcript. Dispatch itself lives in the tools crate,
//! as a closed set of kinds rather than an open registry — the tool
//! vocabulary is fixed by the schema advertised to the LLM.

use serde::{Deserialize, Serialize};

/// A request to execute a tool, emitted by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the LLM's tool_use block id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value
    pub arguments: serde_json::Value,
}

/// The result of a tool execution.
///
/// Tool failures are results, not errors: the conversation must continue
/// regardless of tool failure, so the executor never raises to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The call ID this result answers
    pub call_id: String,

    /// Whether the tool executed successfully
    pub success: bool,

    /// The output payload as a JSON string, fed back to the LLM
    pub output: String,
}

impl ToolResult {
    /// A successful result carrying a JSON payload.
    pub fn ok(call_id: impl Into<String>, payload: &serde_json::Value) -> Self {
        Self {
            call_id: call_id.into(),
            success: true,
            output: payload.to_string(),
        }
    }

    /// A failed result. The message is wrapped in the original wire shape
    /// (`{"status":"error","message":...}`) so the LLM can read it.
    pub fn error(call_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            success: false,
            output: serde_json::json!({
                "status": "error",
                "message": message.into(),
            })
            .to_string(),
        }
    }
}
