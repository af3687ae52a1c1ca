//! Provider trait — the abstraction over LLM backends.
//!
//! A Provider knows how to send a transcript to an LLM and get a response
//! back, including the model's stop reason and any requested tool calls.
//! The agent loop treats this as an opaque capability — any backend
//! implementing this contract is interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Message;

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "claude-sonnet-4-20250514")
    pub model: String,

    /// The transcript messages
    pub messages: Vec<Message>,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

/// A tool definition sent to the LLM so it knows the calling convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The model requested one or more tool invocations.
    ToolUse,
    /// The model finished its turn naturally, with no tool call.
    EndTurn,
    /// Anything else (max_tokens, refusal, ...) — fatal to the agent loop.
    Other(String),
}

impl StopReason {
    /// Parse a wire-format stop reason string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "tool_use" => Self::ToolUse,
            "end_turn" => Self::EndTurn,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToolUse => write!(f, "tool_use"),
            Self::EndTurn => write!(f, "end_turn"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated assistant message (text + tool calls)
    pub message: Message,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The agent loop calls `complete()` without knowing which backend is being
/// used — pure polymorphism.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;
}
