//! Anthropic native provider implementation.
//!
//! Uses Anthropic's Messages API directly:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as top-level field
//! - Native tool use with `tool_use` / `tool_result` content blocks
//! - `stop_reason` surfaced to the agent loop, which drives its state
//!   machine off it

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use canvasforge_core::error::ProviderError;
use canvasforge_core::message::{Message, MessageToolCall, Role};
use canvasforge_core::provider::{
    Provider, ProviderRequest, ProviderResponse, StopReason, ToolDefinition, Usage,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic native Messages API provider.
pub struct AnthropicProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| ProviderError::NotConfigured(e.to_string()))?;

        Ok(Self {
            name: "anthropic".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Convert transcript messages to Anthropic API format with content
    /// blocks. Tool results travel as `user` messages per the wire protocol.
    fn to_api_messages(messages: &[Message]) -> Vec<AnthropicMessage> {
        let mut result = Vec::new();

        for msg in messages {
            match msg.role {
                Role::User => {
                    result.push(AnthropicMessage {
                        role: "user".into(),
                        content: AnthropicContent::Text(msg.content.clone()),
                    });
                }
                Role::Assistant => {
                    if msg.tool_calls.is_empty() {
                        result.push(AnthropicMessage {
                            role: "assistant".into(),
                            content: AnthropicContent::Text(msg.content.clone()),
                        });
                    } else {
                        let mut blocks: Vec<ContentBlock> = Vec::new();
                        if !msg.content.is_empty() {
                            blocks.push(ContentBlock::Text {
                                text: msg.content.clone(),
                            });
                        }
                        for tc in &msg.tool_calls {
                            let input: serde_json::Value =
                                serde_json::from_str(&tc.arguments).unwrap_or_default();
                            blocks.push(ContentBlock::ToolUse {
                                id: tc.id.clone(),
                                name: tc.name.clone(),
                                input,
                            });
                        }
                        result.push(AnthropicMessage {
                            role: "assistant".into(),
                            content: AnthropicContent::Blocks(blocks),
                        });
                    }
                }
                Role::Tool => {
                    let tool_call_id = msg.tool_call_id.clone().unwrap_or_default();
                    result.push(AnthropicMessage {
                        role: "user".into(),
                        content: AnthropicContent::Blocks(vec![ContentBlock::ToolResult {
                            tool_use_id: tool_call_id,
                            content: msg.content.clone(),
                        }]),
                    });
                }
            }
        }

        result
    }

    /// Convert tool definitions to Anthropic format.
    fn to_api_tools(tools: &[ToolDefinition]) -> Vec<AnthropicTool> {
        tools
            .iter()
            .map(|t| AnthropicTool {
                name: t.name.clone(),
                description: t.description.clone(),
                input_schema: t.parameters.clone(),
            })
            .collect()
    }

    /// Convert an Anthropic API response to our ProviderResponse.
    fn to_provider_response(resp: AnthropicResponse) -> ProviderResponse {
        let mut text_content = String::new();
        let mut tool_calls = Vec::new();

        for block in &resp.content {
            match block {
                ResponseContentBlock::Text { text } => {
                    if !text_content.is_empty() {
                        text_content.push('\n');
                    }
                    text_content.push_str(text);
                }
                ResponseContentBlock::ToolUse { id, name, input } => {
                    tool_calls.push(MessageToolCall {
                        id: id.clone(),
                        name: name.clone(),
                        arguments: serde_json::to_string(input).unwrap_or_default(),
                    });
                }
            }
        }

        let message = Message {
            id: resp.id.clone(),
            role: Role::Assistant,
            content: text_content,
            tool_calls,
            tool_call_id: None,
            timestamp: chrono::Utc::now(),
        };

        let stop_reason = resp
            .stop_reason
            .as_deref()
            .map(StopReason::parse)
            .unwrap_or(StopReason::EndTurn);

        let usage = Some(Usage {
            prompt_tokens: resp.usage.input_tokens,
            completion_tokens: resp.usage.output_tokens,
            total_tokens: resp.usage.input_tokens + resp.usage.output_tokens,
        });

        ProviderResponse {
            message,
            stop_reason,
            usage,
            model: resp.model,
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);
        let api_messages = Self::to_api_messages(&request.messages);
        let max_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": api_messages,
            "max_tokens": max_tokens,
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
        }

        debug!(provider = "anthropic", model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited { retry_after_secs: 5 });
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: AnthropicResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse Anthropic response: {e}"),
            })?;

        Ok(Self::to_provider_response(api_resp))
    }
}

// --- Anthropic API types ---

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: AnthropicContent,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum AnthropicContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicTool {
    name: String,
    description: String,
    input_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    model: String,
    content: Vec<ResponseContentBlock>,
    usage: AnthropicUsage,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let provider = AnthropicProvider::new("sk-ant-test").unwrap();
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn constructor_with_base_url() {
        let provider = AnthropicProvider::new("sk-ant-test")
            .unwrap()
            .with_base_url("https://custom.proxy.com/");
        assert_eq!(provider.base_url, "https://custom.proxy.com");
    }

    #[test]
    fn message_conversion_user_assistant() {
        let messages = vec![Message::user("Hello"), Message::assistant("Hi!")];
        let api_msgs = AnthropicProvider::to_api_messages(&messages);
        assert_eq!(api_msgs.len(), 2);
        assert_eq!(api_msgs[0].role, "user");
        assert_eq!(api_msgs[1].role, "assistant");
    }

    #[test]
    fn message_conversion_with_tool_calls() {
        let mut msg = Message::assistant("Creating the component now");
        msg.tool_calls = vec![MessageToolCall {
            id: "toolu_123".into(),
            name: "create_component".into(),
            arguments: r#"{"name":"Button","code":"const Button = () => null"}"#.into(),
        }];

        let api_msgs = AnthropicProvider::to_api_messages(&[msg]);
        assert_eq!(api_msgs.len(), 1);
        match &api_msgs[0].content {
            AnthropicContent::Blocks(blocks) => {
                assert_eq!(blocks.len(), 2); // text + tool_use
                match &blocks[1] {
                    ContentBlock::ToolUse { id, name, input } => {
                        assert_eq!(id, "toolu_123");
                        assert_eq!(name, "create_component");
                        assert_eq!(input["name"], "Button");
                    }
                    _ => panic!("Expected tool_use block"),
                }
            }
            _ => panic!("Expected blocks content"),
        }
    }

    #[test]
    fn message_conversion_tool_result() {
        let msg = Message::tool_result("toolu_123", r#"{"status":"success"}"#);
        let api_msgs = AnthropicProvider::to_api_messages(&[msg]);
        assert_eq!(api_msgs.len(), 1);
        assert_eq!(api_msgs[0].role, "user"); // Tool results go as user messages

        match &api_msgs[0].content {
            AnthropicContent::Blocks(blocks) => match &blocks[0] {
                ContentBlock::ToolResult { tool_use_id, .. } => {
                    assert_eq!(tool_use_id, "toolu_123");
                }
                _ => panic!("Expected tool_result block"),
            },
            _ => panic!("Expected blocks content"),
        }
    }

    #[test]
    fn parse_end_turn_response() {
        let resp: AnthropicResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "model": "claude-sonnet-4-20250514",
                "content": [{"type": "text", "text": "Done!"}],
                "usage": {"input_tokens": 10, "output_tokens": 5},
                "stop_reason": "end_turn"
            }"#,
        )
        .unwrap();

        let pr = AnthropicProvider::to_provider_response(resp);
        assert_eq!(pr.message.content, "Done!");
        assert_eq!(pr.stop_reason, StopReason::EndTurn);
        assert_eq!(pr.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn parse_tool_use_response() {
        let resp: AnthropicResponse = serde_json::from_str(
            r#"{
                "id": "msg_02",
                "model": "claude-sonnet-4-20250514",
                "content": [
                    {"type": "text", "text": "Saving the component"},
                    {"type": "tool_use", "id": "toolu_abc", "name": "create_component",
                     "input": {"name": "Button", "code": "const Button = () => null"}}
                ],
                "usage": {"input_tokens": 20, "output_tokens": 10},
                "stop_reason": "tool_use"
            }"#,
        )
        .unwrap();

        let pr = AnthropicProvider::to_provider_response(resp);
        assert_eq!(pr.stop_reason, StopReason::ToolUse);
        assert_eq!(pr.message.tool_calls.len(), 1);
        let args: serde_json::Value =
            serde_json::from_str(&pr.message.tool_calls[0].arguments).unwrap();
        assert_eq!(args["name"], "Button");
    }

    #[test]
    fn parse_unexpected_stop_reason() {
        let resp: AnthropicResponse = serde_json::from_str(
            r#"{
                "id": "msg_03",
                "model": "claude-sonnet-4-20250514",
                "content": [{"type": "text", "text": "..."}],
                "usage": {"input_tokens": 5, "output_tokens": 5},
                "stop_reason": "max_tokens"
            }"#,
        )
        .unwrap();

        let pr = AnthropicProvider::to_provider_response(resp);
        assert_eq!(pr.stop_reason, StopReason::Other("max_tokens".into()));
    }
}
