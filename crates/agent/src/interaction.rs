//! One-shot interaction (event handler) generation.
//!
//! Unlike the component agent this is a single provider round-trip with no
//! tools: the model is asked to answer with a bare JSON object describing
//! the handler. Models wrap JSON in markdown fences often enough that the
//! response is unfenced before parsing.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use canvasforge_core::error::AgentError;
use canvasforge_core::layout::{InteractionSpec, StateVar};
use canvasforge_core::message::{Message, Transcript};
use canvasforge_core::provider::{Provider, ProviderRequest};

use crate::prompts;

const DEFAULT_MAX_TOKENS: u32 = 1024;
const EXCERPT_LIMIT: usize = 200;

/// The JSON shape the model is instructed to answer with.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HandlerPayload {
    handler_name: String,
    code: String,
    #[serde(default)]
    state: Vec<StateVar>,
}

/// Generates a React event handler from a natural-language description.
pub struct InteractionGenerator {
    provider: Arc<dyn Provider>,
    model: String,
    max_tokens: u32,
}

impl InteractionGenerator {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    /// Generate a handler for `event_type` on `component_name`. The returned
    /// spec carries a fresh id and echoes the inputs; it is immutable from
    /// here on.
    pub async fn generate(
        &self,
        component_name: &str,
        event_type: &str,
        description: &str,
    ) -> Result<InteractionSpec, AgentError> {
        info!(component_name, event_type, "Generating interaction handler");

        let prompt = prompts::generate_interaction(component_name, event_type, description);
        let transcript = Transcript::seeded(prompt);
        let response = self
            .provider
            .complete(ProviderRequest {
                model: self.model.clone(),
                messages: transcript.messages,
                max_tokens: Some(self.max_tokens),
                tools: Vec::new(),
            })
            .await?;

        let raw = response.message.content;
        let body = strip_fences(&raw);
        debug!(len = body.len(), "Parsing handler payload");

        let payload: HandlerPayload =
            serde_json::from_str(body).map_err(|e| AgentError::MalformedResponse {
                reason: e.to_string(),
                excerpt: excerpt(&raw),
            })?;

        Ok(InteractionSpec {
            id: Uuid::new_v4().to_string(),
            event_type: event_type.to_string(),
            description: description.to_string(),
            handler_name: payload.handler_name,
            code: payload.code,
            state: payload.state,
        })
    }
}

/// Remove a surrounding markdown code fence, if present.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "typescript", ...) on the opening line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn excerpt(raw: &str) -> String {
    let mut s: String = raw.chars().take(EXCERPT_LIMIT).collect();
    if raw.chars().count() > EXCERPT_LIMIT {
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvasforge_core::error::ProviderError;
    use canvasforge_core::provider::{ProviderResponse, StopReason};

    struct CannedProvider {
        reply: String,
    }

    #[async_trait::async_trait]
    impl Provider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse {
                message: Message::assistant(&self.reply),
                stop_reason: StopReason::EndTurn,
                usage: None,
                model: "mock-model".into(),
            })
        }
    }

    fn generator(reply: &str) -> InteractionGenerator {
        InteractionGenerator::new(
            Arc::new(CannedProvider {
                reply: reply.into(),
            }),
            "mock-model",
        )
    }

    const HANDLER_JSON: &str = r#"{
        "handlerName": "handleClick",
        "code": "const handleClick = () => {\n  setClickCount(clickCount + 1);\n}",
        "state": [{"name": "clickCount", "type": "number", "initialValue": 0}]
    }"#;

    #[tokio::test]
    async fn parses_bare_json_reply() {
        let spec = generator(HANDLER_JSON)
            .generate("Button", "onClick", "Count button clicks")
            .await
            .unwrap();
        assert_eq!(spec.handler_name, "handleClick");
        assert_eq!(spec.event_type, "onClick");
        assert_eq!(spec.description, "Count button clicks");
        assert_eq!(spec.state.len(), 1);
        assert_eq!(spec.state[0].name, "clickCount");
        assert!(!spec.id.is_empty());
    }

    #[tokio::test]
    async fn strips_markdown_fences() {
        let fenced = format!("```json\n{HANDLER_JSON}\n```");
        let spec = generator(&fenced)
            .generate("Button", "onClick", "Count button clicks")
            .await
            .unwrap();
        assert_eq!(spec.handler_name, "handleClick");
    }

    #[tokio::test]
    async fn missing_state_defaults_to_empty() {
        let spec = generator(
            r#"{"handlerName": "handleHover", "code": "const handleHover = () => {}"}"#,
        )
        .generate("Card", "onMouseEnter", "Highlight on hover")
        .await
        .unwrap();
        assert!(spec.state.is_empty());
    }

    #[tokio::test]
    async fn prose_reply_is_malformed() {
        let err = generator("Sure! Here's a handler you could use: handleClick.")
            .generate("Button", "onClick", "Show an alert")
            .await
            .unwrap_err();
        match err {
            AgentError::MalformedResponse { excerpt, .. } => {
                assert!(excerpt.starts_with("Sure!"));
            }
            other => panic!("Expected MalformedResponse, got {other}"),
        }
    }

    #[tokio::test]
    async fn long_bad_reply_is_truncated_in_error() {
        let long = "x".repeat(500);
        let err = generator(&long)
            .generate("Button", "onClick", "Show an alert")
            .await
            .unwrap_err();
        match err {
            AgentError::MalformedResponse { excerpt, .. } => {
                assert!(excerpt.len() <= EXCERPT_LIMIT + 3);
                assert!(excerpt.ends_with("..."));
            }
            other => panic!("Expected MalformedResponse, got {other}"),
        }
    }

    #[test]
    fn fence_stripping_handles_variants() {
        assert_eq!(strip_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fences("  ```json\n{\"a\":1}\n```  "), "{\"a\":1}");
    }
}
