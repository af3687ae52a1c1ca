//! Message and Transcript domain types.
//!
//! A `Transcript` is the ordered conversation state threaded through one
//! agent run. It is owned exclusively by that run, append-only for the
//! run's duration, and discarded when the run terminates — transcripts are
//! never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (task description, tool results, corrective prompts)
    User,
    /// The AI assistant
    Assistant,
    /// Tool execution result
    Tool,
}

/// A single message in a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Tool calls requested by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<MessageToolCall>,

    /// If this is a tool result, which tool call it responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a tool result message.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
            timestamp: Utc::now(),
        }
    }
}

/// A tool call embedded in an assistant message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageToolCall {
    /// Unique ID for this tool call (matches the provider's tool_use id)
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Arguments as a JSON string
    pub arguments: String,
}

/// The ordered, append-only message log of a single agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Unique run ID
    pub id: String,

    /// Ordered messages
    pub messages: Vec<Message>,

    /// When this transcript was seeded
    pub created_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a new empty transcript.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a transcript seeded from a single user turn.
    pub fn seeded(task: impl Into<String>) -> Self {
        let mut t = Self::new();
        t.push(Message::user(task));
        t
    }

    /// Append a message. There is no removal — the log only grows.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
