//! Progress events emitted while an agent run executes.
//!
//! One run produces a strictly ordered, append-only event sequence ending
//! in exactly one terminal `success` or `error` event. The sink is an
//! unbounded channel: a slow or disconnected consumer delays or loses
//! delivery but never blocks the loop's progress.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A single frame of the progress stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// A step announcement, emitted before the step executes.
    Progress {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },

    /// Terminal: the run persisted its artifact.
    Success {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },

    /// Terminal: the run failed. The message is the error, verbatim.
    Error { message: String },
}

impl ProgressEvent {
    pub fn progress(message: impl Into<String>) -> Self {
        Self::Progress {
            message: message.into(),
            data: None,
        }
    }

    pub fn success(message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self::Success {
            message: message.into(),
            data,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Wire-format event name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Progress { .. } => "progress",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    /// Whether no further events may follow this one.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

/// Where a run sends its events.
///
/// A `null` sink discards everything, for callers that only want the final
/// result. Sending never fails from the loop's perspective: if the receiver
/// is gone, the remaining events are silently dropped — the side effects
/// already committed to the store are unaffected.
#[derive(Clone)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl EventSink {
    pub fn new(tx: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// A sink that discards all events.
    pub fn null() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    pub fn progress(&self, message: impl Into<String>) {
        self.emit(ProgressEvent::progress(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_matches_wire_format() {
        let event = ProgressEvent::progress("Agent iteration 1/5...");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"progress""#));
        assert!(json.contains("Agent iteration 1/5"));
        // No data field when absent.
        assert!(!json.contains("data"));
    }

    #[test]
    fn success_carries_data() {
        let event = ProgressEvent::success(
            "Component 'Button' created successfully!",
            Some(serde_json::json!({"component_name": "Button"})),
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"success""#));
        assert!(json.contains(r#""component_name":"Button""#));
    }

    #[test]
    fn terminality() {
        assert!(!ProgressEvent::progress("x").is_terminal());
        assert!(ProgressEvent::success("x", None).is_terminal());
        assert!(ProgressEvent::error("x").is_terminal());
    }

    #[test]
    fn event_type_names() {
        assert_eq!(ProgressEvent::progress("x").event_type(), "progress");
        assert_eq!(ProgressEvent::success("x", None).event_type(), "success");
        assert_eq!(ProgressEvent::error("x").event_type(), "error");
    }

    #[tokio::test]
    async fn sink_preserves_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = EventSink::new(tx);
        sink.progress("first");
        sink.progress("second");
        sink.emit(ProgressEvent::success("third", None));

        let mut messages = Vec::new();
        while let Ok(event) = rx.try_recv() {
            messages.push(serde_json::to_string(&event).unwrap());
        }
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("first"));
        assert!(messages[2].contains("third"));
    }

    #[test]
    fn null_sink_never_blocks() {
        let sink = EventSink::null();
        for _ in 0..1000 {
            sink.progress("discarded");
        }
    }

    #[tokio::test]
    async fn dropped_receiver_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = EventSink::new(tx);
        sink.progress("nobody is listening");
    }

    #[test]
    fn deserialization() {
        let event: ProgressEvent =
            serde_json::from_str(r#"{"type":"error","message":"boom"}"#).unwrap();
        match event {
            ProgressEvent::Error { message } => assert_eq!(message, "boom"),
            _ => panic!("Wrong variant"),
        }
    }
}
