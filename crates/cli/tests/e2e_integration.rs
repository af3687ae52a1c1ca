//! End-to-end integration tests for the CanvasForge pipeline.
//!
//! These tests exercise the full flow from a natural-language prompt to an
//! artifact on disk: the agent loop, tool dispatch, the filesystem store,
//! interaction generation, and page synthesis, all against a scripted
//! provider.

use std::sync::{Arc, Mutex};

use canvasforge_agent::{ComponentAgent, InteractionGenerator, ProgressEvent};
use canvasforge_core::error::ProviderError;
use canvasforge_core::layout::{LayoutDocument, LayoutItem, Position, Size};
use canvasforge_core::message::{Message, MessageToolCall};
use canvasforge_core::provider::{Provider, ProviderRequest, ProviderResponse, StopReason, Usage};
use canvasforge_core::store::{ArtifactStore, Namespace};
use canvasforge_store::FsStore;
use canvasforge_synth::PageExporter;

const COUNTER: &str = "const Counter = ({ onClick }) => (\n  <button onClick={onClick}>Count</button>\n);\n\nexport default Counter;";

// ── Mock provider ────────────────────────────────────────────────────────

/// Replays a script of responses in order.
struct ScriptedProvider {
    script: Mutex<Vec<ProviderResponse>>,
}

impl ScriptedProvider {
    fn new(mut responses: Vec<ProviderResponse>) -> Arc<Self> {
        responses.reverse();
        Arc::new(Self {
            script: Mutex::new(responses),
        })
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(
        &self,
        _request: ProviderRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        self.script
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| ProviderError::Network("script exhausted".into()))
    }
}

fn end_turn(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

fn tool_use(name: &str, args: serde_json::Value) -> ProviderResponse {
    let mut message = Message::assistant("");
    message.tool_calls = vec![MessageToolCall {
        id: "toolu_e2e".into(),
        name: name.into(),
        arguments: args.to_string(),
    }];
    ProviderResponse {
        message,
        stop_reason: StopReason::ToolUse,
        usage: None,
        model: "mock-model".into(),
    }
}

fn pipeline(
    dir: &tempfile::TempDir,
    responses: Vec<ProviderResponse>,
) -> (Arc<dyn ArtifactStore>, Arc<ComponentAgent>) {
    let store: Arc<dyn ArtifactStore> = Arc::new(FsStore::new(dir.path()));
    let agent = Arc::new(ComponentAgent::new(
        ScriptedProvider::new(responses),
        store.clone(),
        "mock-model",
    ));
    (store, agent)
}

async fn drain(
    mut rx: tokio::sync::mpsc::UnboundedReceiver<ProgressEvent>,
) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn generate_stream_writes_component_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let (store, agent) = pipeline(
        &dir,
        vec![tool_use(
            "create_component",
            serde_json::json!({"name": "Counter", "code": COUNTER}),
        )],
    );

    let events = drain(agent.generate_stream("Counter", "A counter button")).await;

    // Progress frames first, exactly one terminal success at the end.
    assert!(matches!(events[0], ProgressEvent::Progress { .. }));
    let ProgressEvent::Success { message, data } = events.last().unwrap() else {
        panic!("expected terminal success, got {:?}", events.last());
    };
    assert!(message.contains("created successfully"));
    let filepath = data.as_ref().unwrap()["filepath"].as_str().unwrap().to_string();
    assert!(filepath.ends_with("Counter.tsx"));

    // The artifact is really on disk, readable through the store.
    let artifact = store.read(Namespace::Components, "Counter").await.unwrap();
    assert_eq!(artifact.code, COUNTER);
    assert_eq!(std::fs::read_to_string(&artifact.path).unwrap(), COUNTER);

    let listed = store.list(Namespace::Components).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Counter");
}

#[tokio::test]
async fn edit_stream_rewrites_existing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let edited = COUNTER.replace("Count", "Clicks");
    let (store, agent) = pipeline(
        &dir,
        vec![tool_use(
            "update_component",
            serde_json::json!({"name": "Counter", "code": edited}),
        )],
    );
    store
        .create(Namespace::Components, "Counter", COUNTER)
        .await
        .unwrap();

    let events = drain(agent.edit_stream("Counter", "Say Clicks instead of Count")).await;

    let ProgressEvent::Success { message, .. } = events.last().unwrap() else {
        panic!("expected terminal success, got {:?}", events.last());
    };
    assert!(message.contains("updated successfully"));
    let artifact = store.read(Namespace::Components, "Counter").await.unwrap();
    assert_eq!(artifact.code, edited);
}

#[tokio::test]
async fn edit_stream_reports_missing_component_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let (_store, agent) = pipeline(&dir, vec![]);

    let events = drain(agent.edit_stream("Ghost", "Anything")).await;

    // Fails before the loop starts, so the provider script is never read.
    let ProgressEvent::Error { message } = events.last().unwrap() else {
        panic!("expected terminal error, got {:?}", events.last());
    };
    assert!(message.contains("Ghost"));
}

#[tokio::test]
async fn component_interaction_and_page_compose_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let (store, agent) = pipeline(
        &dir,
        vec![tool_use(
            "create_component",
            serde_json::json!({"name": "Counter", "code": COUNTER}),
        )],
    );
    drain(agent.generate_stream("Counter", "A counter button")).await;

    // Handler generation against a scripted JSON-only reply.
    let handler_json = "```json\n{\"handlerName\": \"handleClick\", \"code\": \"const handleClick = () => {\\n  setCount(count + 1);\\n};\", \"state\": [{\"name\": \"count\", \"type\": \"number\", \"initialValue\": 0}]}\n```";
    let interactions =
        InteractionGenerator::new(ScriptedProvider::new(vec![end_turn(handler_json)]), "mock-model");
    let mut spec = interactions
        .generate("Counter", "onClick", "Increment the count")
        .await
        .unwrap();
    assert_eq!(spec.handler_name, "handleClick");
    assert_eq!(spec.state[0].name, "count");
    spec.id = "counter-1".into();

    // Compile a page placing the component with that handler wired up.
    let layout = LayoutDocument {
        components: vec![LayoutItem {
            component_name: "Counter".into(),
            id: "counter-1".into(),
            position: Position { x: 40.0, y: 120.0 },
            size: Some(Size {
                width: Some(160.0),
                height: None,
            }),
            interactions: vec![spec],
        }],
    };
    let exporter = PageExporter::new(store.clone());
    let page = exporter.export("Home", &layout).await.unwrap();

    let source = std::fs::read_to_string(&page.path).unwrap();
    assert!(source.contains("import { useState } from 'react';"));
    assert!(source.contains("import Counter from '../components/Counter';"));
    assert!(source.contains("const [count, setCount] = useState(0);"));
    assert!(source.contains("setCount(count + 1);"));
    assert!(source.contains("onClick={handleClick}"));
    assert!(source.contains("left: 40, top: 120, width: 160"));

    // Both namespaces now hold exactly one artifact each.
    assert_eq!(store.list(Namespace::Components).await.unwrap().len(), 1);
    assert_eq!(store.list(Namespace::Pages).await.unwrap().len(), 1);
}
