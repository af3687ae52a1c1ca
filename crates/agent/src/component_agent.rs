//! The component agent loop.
//!
//! Drives a bounded multi-turn conversation with the LLM until a validated
//! component artifact is persisted through the tool protocol. LLM responses
//! are not guaranteed to invoke tools even when instructed to, so the loop
//! must detect "described but not persisted" outcomes and re-prompt rather
//! than silently reporting success.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use canvasforge_core::error::{AgentError, StoreError};
use canvasforge_core::message::{Message, Transcript};
use canvasforge_core::provider::{Provider, ProviderRequest, StopReason};
use canvasforge_core::store::{Artifact, ArtifactStore, Namespace};
use canvasforge_core::tool::ToolCall;
use canvasforge_tools::{ToolExecutor, ToolKind};

use crate::events::{EventSink, ProgressEvent};
use crate::prompts;

const DEFAULT_MAX_ITERATIONS: u32 = 5;
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Mutable state of one agent run: the iteration counter and the
/// append-only transcript, owned exclusively by this run and discarded at
/// termination.
pub struct RunState {
    pub iteration: u32,
    pub max_iterations: u32,
    pub transcript: Transcript,
}

impl RunState {
    fn new(transcript: Transcript, max_iterations: u32) -> Self {
        Self {
            iteration: 0,
            max_iterations,
            transcript,
        }
    }

    /// Advance to the next iteration. Returns false once the bound is hit.
    fn begin_iteration(&mut self) -> bool {
        if self.iteration >= self.max_iterations {
            return false;
        }
        self.iteration += 1;
        true
    }
}

/// What a run is trying to accomplish, and how success is recognized.
enum Goal {
    /// Create a new component; success baseline is non-existence.
    Create { name: String },
    /// Edit an existing component; success baseline is the pre-loop code.
    Edit { name: String, baseline: String },
}

impl Goal {
    fn name(&self) -> &str {
        match self {
            Self::Create { name } | Self::Edit { name, .. } => name,
        }
    }

    /// The tool whose successful result on the target name defines success.
    fn target_tool(&self) -> &'static str {
        match self {
            Self::Create { .. } => ToolKind::CreateComponent.name(),
            Self::Edit { .. } => ToolKind::UpdateComponent.name(),
        }
    }

    /// End-turn fallback: the model may have used a tool in a prior turn
    /// whose effect wasn't re-confirmed, so re-read the target and compare
    /// against the baseline. This is a safety net, not the primary path.
    async fn satisfied(
        &self,
        store: &dyn ArtifactStore,
    ) -> Result<Option<Artifact>, AgentError> {
        match store.read(Namespace::Components, self.name()).await {
            Ok(artifact) => match self {
                Self::Create { .. } => Ok(Some(artifact)),
                Self::Edit { baseline, .. } if artifact.code != *baseline => Ok(Some(artifact)),
                Self::Edit { .. } => Ok(None),
            },
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// The agent loop: provider round-trips, tool dispatch, and termination.
pub struct ComponentAgent {
    provider: Arc<dyn Provider>,
    executor: ToolExecutor,
    store: Arc<dyn ArtifactStore>,
    model: String,
    max_tokens: u32,
    max_iterations: u32,
}

impl ComponentAgent {
    pub fn new(
        provider: Arc<dyn Provider>,
        store: Arc<dyn ArtifactStore>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            executor: ToolExecutor::new(store.clone()),
            store,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the iteration bound.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    /// Generate a new component from a natural-language prompt.
    pub async fn generate(
        &self,
        name: &str,
        prompt: &str,
        sink: &EventSink,
    ) -> Result<Artifact, AgentError> {
        let seed = prompts::create_component(name, prompt);
        let goal = Goal::Create { name: name.into() };
        self.run(goal, seed, sink).await
    }

    /// Edit an existing component. Fails with `NotFound` before the loop
    /// starts if the component doesn't exist.
    pub async fn edit(
        &self,
        name: &str,
        instructions: &str,
        sink: &EventSink,
    ) -> Result<Artifact, AgentError> {
        sink.progress(format!("Reading component '{name}'..."));
        let existing = self.store.read(Namespace::Components, name).await?;

        let seed = prompts::edit_component(name, instructions, &existing.code);
        let goal = Goal::Edit {
            name: name.into(),
            baseline: existing.code,
        };
        self.run(goal, seed, sink).await
    }

    /// Spawn a creation run and return its event stream. The stream ends
    /// with exactly one terminal `success` or `error` event; any fault in
    /// the run is converted into that terminal event rather than propagated.
    pub fn generate_stream(
        self: &Arc<Self>,
        name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> mpsc::UnboundedReceiver<ProgressEvent> {
        let agent = self.clone();
        let name = name.into();
        let prompt = prompt.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let sink = EventSink::new(tx);
            let outcome = agent.generate(&name, &prompt, &sink).await;
            sink.emit(terminal_event(outcome, &format!(
                "Component '{name}' created successfully!"
            )));
        });
        rx
    }

    /// Spawn an edit run and return its event stream.
    pub fn edit_stream(
        self: &Arc<Self>,
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> mpsc::UnboundedReceiver<ProgressEvent> {
        let agent = self.clone();
        let name = name.into();
        let instructions = instructions.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let sink = EventSink::new(tx);
            let outcome = agent.edit(&name, &instructions, &sink).await;
            sink.emit(terminal_event(outcome, &format!(
                "Component '{name}' updated successfully!"
            )));
        });
        rx
    }

    async fn run(
        &self,
        goal: Goal,
        seed: String,
        sink: &EventSink,
    ) -> Result<Artifact, AgentError> {
        info!(target_name = goal.name(), tool = goal.target_tool(), "Starting agent run");
        sink.progress("Starting AI agent...");

        let mut state = RunState::new(Transcript::seeded(seed), self.max_iterations);
        let tool_definitions = ToolKind::definitions();

        while state.begin_iteration() {
            sink.progress(format!(
                "Agent iteration {}/{}...",
                state.iteration, state.max_iterations
            ));
            debug!(iteration = state.iteration, "Agent loop iteration");

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: state.transcript.messages.clone(),
                max_tokens: Some(self.max_tokens),
                tools: tool_definitions.clone(),
            };
            let response = self.provider.complete(request).await?;

            match response.stop_reason {
                StopReason::ToolUse => {
                    let requested = response.message.tool_calls.clone();
                    state.transcript.push(response.message);

                    for tc in &requested {
                        sink.progress(format!("Calling tool: {}...", tc.name));

                        let call = ToolCall {
                            id: tc.id.clone(),
                            name: tc.name.clone(),
                            arguments: serde_json::from_str(&tc.arguments).unwrap_or_default(),
                        };
                        let result = self.executor.dispatch(&call).await;
                        let completed = result.success
                            && tc.name == goal.target_tool()
                            && result_names_target(&result.output, goal.name());
                        state.transcript.push(Message::tool_result(&tc.id, &result.output));

                        // The defining write succeeded — terminal. Remaining
                        // tool calls in this turn are not processed.
                        if completed {
                            let artifact =
                                self.store.read(Namespace::Components, goal.name()).await?;
                            return Ok(artifact);
                        }
                    }
                }
                StopReason::EndTurn => {
                    // The model produced no tool call this turn.
                    if let Some(artifact) = goal.satisfied(self.store.as_ref()).await? {
                        return Ok(artifact);
                    }

                    warn!(
                        iteration = state.iteration,
                        "Model ended turn without persisting; re-prompting"
                    );
                    state.transcript.push(response.message);
                    state
                        .transcript
                        .push(Message::user(prompts::demand_tool_use(goal.target_tool())));
                    sink.progress("Prompting agent to use tool...");
                }
                StopReason::Other(reason) => {
                    return Err(AgentError::UnexpectedStop(reason));
                }
            }
        }

        Err(AgentError::IterationsExhausted)
    }
}

/// Does a tool result payload name the run's target artifact?
fn result_names_target(output: &str, target: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(output)
        .map(|payload| payload["component_name"] == target)
        .unwrap_or(false)
}

/// Convert a finished run into its single terminal event.
fn terminal_event(
    outcome: Result<Artifact, AgentError>,
    success_message: &str,
) -> ProgressEvent {
    match outcome {
        Ok(artifact) => ProgressEvent::success(
            success_message,
            Some(serde_json::json!({
                "component_name": artifact.name,
                "filepath": artifact.path,
            })),
        ),
        Err(e) => ProgressEvent::error(e.to_string()),
    }
}
