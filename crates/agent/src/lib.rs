//! The CanvasForge agent: a bounded tool-calling loop that drives an LLM
//! until it persists a validated component artifact, plus the one-shot
//! interaction generator.

mod component_agent;
mod events;
mod interaction;
mod prompts;

pub use component_agent::{ComponentAgent, RunState};
pub use events::{EventSink, ProgressEvent};
pub use interaction::InteractionGenerator;
