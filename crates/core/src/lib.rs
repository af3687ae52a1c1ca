//! # CanvasForge Core
//!
//! Domain types, traits, and error definitions for the CanvasForge
//! component builder. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod layout;
pub mod message;
pub mod provider;
pub mod store;
pub mod tool;
pub mod validate;

// Re-export key types at crate root for ergonomics
pub use error::{AgentError, Error, ProviderError, Result, StoreError, SynthError, ToolError};
pub use layout::{InteractionSpec, LayoutDocument, LayoutItem, Position, Size, StateVar};
pub use message::{Message, Role, Transcript};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StopReason, ToolDefinition};
pub use store::{Artifact, ArtifactStore, Namespace};
pub use tool::{ToolCall, ToolResult};
pub use validate::{Validator, Verdict};
