//! LLM provider implementations for CanvasForge.
//!
//! The agent loop talks to the [`canvasforge_core::Provider`] trait;
//! this crate supplies the concrete Anthropic backend.

mod anthropic;

pub use anthropic::AnthropicProvider;
