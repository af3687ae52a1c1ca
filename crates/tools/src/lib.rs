//! The fixed tool protocol the agent advertises to the LLM.
//!
//! The tool set is small and fixed by the schema sent to the model, so
//! dispatch is a closed tagged-variant match over [`ToolKind`] rather than
//! an open registry. All tool execution is synchronous from the loop's
//! point of view and side-effecting only through the artifact store.

mod kind;
mod executor;

pub use executor::ToolExecutor;
pub use kind::ToolKind;
