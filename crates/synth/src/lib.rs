//! Deterministic layout-to-code synthesis.
//!
//! Compiles a [`LayoutDocument`] into React page source: component imports,
//! a merged `useState` table, handler functions, and an absolutely
//! positioned render tree. No LLM is involved; the same layout always
//! produces the same source.

mod codegen;
mod export;

pub use codegen::{parse_layout, synthesize};
pub use export::PageExporter;
