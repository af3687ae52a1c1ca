//! Filesystem-backed artifact store for CanvasForge.
//!
//! Components live under `<root>/components/<Name>.tsx`, pages under
//! `<root>/pages/<Name>.tsx`. Every mutating write runs the content
//! validation policy first and lands atomically (temp file + rename), so a
//! reader never observes partial content.

mod fs;
mod heuristics;

pub use fs::FsStore;
pub use heuristics::HeuristicValidator;
