//! ArtifactStore trait — the abstraction over artifact persistence.
//!
//! An artifact is a named unit of generated source text: a component or a
//! page. Names are case-sensitive PascalCase and unique within their
//! namespace. Artifacts are created once, replaced in place by updates, and
//! never deleted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::StoreError;

/// The two artifact namespaces. Components are written by the agent's tool
/// protocol; pages are written by the layout synthesis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Components,
    Pages,
}

impl Namespace {
    /// Directory name under the store root.
    pub fn dir(&self) -> &'static str {
        match self {
            Self::Components => "components",
            Self::Pages => "pages",
        }
    }
}

/// A named unit of generated source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// PascalCase name — the artifact's identity within its namespace
    pub name: String,

    /// The full source text
    pub code: String,

    /// Where the artifact is persisted
    pub path: PathBuf,
}

/// A summary entry returned by `list` (name and location, no content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub name: String,
    pub path: PathBuf,
}

/// The store contract.
///
/// Writes are atomic from the caller's perspective: either the whole new
/// content is visible or the previous content is. Concurrent writes to
/// different names never interfere; a write race on the same name is
/// last-writer-wins with no interleaved content.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Create a new artifact. Fails with `NameInvalid`, `AlreadyExists`,
    /// or a content-validation error.
    async fn create(
        &self,
        ns: Namespace,
        name: &str,
        code: &str,
    ) -> std::result::Result<Artifact, StoreError>;

    /// Replace an existing artifact's content. Fails with `NotFound` or a
    /// content-validation error; never creates the artifact.
    async fn update(
        &self,
        ns: Namespace,
        name: &str,
        code: &str,
    ) -> std::result::Result<Artifact, StoreError>;

    /// Read an artifact. Pure lookup.
    async fn read(
        &self,
        ns: Namespace,
        name: &str,
    ) -> std::result::Result<Artifact, StoreError>;

    /// List artifact summaries. Order is unspecified — callers must not
    /// depend on it.
    async fn list(
        &self,
        ns: Namespace,
    ) -> std::result::Result<Vec<ArtifactSummary>, StoreError>;
}
