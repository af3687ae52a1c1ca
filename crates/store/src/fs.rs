//! Filesystem store implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use canvasforge_core::error::StoreError;
use canvasforge_core::store::{Artifact, ArtifactStore, ArtifactSummary, Namespace};
use canvasforge_core::validate::{Validator, Verdict};

use crate::heuristics::HeuristicValidator;

const EXTENSION: &str = "tsx";

/// Filesystem-backed [`ArtifactStore`].
pub struct FsStore {
    root: PathBuf,
    validator: Box<dyn Validator>,
}

impl FsStore {
    /// Create a store rooted at `root` with the default heuristic validator.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            validator: Box::new(HeuristicValidator),
        }
    }

    /// Substitute the content validation policy.
    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    fn artifact_path(&self, ns: Namespace, name: &str) -> PathBuf {
        self.root.join(ns.dir()).join(format!("{name}.{EXTENSION}"))
    }

    fn check_name(name: &str) -> Result<(), StoreError> {
        Self::check_contained(name)?;
        match name.chars().next() {
            Some(first) if first.is_uppercase() => Ok(()),
            _ => Err(StoreError::NameInvalid),
        }
    }

    /// A name with path separators would resolve outside the namespace
    /// directory. Checked on every operation that joins the name into a
    /// path, not just on create.
    fn check_contained(name: &str) -> Result<(), StoreError> {
        if name.contains(['/', '\\']) {
            return Err(StoreError::NameInvalid);
        }
        Ok(())
    }

    fn check_content(&self, code: &str) -> Result<(), StoreError> {
        match self.validator.validate(code) {
            Verdict::Ok => Ok(()),
            Verdict::LooksLikeProse => Err(StoreError::LooksLikeProse),
            Verdict::NotRecognizableAsCode => Err(StoreError::NotRecognizableAsCode),
        }
    }

    /// Write `code` to `path` atomically: temp file in the same directory,
    /// then rename. A concurrent reader sees either the old content or the
    /// new content, never a mix.
    async fn write_atomic(path: &Path, code: &str) -> Result<(), StoreError> {
        let dir = path
            .parent()
            .ok_or_else(|| StoreError::Io(format!("no parent directory for {}", path.display())))?;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let tmp = dir.join(format!(".{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&tmp, code)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io(e.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for FsStore {
    async fn create(
        &self,
        ns: Namespace,
        name: &str,
        code: &str,
    ) -> Result<Artifact, StoreError> {
        Self::check_name(name)?;
        self.check_content(code)?;

        let path = self.artifact_path(ns, name);
        if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }

        Self::write_atomic(&path, code).await?;
        debug!(namespace = ns.dir(), name, "Artifact created");

        Ok(Artifact {
            name: name.to_string(),
            code: code.to_string(),
            path,
        })
    }

    async fn update(
        &self,
        ns: Namespace,
        name: &str,
        code: &str,
    ) -> Result<Artifact, StoreError> {
        Self::check_contained(name)?;
        self.check_content(code)?;

        let path = self.artifact_path(ns, name);
        if !tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            return Err(StoreError::NotFound(name.to_string()));
        }

        Self::write_atomic(&path, code).await?;
        debug!(namespace = ns.dir(), name, "Artifact updated");

        Ok(Artifact {
            name: name.to_string(),
            code: code.to_string(),
            path,
        })
    }

    async fn read(&self, ns: Namespace, name: &str) -> Result<Artifact, StoreError> {
        Self::check_contained(name)?;
        let path = self.artifact_path(ns, name);
        match tokio::fs::read_to_string(&path).await {
            Ok(code) => Ok(Artifact {
                name: name.to_string(),
                code,
                path,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn list(&self, ns: Namespace) -> Result<Vec<ArtifactSummary>, StoreError> {
        let dir = self.root.join(ns.dir());
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // An untouched store has no directory yet; that's an empty list.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                summaries.push(ArtifactSummary {
                    name: name.to_string(),
                    path,
                });
            }
        }
        Ok(summaries)
    }
}
