//! Persisting synthesized pages through the artifact store.

use std::sync::Arc;

use tracing::info;

use canvasforge_core::error::{StoreError, SynthError};
use canvasforge_core::layout::LayoutDocument;
use canvasforge_core::store::{Artifact, ArtifactStore, Namespace};

use crate::codegen::synthesize;

/// Writes synthesized pages into the store's pages namespace.
///
/// Exporting the same page again overwrites it; a page export is the
/// compilation of the current layout, not an append.
pub struct PageExporter {
    store: Arc<dyn ArtifactStore>,
}

impl PageExporter {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    pub async fn export(
        &self,
        page_name: &str,
        layout: &LayoutDocument,
    ) -> Result<Artifact, SynthError> {
        let code = synthesize(page_name, layout);
        info!(page_name, components = layout.components.len(), "Exporting page");

        match self.store.create(Namespace::Pages, page_name, &code).await {
            Ok(artifact) => Ok(artifact),
            Err(StoreError::AlreadyExists(_)) => {
                Ok(self.store.update(Namespace::Pages, page_name, &code).await?)
            }
            Err(e) => Err(e.into()),
        }
    }
}
