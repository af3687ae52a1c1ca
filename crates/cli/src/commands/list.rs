//! `canvasforge list` — List generated components.

use canvasforge_config::AppConfig;
use canvasforge_core::store::{ArtifactStore, Namespace};
use canvasforge_store::FsStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = FsStore::new(&config.generated.root);

    let components = store.list(Namespace::Components).await?;
    if components.is_empty() {
        println!("No components generated yet.");
        return Ok(());
    }

    println!("{} component(s):", components.len());
    for summary in components {
        println!("  {} — {}", summary.name, summary.path.display());
    }

    Ok(())
}
