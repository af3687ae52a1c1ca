//! `canvasforge export` — Compile a layout file into a page.

use std::path::Path;
use std::sync::Arc;

use canvasforge_config::AppConfig;
use canvasforge_store::FsStore;
use canvasforge_synth::{PageExporter, parse_layout};

pub async fn run(name: &str, layout_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let raw = std::fs::read_to_string(layout_path)
        .map_err(|e| format!("Failed to read {}: {e}", layout_path.display()))?;
    let layout = parse_layout(&raw)?;

    let exporter = PageExporter::new(Arc::new(FsStore::new(&config.generated.root)));
    let artifact = exporter.export(name, &layout).await?;

    println!("✅ Page '{}' exported", artifact.name);
    println!("   Saved to: {}", artifact.path.display());

    Ok(())
}
