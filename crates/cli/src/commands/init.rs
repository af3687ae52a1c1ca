//! `canvasforge init` — Write a default config file.

use canvasforge_config::AppConfig;
use std::path::Path;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = Path::new("canvasforge.toml");

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.");
        return Ok(());
    }

    std::fs::write(config_path, AppConfig::default_toml())?;
    println!("✅ Created canvasforge.toml");
    println!("\n📝 Next steps:");
    println!("   1. Set ANTHROPIC_API_KEY in your environment");
    println!("   2. Run: canvasforge serve");

    Ok(())
}
