//! `canvasforge generate` — Generate a component from the terminal.

use std::sync::Arc;

use canvasforge_agent::{ComponentAgent, ProgressEvent};
use canvasforge_config::AppConfig;
use canvasforge_core::store::ArtifactStore;
use canvasforge_providers::AnthropicProvider;
use canvasforge_store::FsStore;

pub async fn run(name: &str, prompt: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let api_key = config
        .api_key
        .ok_or("No API key configured — set ANTHROPIC_API_KEY")?;

    let provider = Arc::new(AnthropicProvider::new(api_key)?);
    let store: Arc<dyn ArtifactStore> = Arc::new(FsStore::new(&config.generated.root));
    let agent = Arc::new(
        ComponentAgent::new(provider, store, &config.model)
            .with_max_tokens(config.max_tokens)
            .with_max_iterations(config.agent.max_iterations),
    );

    let mut rx = agent.generate_stream(name, prompt);
    while let Some(event) = rx.recv().await {
        match event {
            ProgressEvent::Progress { message, .. } => println!("   {message}"),
            ProgressEvent::Success { message, data } => {
                println!("✅ {message}");
                if let Some(filepath) = data.as_ref().and_then(|d| d["filepath"].as_str()) {
                    println!("   Saved to: {filepath}");
                }
            }
            ProgressEvent::Error { message } => {
                return Err(message.into());
            }
        }
    }

    Ok(())
}
