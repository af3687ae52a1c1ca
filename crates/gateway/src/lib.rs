//! HTTP API gateway for CanvasForge.
//!
//! Exposes REST endpoints for component generation, editing (plain and
//! SSE-streamed), listing, interaction generation, and page export, plus a
//! standalone HTML preview page per component.
//!
//! Built on Axum for high performance async HTTP.

pub mod api;
mod preview;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tracing::info;

use canvasforge_agent::{ComponentAgent, InteractionGenerator};
use canvasforge_config::AppConfig;
use canvasforge_core::store::ArtifactStore;
use canvasforge_providers::AnthropicProvider;
use canvasforge_store::FsStore;
use canvasforge_synth::PageExporter;

/// Shared application state for the gateway.
pub struct AppState {
    pub store: Arc<dyn ArtifactStore>,
    pub agent: Arc<ComponentAgent>,
    pub interactions: InteractionGenerator,
    pub exporter: PageExporter,
}

pub type SharedState = Arc<AppState>;

/// Build the Axum router with all gateway routes.
///
/// CORS is permissive: the canvas front end runs on its own origin.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .nest("/api", api::api_router())
        // The canvas embeds previews in iframes at the bare path.
        .route("/preview/{name}", get(preview::preview_component))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the shared state from configuration.
pub fn build_state(config: &AppConfig) -> Result<SharedState, Box<dyn std::error::Error>> {
    let api_key = config
        .api_key
        .clone()
        .ok_or("No API key configured — set ANTHROPIC_API_KEY")?;
    let provider = Arc::new(AnthropicProvider::new(api_key)?);

    let store: Arc<dyn ArtifactStore> = Arc::new(FsStore::new(&config.generated.root));
    let agent = Arc::new(
        ComponentAgent::new(provider.clone(), store.clone(), &config.model)
            .with_max_tokens(config.max_tokens)
            .with_max_iterations(config.agent.max_iterations),
    );
    let interactions = InteractionGenerator::new(provider, &config.model);
    let exporter = PageExporter::new(store.clone());

    Ok(Arc::new(AppState {
        store,
        agent,
        interactions,
        exporter,
    }))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "CanvasForge gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}
