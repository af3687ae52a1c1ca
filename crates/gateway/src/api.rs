//! REST + SSE handlers.
//!
//! Every error leaves the gateway as the JSON envelope
//! `{"status": "error", "message": "..."}` with a matching status code.
//! SSE streams carry [`ProgressEvent`] frames named by their event type and
//! end at the terminal event.

use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event as SseEvent, Sse},
    routing::{get, post},
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::info;

use canvasforge_core::error::{AgentError, StoreError, SynthError};
use canvasforge_core::layout::{InteractionSpec, LayoutDocument};
use canvasforge_core::store::{Artifact, Namespace};
use canvasforge_agent::EventSink;

use crate::SharedState;

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .route("/components/generate", post(generate_component))
        .route("/components/edit", post(edit_component))
        .route("/components/edit/stream", post(edit_component_stream))
        .route("/components", get(list_components))
        .route("/components/{name}", get(get_component))
        .route("/interactions/generate", post(generate_interaction))
        .route("/pages/export", post(export_page))
}

// ── Wire types ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            status: "error",
            message: message.into(),
        }),
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    component_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditRequest {
    #[serde(default)]
    component_name: String,
    #[serde(default)]
    edit_description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InteractionRequest {
    #[serde(default)]
    component_id: String,
    #[serde(default)]
    component_name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_event_type")]
    event_type: String,
}

fn default_event_type() -> String {
    "onClick".into()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportPageRequest {
    #[serde(default)]
    page_name: String,
    layout: Option<LayoutDocument>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentResponse {
    status: &'static str,
    component_name: String,
    filepath: String,
    code: String,
    message: String,
}

impl ComponentResponse {
    fn from_artifact(artifact: Artifact, message: String) -> Self {
        Self {
            status: "success",
            component_name: artifact.name,
            filepath: artifact.path.display().to_string(),
            code: artifact.code,
            message,
        }
    }
}

#[derive(Serialize)]
struct ListResponse {
    status: &'static str,
    count: usize,
    components: Vec<ComponentEntry>,
}

#[derive(Serialize)]
struct ComponentEntry {
    name: String,
    filepath: String,
}

#[derive(Serialize)]
struct InteractionResponse {
    status: &'static str,
    interaction: InteractionSpec,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportPageResponse {
    status: &'static str,
    page_name: String,
    filepath: String,
    code: String,
    message: String,
}

// ── Error mapping ─────────────────────────────────────────────────────────

fn store_status(e: &StoreError) -> StatusCode {
    match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
        StoreError::NameInvalid
        | StoreError::LooksLikeProse
        | StoreError::NotRecognizableAsCode => StatusCode::BAD_REQUEST,
        StoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn agent_error(e: AgentError) -> ApiError {
    let status = match &e {
        AgentError::Store(store) => store_status(store),
        AgentError::Provider(_) => StatusCode::BAD_GATEWAY,
        AgentError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
        AgentError::UnexpectedStop(_) | AgentError::IterationsExhausted => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_body(status, e.to_string())
}

fn synth_error(e: SynthError) -> ApiError {
    let status = match &e {
        SynthError::InvalidLayout(_) => StatusCode::BAD_REQUEST,
        SynthError::Store(store) => store_status(store),
    };
    error_body(status, e.to_string())
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "CanvasForge API is running"
    }))
}

async fn generate_component(
    State(state): State<SharedState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<ComponentResponse>, ApiError> {
    if payload.prompt.is_empty() || payload.component_name.is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Both 'prompt' and 'componentName' are required",
        ));
    }
    info!(component_name = %payload.component_name, "generate request");

    let artifact = state
        .agent
        .generate(&payload.component_name, &payload.prompt, &EventSink::null())
        .await
        .map_err(agent_error)?;

    let message = format!("Component '{}' created successfully", artifact.name);
    Ok(Json(ComponentResponse::from_artifact(artifact, message)))
}

async fn edit_component(
    State(state): State<SharedState>,
    Json(payload): Json<EditRequest>,
) -> Result<Json<ComponentResponse>, ApiError> {
    if payload.component_name.is_empty() || payload.edit_description.is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "'componentName' and 'editDescription' are required",
        ));
    }
    info!(component_name = %payload.component_name, "edit request");

    let artifact = state
        .agent
        .edit(
            &payload.component_name,
            &payload.edit_description,
            &EventSink::null(),
        )
        .await
        .map_err(agent_error)?;

    let message = format!("Component '{}' updated successfully", artifact.name);
    Ok(Json(ComponentResponse::from_artifact(artifact, message)))
}

async fn edit_component_stream(
    State(state): State<SharedState>,
    Json(payload): Json<EditRequest>,
) -> Result<Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>>, ApiError> {
    if payload.component_name.is_empty() || payload.edit_description.is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "'componentName' and 'editDescription' are required",
        ));
    }
    info!(component_name = %payload.component_name, "edit stream request");

    let rx = state
        .agent
        .edit_stream(payload.component_name, payload.edit_description);

    let stream = UnboundedReceiverStream::new(rx).map(|event| {
        let event_type = event.event_type().to_string();
        let data = serde_json::to_string(&event).unwrap_or_default();
        Ok(SseEvent::default().event(event_type).data(data))
    });

    Ok(Sse::new(stream))
}

async fn list_components(
    State(state): State<SharedState>,
) -> Result<Json<ListResponse>, ApiError> {
    let summaries = state
        .store
        .list(Namespace::Components)
        .await
        .map_err(|e| error_body(store_status(&e), e.to_string()))?;

    let components: Vec<ComponentEntry> = summaries
        .into_iter()
        .map(|s| ComponentEntry {
            name: s.name,
            filepath: s.path.display().to_string(),
        })
        .collect();

    Ok(Json(ListResponse {
        status: "success",
        count: components.len(),
        components,
    }))
}

async fn get_component(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<ComponentResponse>, ApiError> {
    let artifact = state
        .store
        .read(Namespace::Components, &name)
        .await
        .map_err(|e| error_body(store_status(&e), e.to_string()))?;

    let message = format!("Component '{}' read successfully", artifact.name);
    Ok(Json(ComponentResponse::from_artifact(artifact, message)))
}

async fn generate_interaction(
    State(state): State<SharedState>,
    Json(payload): Json<InteractionRequest>,
) -> Result<Json<InteractionResponse>, ApiError> {
    if payload.component_id.is_empty()
        || payload.component_name.is_empty()
        || payload.description.is_empty()
    {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "'componentId', 'componentName', and 'description' are required",
        ));
    }
    info!(
        component_name = %payload.component_name,
        event_type = %payload.event_type,
        "interaction request"
    );

    let interaction = state
        .interactions
        .generate(
            &payload.component_name,
            &payload.event_type,
            &payload.description,
        )
        .await
        .map_err(agent_error)?;

    Ok(Json(InteractionResponse {
        status: "success",
        interaction,
    }))
}

async fn export_page(
    State(state): State<SharedState>,
    Json(payload): Json<ExportPageRequest>,
) -> Result<Json<ExportPageResponse>, ApiError> {
    let Some(layout) = payload.layout else {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Both 'pageName' and 'layout' are required",
        ));
    };
    if payload.page_name.is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Both 'pageName' and 'layout' are required",
        ));
    }
    info!(page_name = %payload.page_name, "export page request");

    let artifact = state
        .exporter
        .export(&payload.page_name, &layout)
        .await
        .map_err(synth_error)?;

    let message = format!("Page '{}' created successfully", artifact.name);
    Ok(Json(ExportPageResponse {
        status: "success",
        filepath: artifact.path.display().to_string(),
        page_name: artifact.name,
        code: artifact.code,
        message,
    }))
}
