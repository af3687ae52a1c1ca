//! Error types for the CanvasForge domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

/// The top-level error type for all CanvasForge operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Agent errors ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Synthesis errors ---
    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised by the component store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Component name must start with an uppercase letter")]
    NameInvalid,

    #[error("Component '{0}' already exists. Use update_component to modify it.")]
    AlreadyExists(String),

    #[error("Component '{0}' not found")]
    NotFound(String),

    #[error(
        "The 'code' parameter should contain only the actual component code, \
         not explanatory text. Please provide just the TypeScript/React code."
    )]
    LooksLikeProse,

    #[error(
        "The code doesn't appear to contain a valid React component. \
         Please provide complete component code."
    )]
    NotRecognizableAsCode,

    #[error("Storage I/O failed: {0}")]
    Io(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Terminal failures of a single agent run.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Agent stopped unexpectedly: {0}")]
    UnexpectedStop(String),

    #[error("Run exceeded maximum iterations")]
    IterationsExhausted,

    #[error("Failed to parse AI response: {reason}. Response was: {excerpt}")]
    MalformedResponse { reason: String, excerpt: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Invalid layout data JSON: {0}")]
    InvalidLayout(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_name() {
        let err = Error::Store(StoreError::AlreadyExists("Button".into()));
        assert!(err.to_string().contains("Button"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn prose_error_guides_the_model() {
        let err = StoreError::LooksLikeProse;
        assert!(err.to_string().contains("TypeScript/React code"));
    }

    #[test]
    fn agent_error_wraps_store_error() {
        let err = AgentError::from(StoreError::NotFound("Card".into()));
        assert!(err.to_string().contains("Card"));
    }

    #[test]
    fn provider_error_displays_status() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
    }
}
