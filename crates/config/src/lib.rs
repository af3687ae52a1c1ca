//! Configuration loading and validation for CanvasForge.
//!
//! Loads configuration from `canvasforge.toml` in the working directory
//! (override with `CANVASFORGE_CONFIG`) with environment variable overrides
//! for secrets. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `canvasforge.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anthropic API key; usually supplied via `ANTHROPIC_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used for generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Agent loop configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Where generated component and page files are written
    #[serde(default)]
    pub generated: GeneratedConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".into()
}
fn default_max_tokens() -> u32 {
    4096
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("agent", &self.agent)
            .field("generated", &self.generated)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Iteration bound for one agent run
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_max_iterations() -> u32 {
    5
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedConfig {
    /// Root directory for generated artifacts; components and pages land in
    /// subdirectories of it
    #[serde(default = "default_generated_root")]
    pub root: PathBuf,
}

fn default_generated_root() -> PathBuf {
    PathBuf::from("generated")
}

impl Default for GeneratedConfig {
    fn default() -> Self {
        Self {
            root: default_generated_root(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    5001
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (`./canvasforge.toml`, or
    /// the file named by `CANVASFORGE_CONFIG`).
    ///
    /// Environment overrides, highest priority first:
    /// - `ANTHROPIC_API_KEY` for the API key
    /// - `CANVASFORGE_MODEL` for the model
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("CANVASFORGE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("canvasforge.toml"));
        let mut config = Self::load_from(&config_path)?;

        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("CANVASFORGE_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            agent: AgentConfig::default(),
            generated: GeneratedConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
