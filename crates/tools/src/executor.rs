//! Tool dispatch against the artifact store.

use std::sync::Arc;

use tracing::{debug, warn};

use canvasforge_core::store::{ArtifactStore, Namespace};
use canvasforge_core::tool::{ToolCall, ToolResult};

use crate::kind::ToolKind;

/// Executes tool calls requested by the LLM.
///
/// `dispatch` never returns an error: unknown tools, bad arguments, and
/// store failures all become `success=false` results whose JSON payload is
/// fed back into the transcript so the model can recover within the run.
pub struct ToolExecutor {
    store: Arc<dyn ArtifactStore>,
}

impl ToolExecutor {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// Execute one tool call and return its result.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let Some(kind) = ToolKind::from_name(&call.name) else {
            warn!(tool = %call.name, "Unknown tool requested");
            return ToolResult::error(&call.id, format!("Unknown tool: {}", call.name));
        };

        debug!(tool = kind.name(), call_id = %call.id, "Dispatching tool call");

        match kind {
            ToolKind::CreateComponent => self.create(call).await,
            ToolKind::UpdateComponent => self.update(call).await,
            ToolKind::ReadComponent => self.read(call).await,
            ToolKind::ListComponents => self.list(call).await,
        }
    }

    async fn create(&self, call: &ToolCall) -> ToolResult {
        let (name, code) = match named_code_args(call) {
            Ok(args) => args,
            Err(result) => return result,
        };

        match self.store.create(Namespace::Components, name, code).await {
            Ok(artifact) => ToolResult::ok(
                &call.id,
                &serde_json::json!({
                    "status": "success",
                    "filepath": artifact.path,
                    "component_name": artifact.name,
                    "message": format!("Component '{}' created successfully", artifact.name),
                }),
            ),
            Err(e) => ToolResult::error(&call.id, e.to_string()),
        }
    }

    async fn update(&self, call: &ToolCall) -> ToolResult {
        let (name, code) = match named_code_args(call) {
            Ok(args) => args,
            Err(result) => return result,
        };

        match self.store.update(Namespace::Components, name, code).await {
            Ok(artifact) => ToolResult::ok(
                &call.id,
                &serde_json::json!({
                    "status": "success",
                    "filepath": artifact.path,
                    "component_name": artifact.name,
                    "message": format!("Component '{}' updated successfully", artifact.name),
                }),
            ),
            Err(e) => ToolResult::error(&call.id, e.to_string()),
        }
    }

    async fn read(&self, call: &ToolCall) -> ToolResult {
        let Some(name) = call.arguments["name"].as_str() else {
            return ToolResult::error(&call.id, "Missing 'name' argument");
        };

        match self.store.read(Namespace::Components, name).await {
            Ok(artifact) => ToolResult::ok(
                &call.id,
                &serde_json::json!({
                    "status": "success",
                    "component_name": artifact.name,
                    "content": artifact.code,
                    "filepath": artifact.path,
                }),
            ),
            Err(e) => ToolResult::error(&call.id, e.to_string()),
        }
    }

    async fn list(&self, call: &ToolCall) -> ToolResult {
        match self.store.list(Namespace::Components).await {
            Ok(summaries) => {
                let components: Vec<serde_json::Value> = summaries
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "name": s.name,
                            "filepath": s.path,
                        })
                    })
                    .collect();
                ToolResult::ok(
                    &call.id,
                    &serde_json::json!({
                        "status": "success",
                        "count": components.len(),
                        "components": components,
                    }),
                )
            }
            Err(e) => ToolResult::error(&call.id, e.to_string()),
        }
    }
}

/// Extract the `name`/`code` pair required by the mutating tools.
fn named_code_args(call: &ToolCall) -> Result<(&str, &str), ToolResult> {
    let Some(name) = call.arguments["name"].as_str() else {
        return Err(ToolResult::error(&call.id, "Missing 'name' argument"));
    };
    let Some(code) = call.arguments["code"].as_str() else {
        return Err(ToolResult::error(&call.id, "Missing 'code' argument"));
    };
    Ok((name, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvasforge_store::FsStore;

    const BUTTON: &str = "const Button = () => <button>Click</button>";

    fn executor() -> (tempfile::TempDir, ToolExecutor) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FsStore::new(dir.path()));
        (dir, ToolExecutor::new(store))
    }

    fn call(name: &str, arguments: serde_json::Value) -> ToolCall {
        ToolCall {
            id: "toolu_test".into(),
            name: name.into(),
            arguments,
        }
    }

    #[tokio::test]
    async fn create_component_succeeds() {
        let (_dir, exec) = executor();
        let result = exec
            .dispatch(&call(
                "create_component",
                serde_json::json!({"name": "Button", "code": BUTTON}),
            ))
            .await;
        assert!(result.success);
        let payload: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(payload["status"], "success");
        assert_eq!(payload["component_name"], "Button");
    }

    #[tokio::test]
    async fn unknown_tool_is_error_result_not_panic() {
        let (_dir, exec) = executor();
        let result = exec
            .dispatch(&call("frobnicate", serde_json::json!({})))
            .await;
        assert!(!result.success);
        assert!(result.output.contains("Unknown tool: frobnicate"));
        assert_eq!(result.call_id, "toolu_test");
    }

    #[tokio::test]
    async fn prose_code_is_surfaced_as_tool_error() {
        let (_dir, exec) = executor();
        let result = exec
            .dispatch(&call(
                "create_component",
                serde_json::json!({"name": "Button", "code": "Here is the button component"}),
            ))
            .await;
        assert!(!result.success);
        let payload: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(payload["status"], "error");
        assert!(payload["message"].as_str().unwrap().contains("actual component code"));
    }

    #[tokio::test]
    async fn missing_code_argument() {
        let (_dir, exec) = executor();
        let result = exec
            .dispatch(&call(
                "create_component",
                serde_json::json!({"name": "Button"}),
            ))
            .await;
        assert!(!result.success);
        assert!(result.output.contains("Missing 'code' argument"));
    }

    #[tokio::test]
    async fn read_roundtrip_through_tools() {
        let (_dir, exec) = executor();
        exec.dispatch(&call(
            "create_component",
            serde_json::json!({"name": "Button", "code": BUTTON}),
        ))
        .await;

        let result = exec
            .dispatch(&call("read_component", serde_json::json!({"name": "Button"})))
            .await;
        assert!(result.success);
        let payload: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(payload["content"], BUTTON);
    }

    #[tokio::test]
    async fn read_missing_component() {
        let (_dir, exec) = executor();
        let result = exec
            .dispatch(&call("read_component", serde_json::json!({"name": "Ghost"})))
            .await;
        assert!(!result.success);
        assert!(result.output.contains("not found"));
    }

    #[tokio::test]
    async fn list_reports_count() {
        let (_dir, exec) = executor();
        exec.dispatch(&call(
            "create_component",
            serde_json::json!({"name": "Button", "code": BUTTON}),
        ))
        .await;
        exec.dispatch(&call(
            "create_component",
            serde_json::json!({"name": "Card", "code": "const Card = () => <div/>"}),
        ))
        .await;

        let result = exec
            .dispatch(&call("list_components", serde_json::json!({})))
            .await;
        assert!(result.success);
        let payload: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(payload["count"], 2);
    }

    #[tokio::test]
    async fn update_missing_component_is_error_result() {
        let (_dir, exec) = executor();
        let result = exec
            .dispatch(&call(
                "update_component",
                serde_json::json!({"name": "Ghost", "code": BUTTON}),
            ))
            .await;
        assert!(!result.success);
        assert!(result.output.contains("not found"));
    }
}
