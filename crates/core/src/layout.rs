//! Layout document types — the caller-supplied description of component
//! placement and bound interactions, the input to page synthesis.
//!
//! All field names are camelCase on the wire to match the canvas front end.

use serde::{Deserialize, Serialize};

/// A complete canvas layout to be compiled into one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Layout items in canvas order. Order matters: the state-variable
    /// merge is first-occurrence-wins in this order.
    #[serde(default)]
    pub components: Vec<LayoutItem>,
}

/// One placed component instance on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    /// Which component to instantiate (PascalCase artifact name)
    pub component_name: String,

    /// Canvas-assigned instance id
    #[serde(default)]
    pub id: String,

    /// Absolute position on the page
    #[serde(default)]
    pub position: Position,

    /// Optional fixed size; absent dimensions are omitted from the output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    /// Event handlers bound to this instance
    #[serde(default)]
    pub interactions: Vec<InteractionSpec>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Size {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// A generated event handler bound to a component instance.
/// Immutable after generation; layout items reference it, they don't own
/// its meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSpec {
    /// Unique interaction id
    #[serde(default)]
    pub id: String,

    /// React event prop name (e.g., "onClick")
    #[serde(rename = "type")]
    pub event_type: String,

    /// The natural-language description this handler was generated from
    #[serde(default)]
    pub description: String,

    /// Handler function name (e.g., "handleClick")
    pub handler_name: String,

    /// Complete handler function code, emitted verbatim
    pub code: String,

    /// State variables this handler requires
    #[serde(default)]
    pub state: Vec<StateVar>,
}

/// A reactive state variable declaration required by a handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateVar {
    /// Variable name (also derives the setter name)
    pub name: String,

    /// TypeScript type
    #[serde(rename = "type", default)]
    pub ty: String,

    /// Initial value, serialized as JSON into the useState call
    #[serde(default)]
    pub initial_value: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_deserializes_wire_format() {
        let doc: LayoutDocument = serde_json::from_str(
            r#"{
                "components": [{
                    "componentName": "Button",
                    "id": "b1",
                    "position": {"x": 10, "y": 20},
                    "interactions": [{
                        "id": "i1",
                        "type": "onClick",
                        "description": "Show an alert",
                        "handlerName": "handleClick",
                        "code": "const handleClick = () => {}",
                        "state": []
                    }]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.components.len(), 1);
        let item = &doc.components[0];
        assert_eq!(item.component_name, "Button");
        assert_eq!(item.position.x, 10.0);
        assert!(item.size.is_none());
        assert_eq!(item.interactions[0].event_type, "onClick");
        assert_eq!(item.interactions[0].handler_name, "handleClick");
    }

    #[test]
    fn state_var_defaults() {
        let var: StateVar = serde_json::from_str(r#"{"name": "count"}"#).unwrap();
        assert_eq!(var.name, "count");
        assert!(var.ty.is_empty());
        assert!(var.initial_value.is_null());
    }

    #[test]
    fn interaction_serializes_camel_case() {
        let spec = InteractionSpec {
            id: "i1".into(),
            event_type: "onClick".into(),
            description: "desc".into(),
            handler_name: "handleClick".into(),
            code: "const handleClick = () => {}".into(),
            state: vec![],
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains(r#""handlerName""#));
        assert!(json.contains(r#""type":"onClick""#));
    }

    #[test]
    fn empty_document_is_valid() {
        let doc: LayoutDocument = serde_json::from_str(r#"{}"#).unwrap();
        assert!(doc.components.is_empty());
    }
}
