//! The closed set of tool kinds and their wire schemas.

use canvasforge_core::provider::ToolDefinition;

/// Every capability the LLM may invoke. Adding a tool means adding a
/// variant here and an arm in the executor — the compiler finds the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    CreateComponent,
    UpdateComponent,
    ReadComponent,
    ListComponents,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::CreateComponent,
        ToolKind::UpdateComponent,
        ToolKind::ReadComponent,
        ToolKind::ListComponents,
    ];

    /// Resolve a wire-format tool name. `None` means `UnknownTool`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "create_component" => Some(Self::CreateComponent),
            "update_component" => Some(Self::UpdateComponent),
            "read_component" => Some(Self::ReadComponent),
            "list_components" => Some(Self::ListComponents),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateComponent => "create_component",
            Self::UpdateComponent => "update_component",
            Self::ReadComponent => "read_component",
            Self::ListComponents => "list_components",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::CreateComponent => {
                "Create a new React TypeScript component file with Tailwind CSS styling. \
                 The component should be a functional component with proper TypeScript \
                 types and Tailwind classes for styling."
            }
            Self::UpdateComponent => "Update an existing React component file with new code.",
            Self::ReadComponent => "Read the code of an existing React component.",
            Self::ListComponents => {
                "List all available React components that have been generated."
            }
        }
    }

    fn parameters_schema(&self) -> serde_json::Value {
        match self {
            Self::CreateComponent => serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Component name in PascalCase (e.g., 'Button', 'PricingCard', 'HeroSection')"
                    },
                    "code": {
                        "type": "string",
                        "description": "The complete React TypeScript component code including imports, types, and export"
                    }
                },
                "required": ["name", "code"]
            }),
            Self::UpdateComponent => serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name of the component to update"
                    },
                    "code": {
                        "type": "string",
                        "description": "The updated React component code"
                    }
                },
                "required": ["name", "code"]
            }),
            Self::ReadComponent => serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name of the component to read"
                    }
                },
                "required": ["name"]
            }),
            Self::ListComponents => serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    /// Convert this kind into a ToolDefinition for sending to the LLM.
    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }

    /// The full, versioned schema handed to the LLM.
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.iter().map(|k| k.to_definition()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        assert_eq!(ToolKind::from_name("delete_component"), None);
        assert_eq!(ToolKind::from_name(""), None);
    }

    #[test]
    fn definitions_cover_all_kinds() {
        let defs = ToolKind::definitions();
        assert_eq!(defs.len(), 4);
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert!(names.contains(&"create_component"));
        assert!(names.contains(&"list_components"));
    }

    #[test]
    fn mutating_tools_require_name_and_code() {
        for kind in [ToolKind::CreateComponent, ToolKind::UpdateComponent] {
            let def = kind.to_definition();
            assert_eq!(def.parameters["required"], serde_json::json!(["name", "code"]));
        }
    }

    #[test]
    fn list_tool_takes_no_arguments() {
        let def = ToolKind::ListComponents.to_definition();
        assert_eq!(def.parameters["required"], serde_json::json!([]));
    }
}
