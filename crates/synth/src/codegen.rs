//! Page source generation.

use std::collections::BTreeSet;

use canvasforge_core::error::SynthError;
use canvasforge_core::layout::{LayoutDocument, LayoutItem};

/// Parse raw layout JSON. Malformed input is rejected before any synthesis
/// happens.
pub fn parse_layout(raw: &str) -> Result<LayoutDocument, SynthError> {
    serde_json::from_str(raw).map_err(|e| SynthError::InvalidLayout(e.to_string()))
}

/// Compile a layout into complete React page source. Pure and
/// deterministic: the output depends only on the inputs.
pub fn synthesize(page_name: &str, layout: &LayoutDocument) -> String {
    let mut lines: Vec<String> = vec![
        "import { useState } from 'react';".into(),
        String::new(),
        "// Component imports - these are generated components from /generated/components/"
            .into(),
        "// Make sure the component files exist in the ../components/ directory".into(),
    ];

    // Imports: one per distinct component, sorted.
    let imports: BTreeSet<&str> = layout
        .components
        .iter()
        .map(|item| item.component_name.as_str())
        .collect();
    for name in &imports {
        lines.push(format!("import {name} from '../components/{name}';"));
    }

    lines.push(String::new());
    lines.push(format!("export default function {page_name}() {{"));

    // State table: walk interactions in layout order, first occurrence of a
    // variable name wins.
    let mut seen = BTreeSet::new();
    let mut state_lines = Vec::new();
    for item in &layout.components {
        for interaction in &item.interactions {
            for var in &interaction.state {
                if !seen.insert(var.name.as_str()) {
                    continue;
                }
                state_lines.push(format!(
                    "  const [{}, {}] = useState({});",
                    var.name,
                    setter_name(&var.name),
                    var.initial_value
                ));
            }
        }
    }
    if !state_lines.is_empty() {
        lines.push("  // State management".into());
        lines.append(&mut state_lines);
        lines.push(String::new());
    }

    // Handler functions, grouped per layout item, code verbatim at two-space
    // indent. Items without an id get no handlers wired.
    let has_handlers = layout
        .components
        .iter()
        .any(|item| !item.id.is_empty() && !item.interactions.is_empty());
    if has_handlers {
        lines.push("  // Event handlers".into());
        for item in &layout.components {
            if item.id.is_empty() {
                continue;
            }
            for interaction in &item.interactions {
                for code_line in interaction.code.lines() {
                    lines.push(format!("  {code_line}"));
                }
            }
        }
        lines.push(String::new());
    }

    lines.push("  return (".into());
    lines.push("    <div className=\"relative w-full min-h-screen bg-gray-50\">".into());
    for item in &layout.components {
        render_item(&mut lines, item);
    }
    lines.push("    </div>".into());
    lines.push("  );".into());
    lines.push("}".into());
    lines.push(String::new());

    lines.join("\n")
}

fn render_item(lines: &mut Vec<String>, item: &LayoutItem) {
    let mut style = vec![
        format!("left: {}", fmt_num(item.position.x)),
        format!("top: {}", fmt_num(item.position.y)),
    ];
    if let Some(size) = item.size {
        if let Some(width) = size.width.filter(|w| *w != 0.0) {
            style.push(format!("width: {}", fmt_num(width)));
        }
        if let Some(height) = size.height.filter(|h| *h != 0.0) {
            style.push(format!("height: {}", fmt_num(height)));
        }
    }
    let style = style.join(", ");

    let mut props = String::new();
    if !item.id.is_empty() {
        for interaction in &item.interactions {
            props.push_str(&format!(
                " {}={{{}}}",
                interaction.event_type, interaction.handler_name
            ));
        }
    }

    lines.push(format!(
        "      <div className=\"absolute\" style={{{{ {style} }}}}>"
    ));
    lines.push(format!("        <{}{props} />", item.component_name));
    lines.push("      </div>".into());
}

/// `count` -> `setCount`.
fn setter_name(var: &str) -> String {
    let mut chars = var.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".into(),
    }
}

/// Render a coordinate without a trailing `.0` for whole numbers.
fn fmt_num(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
