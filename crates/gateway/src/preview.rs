//! Standalone component preview page.
//!
//! The canvas front end renders each generated component inside an iframe
//! pointed at `/preview/{name}`. The served shell loads CDN React, Babel,
//! and Tailwind, evaluates the stored component as a plain script, and
//! posts `COMPONENT_LOADED` / `COMPONENT_ERROR` messages to the parent
//! window. Stored components are module-form TSX, so top-level `import`
//! lines are blanked and the `export default ` prefix is stripped before
//! embedding.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use tracing::info;

use canvasforge_core::error::StoreError;
use canvasforge_core::store::Namespace;

use crate::SharedState;

pub(crate) async fn preview_component(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> (StatusCode, Html<String>) {
    match state.store.read(Namespace::Components, &name).await {
        Ok(artifact) => {
            info!(component_name = %name, "preview request");
            let code = strip_module_syntax(&artifact.code);
            let html = SHELL
                .replace("__COMPONENT_NAME__", &name)
                .replace("__COMPONENT_CODE__", &code);
            (StatusCode::OK, Html(html))
        }
        Err(StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Html(format!(
                "<html><body><p>Component '{name}' not found</p></body></html>"
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("<html><body><p>Error: {e}</p></body></html>")),
        ),
    }
}

/// Blank top-level `import` lines and strip the `export default ` prefix so
/// the code runs inside the Babel script block. Indented occurrences are
/// left alone; only column-0 module syntax is rewritten.
fn strip_module_syntax(code: &str) -> String {
    code.lines()
        .map(|line| {
            if is_import_line(line) {
                ""
            } else {
                strip_export_default(line).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_import_line(line: &str) -> bool {
    line.strip_prefix("import")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c == ' ' || c == '\t')
}

fn strip_export_default(line: &str) -> Option<&str> {
    keyword(line, "export").and_then(|rest| keyword(rest, "default"))
}

/// Match `word` followed by at least one space or tab; returns the rest.
fn keyword<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(word)?;
    let trimmed = rest.trim_start_matches([' ', '\t']);
    (trimmed.len() < rest.len()).then_some(trimmed)
}

const SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>__COMPONENT_NAME__ Preview</title>
    <script crossorigin src="https://unpkg.com/react@18/umd/react.production.min.js"></script>
    <script crossorigin src="https://unpkg.com/react-dom@18/umd/react-dom.production.min.js"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <script src="https://unpkg.com/@babel/standalone/babel.min.js"></script>
    <style>
        body {
            margin: 0;
            padding: 0;
            overflow: hidden;
        }
    </style>
</head>
<body>
    <div id="root"></div>
    <script>
        window.addEventListener('error', function (event) {
            if (window.parent) {
                window.parent.postMessage({
                    type: 'COMPONENT_ERROR',
                    componentName: '__COMPONENT_NAME__',
                    error: {
                        message: event.message,
                        filename: event.filename,
                        lineno: event.lineno,
                        colno: event.colno,
                        stack: event.error ? event.error.stack : ''
                    }
                }, '*');
            }
        });

        window.addEventListener('unhandledrejection', function (event) {
            if (window.parent) {
                window.parent.postMessage({
                    type: 'COMPONENT_ERROR',
                    componentName: '__COMPONENT_NAME__',
                    error: {
                        message: event.reason ? event.reason.message : 'Unhandled promise rejection',
                        stack: event.reason ? event.reason.stack : ''
                    }
                }, '*');
            }
        });
    </script>
    <script type="text/babel">
        try {
            const { useState, useEffect, useRef } = React;

            __COMPONENT_CODE__

            const root = ReactDOM.createRoot(document.getElementById('root'));
            root.render(React.createElement(__COMPONENT_NAME__));

            if (window.parent) {
                window.parent.postMessage({
                    type: 'COMPONENT_LOADED',
                    componentName: '__COMPONENT_NAME__'
                }, '*');
            }
        } catch (error) {
            console.error('Component render error:', error);
            if (window.parent) {
                window.parent.postMessage({
                    type: 'COMPONENT_ERROR',
                    componentName: '__COMPONENT_NAME__',
                    error: {
                        message: error.message,
                        stack: error.stack
                    }
                }, '*');
            }
        }
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_lines_are_blanked() {
        let code = "import { useState } from 'react';\nconst Button = () => null;";
        let stripped = strip_module_syntax(code);
        assert_eq!(stripped, "\nconst Button = () => null;");
    }

    #[test]
    fn export_default_prefix_is_stripped() {
        assert_eq!(strip_module_syntax("export default Button;"), "Button;");
        assert_eq!(
            strip_module_syntax("export default function Home() {}"),
            "function Home() {}"
        );
    }

    #[test]
    fn indented_module_syntax_is_untouched() {
        let code = "  import x from 'y';\n  export default Button;";
        assert_eq!(strip_module_syntax(code), code);
    }

    #[test]
    fn keywords_require_a_separator() {
        assert_eq!(strip_module_syntax("exports.foo = 1;"), "exports.foo = 1;");
        assert_eq!(strip_module_syntax("importantCall();"), "importantCall();");
        assert_eq!(
            strip_module_syntax("export defaultish;"),
            "export defaultish;"
        );
    }

    #[test]
    fn shell_substitution_is_total() {
        let html = SHELL
            .replace("__COMPONENT_NAME__", "Button")
            .replace("__COMPONENT_CODE__", "const Button = () => null;");
        assert!(!html.contains("__COMPONENT_NAME__"));
        assert!(!html.contains("__COMPONENT_CODE__"));
        assert!(html.contains("React.createElement(Button)"));
    }
}
