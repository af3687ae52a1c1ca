//! Default heuristic content validator.
//!
//! Simple substring checks against the lowercased content: hallmark
//! explanatory phrasing means the LLM sent prose, and the absence of any
//! function/expression hallmark means the content isn't recognizable as
//! code. Both lists come from hard-won experience with models describing a
//! component instead of calling the tool.

use canvasforge_core::validate::{Validator, Verdict};

/// Phrases that mark explanatory text rather than code.
const PROSE_MARKERS: &[&str] = &[
    "here is",
    "i have created",
    "i've created",
    "i have updated",
    "i've updated",
    "this component",
    "the updated",
    "## ",
];

/// Minimal syntactic hallmarks of a function/expression definition.
/// `=>` is matched case-sensitively against the original content.
const CODE_MARKERS: &[&str] = &["function", "const"];

/// The default validation policy applied by [`crate::FsStore`].
#[derive(Debug, Default, Clone)]
pub struct HeuristicValidator;

impl Validator for HeuristicValidator {
    fn validate(&self, code: &str) -> Verdict {
        let lower = code.to_lowercase();

        if PROSE_MARKERS.iter().any(|m| lower.contains(m)) {
            return Verdict::LooksLikeProse;
        }

        if !CODE_MARKERS.iter().any(|m| lower.contains(m)) && !code.contains("=>") {
            return Verdict::NotRecognizableAsCode;
        }

        Verdict::Ok
    }
}
