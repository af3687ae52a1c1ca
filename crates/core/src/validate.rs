//! Content validation policy for artifact writes.
//!
//! These checks are heuristic gatekeepers against the LLM returning
//! descriptive text instead of an artifact. They are deliberately permissive
//! substring checks, not a parser. The trait keeps the policy pluggable so
//! a stricter check can be substituted without touching the store's write
//! path.

/// The outcome of validating proposed artifact content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Content passed the sanity checks.
    Ok,
    /// Content reads like explanatory prose (leading narrative sentence or
    /// markdown heading) rather than code.
    LooksLikeProse,
    /// Content contains none of the minimal syntactic hallmarks of a
    /// function or expression definition.
    NotRecognizableAsCode,
}

/// A pluggable validation policy applied before every mutating write.
pub trait Validator: Send + Sync {
    fn validate(&self, code: &str) -> Verdict;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysOk;

    impl Validator for AlwaysOk {
        fn validate(&self, _code: &str) -> Verdict {
            Verdict::Ok
        }
    }

    #[test]
    fn validator_is_object_safe() {
        let v: Box<dyn Validator> = Box::new(AlwaysOk);
        assert_eq!(v.validate("anything"), Verdict::Ok);
    }
}
