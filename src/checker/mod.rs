// src/checker/mod.rs
// =============================================================================
// This module contains the per-link checking logic.
//
// Submodules:
// - classify: decides what kind of target a raw href is
// - remote: checks remote URLs over HTTP (with a courtesy delay for GitHub)
// - local: resolves local paths and anchors inside referenced files
//
// This file (mod.rs) is the module root - it holds the result types shared
// by every checker and re-exports the public API.
// =============================================================================

mod classify;
mod local;
mod remote;

pub use classify::{classify, ClassifiedLink};
pub use local::{resolve, LocalOutcome};
pub use remote::{HttpChecker, RemoteCheck};

use serde::Serialize;

// What happened to a single link.
//
// Skipped links (excluded URLs, empty targets) never count toward the
// broken total; only Broken does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Valid,
    Broken,
    Skipped,
}

// The per-link record the validator accumulates: the raw target, what
// happened to it, and an optional human-readable detail (the HTTP status
// for remote failures, the missing path for local ones, ...).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub target: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn new(target: impl Into<String>, outcome: Outcome, message: Option<String>) -> Self {
        ValidationResult {
            target: target.into(),
            outcome,
            message,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.outcome == Outcome::Broken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_broken_counts_as_broken() {
        let broken = ValidationResult::new("x", Outcome::Broken, None);
        let valid = ValidationResult::new("x", Outcome::Valid, None);
        let skipped = ValidationResult::new("x", Outcome::Skipped, None);

        assert!(broken.is_broken());
        assert!(!valid.is_broken());
        assert!(!skipped.is_broken());
    }

    #[test]
    fn test_result_serializes_with_flattened_outcome() {
        let result = ValidationResult::new(
            "https://example.com",
            Outcome::Broken,
            Some("HTTP 404".to_string()),
        );
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"outcome\":\"broken\""));
        assert!(json.contains("\"message\":\"HTTP 404\""));
    }
}
