// src/checker/local.rs
// =============================================================================
// This module resolves local link targets on the filesystem.
//
// Paths are relative to the directory of the document being checked. When
// the link carries an anchor ("./other.md#intro"), the referenced file is
// read and parsed so the anchor can be matched against its headings - one
// extra read/parse, never more (no transitive anchor chasing).
// =============================================================================

use std::path::Path;

use crate::document::{self, Document};

// The result of resolving one local target. Broken carries the detail line
// shown to the user; there is deliberately just the one failure category,
// whether the path is missing or the anchor is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOutcome {
    Valid,
    Broken(String),
}

// Resolves `path` against `base_dir` and, if an anchor was requested,
// matches it against the headings of the referenced file.
//
// An empty `path` resolves to `base_dir` itself.
pub fn resolve(base_dir: &Path, path: &str, anchor: Option<&str>) -> LocalOutcome {
    let target = base_dir.join(path);

    if !target.exists() {
        return LocalOutcome::Broken(format!("no such path: {}", target.display()));
    }

    let Some(anchor) = anchor else {
        // Existence is all that was asked for
        return LocalOutcome::Valid;
    };

    // Anchors are only meaningful inside a parseable document
    if !target.is_file() {
        return LocalOutcome::Broken(format!(
            "anchor '#{}' into {}, which is not a file",
            anchor,
            target.display()
        ));
    }

    match Document::load(&target) {
        Ok(referenced) => {
            if document::anchor_matches(&format!("#{}", anchor), &referenced) {
                LocalOutcome::Valid
            } else {
                LocalOutcome::Broken(format!(
                    "no heading matching '#{}' in {}",
                    anchor,
                    target.display()
                ))
            }
        }
        Err(e) => LocalOutcome::Broken(format!("{:#}", e)),
    }
}
