// src/validator.rs
// =============================================================================
// This module drives a whole validation run for one Markdown file.
//
// Per-file state machine:
//   not markdown? -> skip (0)
//   path excluded? -> skip (0)
//   load + parse  -> failure counts as one broken link
//   per-link loop -> classify, dispatch to the right checker, tally
//   return the broken count (which becomes the process exit code)
//
// Links are checked strictly one at a time, in document order. The courtesy
// delay in the remote checker assumes exactly this sequential pacing, so
// there is no concurrent fan-out here on purpose.
//
// A Ctrl-C lands in the shared interrupt flag, which the loop consults
// before every link; the run stops early but still reports the failures
// found so far.
// =============================================================================

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::Colorize;

use crate::checker::{self, ClassifiedLink, LocalOutcome, Outcome, RemoteCheck, ValidationResult};
use crate::document::{self, Document};
use crate::exclude::ExclusionConfig;

// Validates one document and accumulates the per-link results.
//
// Generic over the remote checker so tests can substitute a canned double
// for the live HTTP client.
pub struct Validator<R> {
    remote: R,
    exclusions: ExclusionConfig,
    verbose: bool,
    json: bool,
    interrupted: Arc<AtomicBool>,
    broken: usize,
    results: Vec<ValidationResult>,
}

impl<R: RemoteCheck> Validator<R> {
    pub fn new(
        remote: R,
        exclusions: ExclusionConfig,
        verbose: bool,
        json: bool,
        interrupted: Arc<AtomicBool>,
    ) -> Self {
        Validator {
            remote,
            exclusions,
            verbose,
            json,
            interrupted,
            broken: 0,
            results: Vec::new(),
        }
    }

    // Runs the full check for `path` and returns the broken-link count.
    //
    // Never panics and never loses the tally: every failure mode folds into
    // the returned count.
    pub async fn run(&mut self, path: &Path) -> usize {
        if !is_markdown_file(path) {
            println!("⚠️  Not a Markdown file, skipping: {}", path.display());
            return self.broken;
        }

        let displayed = path.to_string_lossy();
        if self.exclusions.is_path_excluded(&displayed) {
            if !self.json {
                println!("⚠️  Excluded by config, skipping: {}", displayed);
            }
            return self.broken;
        }

        let doc = match Document::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                // The file was asked for by name, so failing to load it is a
                // failure of the run, not a skip
                eprintln!("{} {:#}", "FAIL".red().bold(), e);
                self.broken += 1;
                return self.broken;
            }
        };

        if !self.json {
            println!("🔍 Checking links in {}", displayed);
        }

        // Links resolve relative to the directory of the file being checked
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        for href in doc.links() {
            // Cooperative cancellation: consult the flag between links, so
            // an interrupt still yields the count accumulated so far
            if self.interrupted.load(Ordering::SeqCst) {
                eprintln!(
                    "⚠️  Interrupted after {} link(s), stopping early",
                    self.results.len()
                );
                break;
            }

            let result = self.check_link(href, &doc, base_dir).await;
            self.report(result);
        }

        self.broken
    }

    // Produces exactly one ValidationResult for one raw link target.
    async fn check_link(&self, href: String, doc: &Document, base_dir: &Path) -> ValidationResult {
        if href.is_empty() {
            return ValidationResult::new(href, Outcome::Skipped, Some("empty link target".to_string()));
        }

        match checker::classify(&href, &self.exclusions) {
            ClassifiedLink::Anchor(anchor) => {
                if document::anchor_matches(&anchor, doc) {
                    ValidationResult::new(href, Outcome::Valid, None)
                } else {
                    ValidationResult::new(
                        href,
                        Outcome::Broken,
                        Some("no matching heading".to_string()),
                    )
                }
            }

            ClassifiedLink::Excluded => ValidationResult::new(
                href,
                Outcome::Skipped,
                Some("excluded by config".to_string()),
            ),

            ClassifiedLink::Remote(url) => match self.remote.status(&url).await {
                Ok(200) => {
                    ValidationResult::new(href, Outcome::Valid, Some("HTTP 200".to_string()))
                }
                Ok(status) => {
                    ValidationResult::new(href, Outcome::Broken, Some(format!("HTTP {}", status)))
                }
                Err(e) => ValidationResult::new(
                    href,
                    Outcome::Broken,
                    Some(format!("request failed: {:#}", e)),
                ),
            },

            ClassifiedLink::Local { path, anchor } => {
                match checker::resolve(base_dir, &path, anchor.as_deref()) {
                    LocalOutcome::Valid => ValidationResult::new(href, Outcome::Valid, None),
                    LocalOutcome::Broken(detail) => {
                        ValidationResult::new(href, Outcome::Broken, Some(detail))
                    }
                }
            }
        }
    }

    // Tallies and prints one result. Failures always print; ok/skip lines
    // only under --verbose, to keep CI logs readable.
    fn report(&mut self, result: ValidationResult) {
        if result.is_broken() {
            self.broken += 1;
        }

        if !self.json {
            let detail = result.message.as_deref().unwrap_or("");
            match result.outcome {
                Outcome::Valid => {
                    if self.verbose {
                        println!("{} {}", "  ok".green().bold(), result.target);
                    }
                }
                Outcome::Skipped => {
                    if self.verbose {
                        println!("{} {} ({})", "skip".yellow(), result.target, detail);
                    }
                }
                Outcome::Broken => {
                    println!("{} {} ({})", "FAIL".red().bold(), result.target, detail);
                }
            }
        }

        self.results.push(result);
    }

    // Everything recorded so far, for the --json report.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }
}

// Filename-based check; anything that doesn't look like Markdown is
// skipped rather than failed.
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown")
        })
}
