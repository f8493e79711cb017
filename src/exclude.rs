// src/exclude.rs
// =============================================================================
// This module loads the optional exclusion config and answers two questions:
// - should this URL be skipped entirely? (regex patterns)
// - should this whole file be skipped? (literal path substrings)
//
// The config is a small YAML file, conventionally named linkcheck.yaml and
// living next to the document being checked:
//
//   exclude_urls:
//     - "^https://example\\.com/.*"
//   exclude_paths:
//     - "vendor/"
//
// A missing config file simply means no exclusions. A pattern that fails to
// compile is reported and dropped; the remaining patterns stay active.
// =============================================================================

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

// Conventional config file name, looked up next to the input document.
pub const CONFIG_FILE_NAME: &str = "linkcheck.yaml";

// The config file as written on disk, before compilation.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    // Regex patterns for URLs that should never be checked
    #[serde(default)]
    exclude_urls: Vec<String>,

    // Literal substrings; a file whose path contains one is skipped whole
    #[serde(default)]
    exclude_paths: Vec<String>,
}

// The compiled exclusion set, loaded once per run and read-only afterwards.
#[derive(Debug, Default)]
pub struct ExclusionConfig {
    // All valid URL patterns combined into one alternation, anchored at the
    // start of the candidate URL. None when there are no valid patterns.
    url_pattern: Option<Regex>,
    path_substrings: Vec<String>,
}

impl ExclusionConfig {
    // Loads and compiles the config at `path`.
    //
    // A missing file is not an error; it means no exclusions apply.
    // A file that is present but not valid YAML is reported and likewise
    // treated as empty; a broken config never aborts a run.
    pub fn load(path: &Path) -> ExclusionConfig {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return ExclusionConfig::default(),
        };

        let raw: RawConfig = match serde_yaml::from_str(&text) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("⚠️  Ignoring malformed config {}: {}", path.display(), e);
                RawConfig::default()
            }
        };

        Self::compile(&raw.exclude_urls, raw.exclude_paths)
    }

    // Compiles pattern lists into an ExclusionConfig.
    //
    // Each URL pattern is compiled on its own first, so one bad entry only
    // costs us that entry. The survivors are then joined into a single
    // alternation matched against the start of the URL.
    pub fn compile(url_patterns: &[String], path_substrings: Vec<String>) -> ExclusionConfig {
        let mut valid = Vec::new();

        for pattern in url_patterns {
            match Regex::new(pattern) {
                Ok(_) => valid.push(pattern.clone()),
                Err(e) => {
                    eprintln!("⚠️  Ignoring bad exclusion pattern '{}': {}", pattern, e);
                }
            }
        }

        let url_pattern = if valid.is_empty() {
            None
        } else {
            let combined = format!("^(?:{})", valid.join("|"));
            match Regex::new(&combined) {
                Ok(re) => Some(re),
                Err(e) => {
                    eprintln!("⚠️  Could not combine exclusion patterns: {}", e);
                    None
                }
            }
        };

        ExclusionConfig {
            url_pattern,
            path_substrings,
        }
    }

    // True iff any configured pattern matches the start of `url`.
    pub fn is_url_excluded(&self, url: &str) -> bool {
        self.url_pattern
            .as_ref()
            .map_or(false, |re| re.is_match(url))
    }

    // True iff `path` contains any of the configured literal substrings.
    // When it does, the whole file is skipped before any link is read.
    pub fn is_path_excluded(&self, path: &str) -> bool {
        self.path_substrings
            .iter()
            .any(|substring| path.contains(substring))
    }
}
