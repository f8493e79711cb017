// src/checker/classify.rs
// =============================================================================
// This module assigns every raw href to exactly one category, which decides
// who checks it:
//
// - "#setup"              -> Anchor: heading lookup in the current document
// - excluded by config    -> Excluded: terminal, nobody checks it
// - "https://example.com" -> Remote: HTTP check
// - "./other.md#intro"    -> Local: filesystem check, maybe plus an anchor
//
// Classification order matters: in-document anchors first, then the
// exclusion filter (so excluded URLs are never even parsed), then remote
// detection, and everything left over is a local path.
// =============================================================================

use url::Url;

use crate::exclude::ExclusionConfig;

// The classified form of a link target, consumed by exactly one checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLink {
    // "#section" within the document being checked (keeps its leading '#')
    Anchor(String),
    // Matched an exclusion pattern; terminal, never checked
    Excluded,
    // Well-formed absolute URL with a scheme and a host
    Remote(String),
    // Anything else: a path relative to the document, with an optional
    // "#anchor" fragment into the referenced file
    Local { path: String, anchor: Option<String> },
}

// Assigns a raw href to its category.
pub fn classify(href: &str, exclusions: &ExclusionConfig) -> ClassifiedLink {
    if href.starts_with('#') {
        return ClassifiedLink::Anchor(href.to_string());
    }

    if exclusions.is_url_excluded(href) {
        return ClassifiedLink::Excluded;
    }

    // A remote link needs both a scheme and a host. "mailto:x@y" parses but
    // has no host, so it falls through to the local branch (and will surface
    // as Broken unless excluded by config).
    if let Ok(url) = Url::parse(href) {
        if url.has_host() {
            return ClassifiedLink::Remote(href.to_string());
        }
    }

    // Split a trailing "#anchor" fragment off the path. A fragment that does
    // not begin with a word character is not a shape well-formed Markdown
    // produces; fail safe by treating the whole string as a bare path and
    // letting resolution report it as Broken.
    match href.split_once('#') {
        Some((path, anchor))
            if anchor
                .chars()
                .next()
                .map_or(false, |c| c.is_alphanumeric() || c == '_') =>
        {
            ClassifiedLink::Local {
                path: path.to_string(),
                anchor: Some(anchor.to_string()),
            }
        }
        _ => ClassifiedLink::Local {
            path: href.to_string(),
            anchor: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_exclusions() -> ExclusionConfig {
        ExclusionConfig::default()
    }

    #[test]
    fn test_hash_prefix_is_anchor() {
        assert_eq!(
            classify("#setup", &no_exclusions()),
            ClassifiedLink::Anchor("#setup".to_string())
        );
    }

    #[test]
    fn test_absolute_url_is_remote() {
        assert_eq!(
            classify("https://example.com/page", &no_exclusions()),
            ClassifiedLink::Remote("https://example.com/page".to_string())
        );
        assert_eq!(
            classify("http://example.com", &no_exclusions()),
            ClassifiedLink::Remote("http://example.com".to_string())
        );
    }

    #[test]
    fn test_scheme_without_host_is_not_remote() {
        // mailto: parses as a URL but has no host
        assert_eq!(
            classify("mailto:docs@example.com", &no_exclusions()),
            ClassifiedLink::Local {
                path: "mailto:docs@example.com".to_string(),
                anchor: None,
            }
        );
    }

    #[test]
    fn test_plain_path_is_local() {
        assert_eq!(
            classify("./other.md", &no_exclusions()),
            ClassifiedLink::Local {
                path: "./other.md".to_string(),
                anchor: None,
            }
        );
    }

    #[test]
    fn test_path_with_fragment_is_local_with_anchor() {
        assert_eq!(
            classify("./other.md#intro", &no_exclusions()),
            ClassifiedLink::Local {
                path: "./other.md".to_string(),
                anchor: Some("intro".to_string()),
            }
        );
    }

    #[test]
    fn test_malformed_fragment_falls_back_to_bare_path() {
        // '#' followed by a non-word character: keep the whole string as the
        // path so resolution can surface it as Broken instead of crashing
        assert_eq!(
            classify("weird#!fragment", &no_exclusions()),
            ClassifiedLink::Local {
                path: "weird#!fragment".to_string(),
                anchor: None,
            }
        );
    }

    #[test]
    fn test_excluded_url_is_terminal() {
        let exclusions =
            ExclusionConfig::compile(&[r"^https://example\.com/.*".to_string()], vec![]);
        assert_eq!(
            classify("https://example.com/anything", &exclusions),
            ClassifiedLink::Excluded
        );
    }

    #[test]
    fn test_exclusion_applies_before_remote_detection() {
        // Even a non-URL string can be excluded; it must never reach the
        // remote or local checkers
        let exclusions = ExclusionConfig::compile(&[r"^skip-me".to_string()], vec![]);
        assert_eq!(classify("skip-me/anything", &exclusions), ClassifiedLink::Excluded);
    }
}
