// src/document.rs
// =============================================================================
// This module turns raw Markdown into something we can query.
//
// Pipeline:
// 1. pulldown-cmark renders the Markdown text to HTML
// 2. scraper parses that HTML into a DOM we can run CSS selectors against
//
// From the resulting Document we only ever ask two questions:
// - which hyperlinks does it contain? (every <a> element's href)
// - which headings does it contain? (h1..h6 text, for anchor matching)
//
// Anchor matching works on "slugs": the lowercased, space-to-hyphen form of
// heading text. "#Install Guide" and "## install guide" both slug to
// "install-guide" and are indistinguishable to the matcher.
// =============================================================================

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pulldown_cmark::{html, Parser};
use scraper::{Html, Selector};

// A parsed Markdown document, queryable for links and headings.
//
// Immutable once built; we rebuild one per file read. The one-hop anchor
// check in the local resolver builds a second Document for the referenced
// file, and that is the only extra parse we ever do.
pub struct Document {
    dom: Html,
}

impl Document {
    // Parses Markdown text into a queryable Document.
    //
    // The Markdown is first rendered to HTML, then parsed into a DOM.
    // Inline HTML in the source (raw <a> tags etc.) survives this pipeline,
    // so those links get checked too.
    pub fn parse(markdown: &str) -> Self {
        let parser = Parser::new(markdown);
        let mut rendered = String::new();
        html::push_html(&mut rendered, parser);

        Document {
            dom: Html::parse_document(&rendered),
        }
    }

    // Reads a file from disk and parses it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    // Returns the target of every hyperlink, in document order.
    //
    // An <a> element without an href attribute has no target and yields
    // nothing. An empty href ("") is returned as-is; the validator decides
    // what to do with it.
    pub fn links(&self) -> Vec<String> {
        // Selector is a constant and known to be valid, so unwrap is safe
        let selector = Selector::parse("a").unwrap();

        self.dom
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }

    // Returns the text content of every heading (levels 1-6).
    pub fn headings(&self) -> Vec<String> {
        let selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();

        self.dom
            .select(&selector)
            .map(|element| element.text().collect::<String>())
            .collect()
    }

    // The set of heading slugs, for anchor membership tests.
    fn heading_slugs(&self) -> HashSet<String> {
        self.headings().iter().map(|text| slugify(text)).collect()
    }
}

// Normalizes heading or anchor text into its comparable slug form:
// trim surrounding whitespace, lowercase, and turn each space into a hyphen.
//
// Deliberately nothing more than that: punctuation is kept verbatim, so
// "FAQ & Tips" slugs to "faq-&-tips", not "faq--tips".
pub fn slugify(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "-")
}

// Decides whether an anchor reference points at a heading that exists in
// the given document.
//
// The reference is expected to begin with one or more '#' characters
// followed by the anchor text (e.g. "#install-guide" or "##Install Guide").
// A reference that does not start with '#' names no anchor at all and the
// answer is false.
pub fn anchor_matches(reference: &str, document: &Document) -> bool {
    if !reference.starts_with('#') {
        return false;
    }

    let candidate = slugify(reference.trim_start_matches('#'));
    document.heading_slugs().contains(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Install Guide"), "install-guide");
        assert_eq!(slugify("  Setup  "), "setup");
        assert_eq!(slugify("A B C"), "a-b-c");
    }

    #[test]
    fn test_slugify_keeps_punctuation() {
        // Only spaces are rewritten; everything else passes through
        assert_eq!(slugify("FAQ & Tips"), "faq-&-tips");
        assert_eq!(slugify("v1.2 Notes"), "v1.2-notes");
    }

    #[test]
    fn test_extract_links_in_order() {
        let doc = Document::parse("[a](#one) then [b](./two.md) then [c](https://example.com)");
        assert_eq!(doc.links(), vec!["#one", "./two.md", "https://example.com"]);
    }

    #[test]
    fn test_extract_links_from_inline_html() {
        let doc = Document::parse("raw <a href=\"#here\">anchor</a> tag");
        assert_eq!(doc.links(), vec!["#here"]);
    }

    #[test]
    fn test_anchor_without_href_yields_nothing() {
        let doc = Document::parse("<a name=\"target\">no href</a>");
        assert!(doc.links().is_empty());
    }

    #[test]
    fn test_extract_headings() {
        let doc = Document::parse("# Top\n\nsome text\n\n## Install Guide\n\n### Deep\n");
        assert_eq!(doc.headings(), vec!["Top", "Install Guide", "Deep"]);
    }

    #[test]
    fn test_heading_with_inline_formatting() {
        // The heading's full text content counts, not just the plain parts
        let doc = Document::parse("## Using `mdcheck` daily\n");
        assert_eq!(doc.headings(), vec!["Using mdcheck daily"]);
    }

    #[test]
    fn test_anchor_matches_every_heading_slug() {
        let doc = Document::parse("# Overview\n\n## Install Guide\n\n### FAQ\n");
        for heading in doc.headings() {
            assert!(anchor_matches(&format!("#{}", heading), &doc));
        }
    }

    #[test]
    fn test_anchor_matches_ignores_case_and_spacing() {
        let doc = Document::parse("## Install Guide\n");
        assert!(anchor_matches("#install-guide", &doc));
        assert!(anchor_matches("#INSTALL GUIDE", &doc));
        assert!(anchor_matches("##Install Guide", &doc));
    }

    #[test]
    fn test_anchor_without_matching_heading() {
        let doc = Document::parse("## Setup\n");
        assert!(!anchor_matches("#teardown", &doc));
    }

    #[test]
    fn test_reference_without_hash_never_matches() {
        let doc = Document::parse("## Setup\n");
        assert!(!anchor_matches("setup", &doc));
    }
}
