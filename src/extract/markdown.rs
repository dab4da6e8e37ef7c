// src/extract/markdown.rs
// =============================================================================
// This module finds repository links in Markdown text.
//
// Many awesome lists are plain README.md files, and their raw form
// (raw.githubusercontent.com/...) is Markdown, not HTML.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is a streaming parser, so we never build a full tree
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};

use super::repo::{RepoFilter, RepoRef};

// Extracts repository references from Markdown text
//
// Both [text](url) links and <url> autolinks produce a Start(Link) event.
//
// Example input:
//   "- [tokio](https://github.com/tokio-rs/tokio) - async runtime"
//
// Example output:
//   [tokio-rs/tokio]
pub fn extract_markdown_repos(markdown: &str, filter: &RepoFilter) -> Vec<RepoRef> {
    Parser::new(markdown)
        .filter_map(|event| match event {
            // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
            Event::Start(Tag::Link(_link_type, dest_url, _title)) => filter.classify(&dest_url),
            _ => None,
        })
        .collect()
}
