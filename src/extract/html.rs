// src/extract/html.rs
// =============================================================================
// This module finds repository links in an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever (Mozilla's HTML parser), so broken markup is fine
//
// Every <a href="..."> is handed to RepoFilter::classify, which decides if the
// link is a repository on the target host.
//
// Rust concepts:
// - Iterators: filter_map chains instead of index loops
// - Borrowing: the document is borrowed, nothing is copied until a match
// =============================================================================

use scraper::{ElementRef, Html};

use super::repo::{RepoFilter, RepoRef};

// Extracts repository references from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   filter: host + denylist rules
//
// Returns: repositories in document order, duplicates included
//
// Example:
//   html = "<a href='/octocat/Hello-World'>Hello</a>"
//   result = [octocat/Hello-World]
pub fn extract_html_repos(html: &str, filter: &RepoFilter) -> Vec<RepoRef> {
    let document = Html::parse_document(html);

    // Walk the whole tree and keep <a> elements that carry an href.
    // Anchors without a target are simply not links.
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| filter.classify(href))
        .collect()
}
