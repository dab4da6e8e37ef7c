// src/extract/mod.rs
// =============================================================================
// This module turns a fetched page into the list of repositories it links to.
//
// Submodules:
// - repo: RepoRef, Endpoint and the RepoFilter that classifies single links
// - html: walks <a href> elements of an HTML page
// - markdown: walks link events of a Markdown document
//
// Nothing in here touches the network. Given the same page text and the same
// filter, the output is always the same.
// =============================================================================

mod html;
mod markdown;
mod repo;

use html::extract_html_repos;
use markdown::extract_markdown_repos;

use repo::RepoRef;

pub use repo::{dedup_repo_refs, Endpoint, RepoFilter};

/// How the page text should be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Html,
    Markdown,
}

/// Extracts repository references from a page of the given format
pub fn extract_repos(body: &str, format: PageFormat, filter: &RepoFilter) -> Vec<RepoRef> {
    match format {
        PageFormat::Html => extract_html_repos(body, filter),
        PageFormat::Markdown => extract_markdown_repos(body, filter),
    }
}
