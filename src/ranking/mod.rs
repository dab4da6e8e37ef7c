// src/ranking/mod.rs
// =============================================================================
// This module turns repository endpoints into a star ranking.
//
// Submodules:
// - fetch: one request to the GitHub API, one FetchOutcome
// - aggregate: all requests at once, failures dropped, sorted by stars
// =============================================================================

mod aggregate;
mod fetch;

pub use aggregate::rank_repos;
pub use fetch::RepoRecord;
