// src/ranking/aggregate.rs
// =============================================================================
// This module fetches every repository at once and orders the results.
//
// How it works:
// 1. Build one fetch future per endpoint (nothing runs yet)
// 2. join_all drives all of them concurrently and finishes only when EVERY
//    fetch has produced an outcome, success or failure
// 3. Drop the failures (fetch_repo already logged them)
// 4. Stable sort by star count, highest first
//
// join_all returns outcomes in input order, not completion order, so which
// request happened to answer first can never change the ranking. Together
// with the stable sort this makes ties keep their order on the page.
//
// There is no concurrency limit of our own. The shared reqwest Client pools
// connections, and each request carries the client's timeout.
// =============================================================================

use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, info};

use super::fetch::{fetch_repo, FetchOutcome, RepoRecord};
use crate::extract::Endpoint;

// Ranks repositories by star count
//
// Parameters:
//   client: shared HTTP client
//   endpoints: API URLs, in the order they appeared on the page
//   credential: optional token passed to every fetch
//
// Returns: the ranking. Empty if every fetch failed, which is not an error.
pub async fn rank_repos(
    client: &Client,
    endpoints: &[Endpoint],
    credential: Option<&str>,
) -> Vec<RepoRecord> {
    debug!(count = endpoints.len(), "Dispatching metadata requests");

    let fetches = endpoints
        .iter()
        .map(|endpoint| fetch_repo(client, endpoint, credential));
    let outcomes = join_all(fetches).await;

    let ranking = collect_ranking(outcomes);
    info!(
        requested = endpoints.len(),
        ranked = ranking.len(),
        failed = endpoints.len() - ranking.len(),
        "Collected repository metadata"
    );

    ranking
}

/// Keeps the successful outcomes and sorts them by popularity, descending.
///
/// `sort_by` is stable, so records with equal popularity keep the order
/// they had in `outcomes`.
pub fn collect_ranking<I>(outcomes: I) -> Vec<RepoRecord>
where
    I: IntoIterator<Item = FetchOutcome>,
{
    let mut records: Vec<RepoRecord> = outcomes.into_iter().filter_map(Result::ok).collect();
    records.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    records
}
