// src/pipeline.rs
// =============================================================================
// The whole run, minus the presentation:
//
//   page URL -> fetch page -> extract repos -> endpoints -> rank -> limit
//
// Only the page fetch can fail. Per-repository failures are absorbed by
// rank_repos, and a page without repository links gives an empty ranking.
// =============================================================================

use reqwest::Client;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::PageFetchError;
use crate::extract::{dedup_repo_refs, extract_repos, Endpoint};
use crate::page::fetch_page;
use crate::ranking::{rank_repos, RepoRecord};

pub async fn build_ranking(
    client: &Client,
    settings: &Settings,
) -> Result<Vec<RepoRecord>, PageFetchError> {
    let page = fetch_page(client, &settings.page_url).await?;
    let format = page.format(settings.format);

    let mut repos = extract_repos(&page.body, format, &settings.filter);
    info!(count = repos.len(), host = settings.filter.host(), format = ?format, "Extracted repository links");
    if repos.is_empty() {
        info!(url = %settings.page_url, "No repository links found on the page");
    }

    if settings.dedup {
        let before = repos.len();
        repos = dedup_repo_refs(repos);
        debug!(removed = before - repos.len(), "Removed duplicate repository links");
    }

    let endpoints: Vec<Endpoint> = repos
        .iter()
        .map(|repo| {
            debug!(owner = repo.owner(), repo = repo.name(), "Queued repository");
            repo.endpoint(&settings.api_base)
        })
        .collect();

    debug!(authenticated = settings.credential.is_some(), "Querying repository metadata");
    let mut ranking = rank_repos(client, &endpoints, settings.credential.as_deref()).await;

    if let Some(limit) = settings.limit {
        ranking.truncate(limit);
    }

    Ok(ranking)
}
