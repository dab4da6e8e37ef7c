// src/config.rs
// =============================================================================
// Validated run settings.
//
// The CLI gives us strings and numbers. Here they become the types the rest
// of the program wants (parsed URLs, a Duration, a RepoFilter) so that bad
// input is reported once, before any request is made.
// =============================================================================

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use url::Url;

use crate::cli::Cli;
use crate::extract::RepoFilter;
use crate::page::FormatChoice;

/// Top-level GitHub paths that are never repository owners
pub const DEFAULT_DENYLIST: [&str; 3] = ["apps", "site", "topics"];

/// What to do with the finished ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
    Open,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub page_url: Url,
    pub api_base: Url,
    pub filter: RepoFilter,
    pub format: FormatChoice,
    pub credential: Option<String>,
    pub timeout: Duration,
    pub limit: Option<usize>,
    pub dedup: bool,
    pub output: OutputMode,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let Some(raw_url) = cli.url.as_deref() else {
            bail!("a page URL is required");
        };
        let page_url =
            Url::parse(raw_url).with_context(|| format!("Invalid page URL '{}'", raw_url))?;

        let api_base = Url::parse(&cli.api_base)
            .with_context(|| format!("Invalid API base URL '{}'", cli.api_base))?;

        let denylist = DEFAULT_DENYLIST
            .iter()
            .map(|s| s.to_string())
            .chain(cli.deny.iter().cloned());
        let filter = RepoFilter::new(&cli.host, denylist)
            .with_context(|| format!("Invalid host '{}'", cli.host))?;

        if cli.timeout == 0 {
            bail!("--timeout must be at least 1 second");
        }

        let output = if cli.open {
            OutputMode::Open
        } else if cli.json {
            OutputMode::Json
        } else {
            OutputMode::Table
        };

        Ok(Settings {
            page_url,
            api_base,
            filter,
            format: cli.format,
            // An empty GITHUB_API_TOKEN means "no token"
            credential: cli.token.clone().filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(cli.timeout),
            // --limit 0 means no limit
            limit: cli.limit.filter(|&n| n > 0),
            dedup: cli.dedup,
            output,
        })
    }

    // Builds the HTTP client shared by the page fetch and every API fetch
    //
    // GitHub rejects API requests without a User-Agent. Accept headers are set
    // per request, since the page and the API want different media types.
    pub fn http_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .context("Failed to create HTTP client")
    }
}
