// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things). The 'env' feature lets
// --token fall back to the GITHUB_API_TOKEN environment variable.
//
// The raw values are validated into a Settings struct in config.rs; nothing
// else in the program reads Cli directly.
// =============================================================================

use clap::Parser;
use clap_complete::Shell;

use crate::page::FormatChoice;

#[derive(Parser, Debug)]
#[command(
    name = "awsm-rank",
    version,
    about = "Rank the GitHub repositories linked from an awesome list by stars",
    long_about = "awsm-rank scrapes a page (usually one of the 'Awesome' lists), finds every \
                  GitHub repository it links to, asks the GitHub API for their star counts \
                  concurrently and prints them ordered by stars."
)]
pub struct Cli {
    /// Page to scan, e.g. https://github.com/rust-unofficial/awesome-rust
    #[arg(required_unless_present = "print_completion")]
    pub url: Option<String>,

    /// GitHub API token; overrides GITHUB_API_TOKEN
    ///
    /// Without a token the API allows 60 requests per hour, which a large
    /// list quickly exceeds.
    #[arg(long, env = "GITHUB_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Only keep the N most starred repositories (0 keeps all)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Open every ranked repository in a browser tab instead of printing
    #[arg(long, conflicts_with = "json")]
    pub open: bool,

    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// How to parse the page
    #[arg(long, value_enum, default_value_t = FormatChoice::Auto)]
    pub format: FormatChoice,

    /// Host whose repository links are collected
    #[arg(long, default_value = "github.com")]
    pub host: String,

    /// Base URL of the repository metadata API
    #[arg(long, default_value = "https://api.github.com")]
    pub api_base: String,

    /// Extra top-level path segment that is never a repository owner
    /// (repeatable; apps, site and topics are always excluded)
    #[arg(long = "deny", value_name = "SEGMENT")]
    pub deny: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub timeout: u64,

    /// Fetch each repository only once even if the page links it repeatedly
    #[arg(long)]
    pub dedup: bool,

    /// Show info-level logs (skipped links, summary)
    #[arg(short, long)]
    pub verbose: bool,

    /// Show debug-level logs (every request)
    #[arg(long)]
    pub debug: bool,

    /// Print a shell completion script and exit
    #[arg(short = 's', long, value_name = "SHELL")]
    pub print_completion: Option<Shell>,
}
