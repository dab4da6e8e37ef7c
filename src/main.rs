// src/main.rs
// =============================================================================
// This is the entry point of awsm-rank.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Print a completion script and stop, if that was asked for
// 3. Set up logging and validate the settings
// 4. Fetch the page, rank the repositories it links to
// 5. Print the ranking or open it in the browser
// 6. Exit with 0 (ranking shown, even an empty one) or 1 (fatal error)
//
// Rust concepts used:
// - async/await: Because we make many network requests concurrently
// - Result<T, E>: For error handling, with anyhow at this level
// - match: Pattern matching on the output mode
// =============================================================================

mod cli;
mod config;
mod error;
mod extract;
mod logging;
mod page;
mod pipeline;
mod ranking;
mod report;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;

use cli::Cli;
use config::{OutputMode, Settings};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.print_completion {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    logging::init(&cli)?;

    let settings = Settings::from_cli(&cli)?;
    debug!(
        page = %settings.page_url,
        api_base = %settings.api_base,
        authenticated = settings.credential.is_some(),
        "Starting run"
    );

    let client = settings.http_client()?;
    let ranking = pipeline::build_ranking(&client, &settings)
        .await
        .context("Cannot rank repositories without the page")?;

    match settings.output {
        OutputMode::Table => report::print_table(&ranking),
        OutputMode::Json => report::print_json(&ranking)?,
        OutputMode::Open => report::open_urls(&ranking),
    }

    Ok(())
}
