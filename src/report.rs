// src/report.rs
// =============================================================================
// Shows the finished ranking: a table or JSON on stdout, or browser tabs.
//
// These functions only read the ranking. A failure to open one tab is logged
// and the next URL is tried; it never fails the run.
// =============================================================================

use std::process::Command;

use anyhow::Result;
use tracing::{debug, warn};

use crate::ranking::RepoRecord;

// Widest name/owner we print before cutting with "..."
const MAX_COLUMN: usize = 40;

// Builds the table as a String so it can be tested without capturing stdout
//
// Columns: NAME, OWNER, STARGAZERS (the URL is left out, like the JSON keeps it)
pub fn render_table(ranking: &[RepoRecord]) -> String {
    let name_width = column_width("NAME", ranking.iter().map(|r| r.name.as_str()));
    let owner_width = column_width("OWNER", ranking.iter().map(|r| r.owner.as_str()));

    let mut out = String::new();
    out.push_str(&format!(
        "{:<name_width$}  {:<owner_width$}  {:>10}\n",
        "NAME", "OWNER", "STARGAZERS"
    ));
    out.push_str(&format!("{}\n", "-".repeat(name_width + owner_width + 14)));

    for record in ranking {
        out.push_str(&format!(
            "{:<name_width$}  {:<owner_width$}  {:>10}\n",
            truncate(&record.name),
            truncate(&record.owner),
            record.popularity
        ));
    }

    out
}

pub fn print_table(ranking: &[RepoRecord]) {
    print!("{}", render_table(ranking));
}

pub fn print_json(ranking: &[RepoRecord]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(ranking)?;
    println!("{}", json_output);
    Ok(())
}

// Opens every repository in a new browser tab, most starred first
//
// $BROWSER wins when set; otherwise the platform opener is used.
pub fn open_urls(ranking: &[RepoRecord]) {
    for record in ranking {
        debug!(url = %record.url, "Opening in browser");
        match browser_command(&record.url).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(url = %record.url, code = ?status.code(), "Browser exited with an error"),
            Err(e) => warn!(url = %record.url, error = %e, "Could not start browser"),
        }
    }
}

fn browser_command(url: &str) -> Command {
    if let Some(browser) = std::env::var_os("BROWSER").filter(|b| !b.is_empty()) {
        let mut cmd = Command::new(browser);
        cmd.arg(url);
        return cmd;
    }

    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        // The empty string is the window title expected by `start`
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count().min(MAX_COLUMN))
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

fn truncate(value: &str) -> String {
    if value.chars().count() > MAX_COLUMN {
        let cut: String = value.chars().take(MAX_COLUMN - 3).collect();
        format!("{}...", cut)
    } else {
        value.to_string()
    }
}
