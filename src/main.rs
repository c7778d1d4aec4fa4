// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to a file for the full-screen picker, stderr otherwise)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = fetch failed, 2 = error)
//
// Rust concepts used:
// - async/await: The GitHub requests run on the tokio runtime
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod browser;  // src/browser.rs - open URLs in the default browser
mod cli;      // src/cli.rs - command-line parsing
mod github;   // src/github/ - GitHub API requests and path parsing
mod logging;  // src/logging.rs - tracing setup
mod picker;   // src/picker/ - the path autocomplete state machine
mod source;   // src/source/ - background fetch + published state
mod tui;      // src/tui/ - the full-screen landing page

use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};
use github::{GithubConfig, Repository};
use logging::LogTarget;
use source::RepoSource;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = success
//   Ok(1) = the repository fetch failed (list)
//   Err = unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let command = cli.command_or_pick();

    // The picker draws over the whole terminal, so its logs can't go to stderr
    let log_target = match (&cli.log_file, &command) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, Commands::Pick { .. }) => LogTarget::default_file(),
        (None, _) => LogTarget::Stderr,
    };
    logging::init(cli.verbose, &log_target)?;

    let config = GithubConfig {
        username: cli.user.clone(),
        api_base: cli.api_base.clone(),
    };

    match command {
        Commands::Pick {
            name,
            tagline,
            path,
        } => handle_pick(config, tui::Profile { name, tagline }, path),
        Commands::List { json } => handle_list(config, json).await,
        Commands::Open { path } => handle_open(&path),
    }
}

// Handles the 'pick' subcommand (and no subcommand at all)
fn handle_pick(
    config: GithubConfig,
    profile: tui::Profile,
    initial_path: Option<String>,
) -> Result<i32> {
    let client = github::build_client()?;
    let source = RepoSource::new(client, config);
    tui::run(profile, source, initial_path.as_deref())?;
    Ok(0)
}

// Handles the 'list' subcommand
// Parameters:
//   config: whose repositories, and which API
//   json: whether to output JSON format
async fn handle_list(config: GithubConfig, json: bool) -> Result<i32> {
    if !json {
        println!("🔍 Fetching starred repositories owned by {}", config.username);
    }

    let client = github::build_client()?;
    let mut source = RepoSource::new(client, config);
    source.refetch();
    source.wait().await;

    if let Some(error) = source.error() {
        eprintln!("❌ {}", error);
        return Ok(1);
    }

    print_results(source.items(), json)?;
    Ok(0)
}

// Handles the 'open' subcommand
fn handle_open(path: &str) -> Result<i32> {
    let repo_path = github::parse_repo_path(path)?;
    let url = browser::to_browser_url(&repo_path.web_url())?;
    browser::open_in_browser(&url)?;
    println!("🌐 Opened {}", url);
    Ok(0)
}

// Prints the repositories either as a table or JSON
fn print_results(repos: &[Repository], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(repos)?;
        println!("{}", json_output);
    } else {
        print_table(repos);
    }
    Ok(())
}

// Prints repositories as a human-readable table in the terminal
fn print_table(repos: &[Repository]) {
    if repos.is_empty() {
        println!("⚠️  No repository is both owned and starred");
        return;
    }

    println!("{:<32} {:<12} {:>6} {:<20}", "NAME", "LANGUAGE", "STARS", "UPDATED");
    println!("{}", "=".repeat(73));

    for repo in repos {
        println!(
            "{:<32} {:<12} {:>6} {:<20}",
            truncate(&repo.name, 32),
            repo.language.as_deref().unwrap_or("-"),
            repo.stargazers_count,
            repo.updated_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    println!();
    println!("📋 Total: {}", repos.len());
}

// Shortens long names so the columns stay aligned
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
