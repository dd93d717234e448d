//! serper-search CLI - interactive web search through the Serper API
//!
//! Runs an interactive prompt by default. `search` runs a single query and
//! `about` prints the static help panels.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use serper_search::{
    config::{Config, API_KEY_VAR},
    format::render_outcome,
    shell::{self, Shell},
    web_search, SerperClient,
};
use std::env;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "serper-search")]
#[command(about = "Search the web through the Serper API")]
#[command(version)]
struct Cli {
    /// Load environment variables from this file instead of the nearest .env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Request timeout in milliseconds (overrides SERPER_TIMEOUT_MS)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search and print the results
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u64).range(1..=10))]
        max_results: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "rich")]
        format: OutputFormat,
    },
    /// Prompt for queries until end of input or `:q`
    Interactive {
        /// Do not show the busy spinner
        #[arg(long)]
        no_spinner: bool,
    },
    /// Show what the tool does and how to use it
    About,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Rich,
    Markdown,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command.unwrap_or(Commands::Interactive { no_spinner: false }) {
        Commands::About => {
            handle_about(cli.env_file);
            Ok(())
        }
        Commands::Search {
            query,
            max_results,
            format,
        } => {
            let client = build_client(cli.env_file, cli.timeout_ms)?.with_max_results(max_results as usize);
            handle_search(&client, &query, format).await
        }
        Commands::Interactive { no_spinner } => {
            let client = build_client(cli.env_file, cli.timeout_ms)?;
            handle_interactive(&client, !no_spinner).await
        }
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();
}

/// Load configuration up front so a missing key is reported before any query
fn build_client(env_file: Option<PathBuf>, timeout_ms: Option<u64>) -> Result<SerperClient> {
    let mut config = Config::load(env_file.as_deref()).context("Failed to load configuration")?;
    if let Some(timeout_ms) = timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    log::debug!("Using endpoint {} (timeout {}ms)", config.endpoint, config.timeout_ms);

    SerperClient::new(&config).context("Failed to create Serper client")
}

async fn handle_search(client: &SerperClient, query: &str, format: OutputFormat) -> Result<()> {
    let outcome = web_search(client, query).await;

    match format {
        OutputFormat::Json => {
            let results = outcome?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Markdown => {
            println!("{}", render_outcome(&outcome));
        }
        OutputFormat::Rich => {
            println!("{}", "📊 Search Results:".bold());
            println!("{}", shell::render_rich(&render_outcome(&outcome)));
        }
    }

    Ok(())
}

async fn handle_interactive(client: &SerperClient, spinner: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let searches = Shell::new(client, stdin.lock(), stdout.lock())
        .with_spinner(spinner)
        .run()
        .await?;
    log::debug!("Interactive session ended after {searches} searches");
    Ok(())
}

fn handle_about(env_file: Option<PathBuf>) {
    match env_file {
        Some(path) => {
            if let Err(e) = dotenv::from_path(&path) {
                eprintln!("{} Could not load env file {}: {e}", "⚠".yellow(), path.display());
            }
        }
        None => {
            dotenv::dotenv().ok();
        }
    }

    println!("{}\n", shell::banner());
    println!("{}", shell::about_panel());
    println!("{}", shell::usage_panel());

    let configured = env::var(API_KEY_VAR).map(|v| !v.trim().is_empty()).unwrap_or(false);
    let status = if configured { "✅".green() } else { "❌".red() };
    println!("{} {} - {}", status, API_KEY_VAR.bold(), "required".italic());
    if !configured {
        println!("export {API_KEY_VAR}=your_key");
    }
}
