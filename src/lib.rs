//! # Serper Search
//!
//! Search the web through the [Serper](https://serper.dev) Google Search API and get
//! the top results back as formatted text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serper_search::{config::Config, search_internet, SerperClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads SERPER_API_KEY (and a .env file, if present)
//!     let config = Config::load(None)?;
//!     let client = SerperClient::new(&config)?;
//!
//!     // Always returns display text, even when the search fails
//!     let text = search_internet(&client, "Rust programming language").await;
//!     println!("{text}");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod serper;
pub mod shell;
pub mod types;
pub mod utils;

// Re-export common types
pub use config::{ApiCredential, Config};
pub use error::{ErrorKind, SearchError, SearchResult as Result};
pub use serper::SerperClient;
pub use types::{Query, ResultSet, SearchResult};

/// Search and return the typed result set
///
/// # Arguments
///
/// * `client` - Configured Serper client
/// * `query` - Free-text query; must not be blank
///
/// # Examples
///
/// ```rust,no_run
/// use serper_search::{web_search, ApiCredential, Config, SerperClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::new(ApiCredential::new("api_key")?);
/// let client = SerperClient::new(&config)?;
/// for result in web_search(&client, "rust programming").await? {
///     println!("{}: {}", result.title, result.link);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn web_search(client: &SerperClient, query: &str) -> Result<ResultSet> {
    let query = Query::new(query)?;

    let results = client.search(&query).await?;
    log::debug!("Received {} results from {}", results.len(), client.name());
    Ok(results)
}

/// Search and return display text. Never fails: provider errors become an
/// apology, other failures become a `Search failed: ...` line.
pub async fn search_internet(client: &SerperClient, query: &str) -> String {
    format::render_outcome(&web_search(client, query).await)
}
