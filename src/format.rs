//! Display text for search outcomes

use crate::error::{ErrorKind, SearchError, SearchResult as Result};
use crate::types::{ResultSet, SearchResult};

/// Shown when the provider answers without an `organic` field
pub const NO_RESULTS_MESSAGE: &str = "Apologies, I couldn't locate any results for that query. \
The problem might be with your Serper API key.";

/// Line closing each formatted entry
pub const ENTRY_DELIMITER: &str = "---";

pub const LINK_MARKER: &str = "🔗";
pub const SNIPPET_MARKER: &str = "📝";

/// Format one entry as a bold title line, a link line and a snippet line
pub fn format_entry(result: &SearchResult) -> String {
    format!(
        "\n**{}**\n{LINK_MARKER} {}\n{SNIPPET_MARKER} {}\n{ENTRY_DELIMITER}\n",
        result.title, result.link, result.snippet
    )
}

/// Format every entry of a result set. An empty set formats to an empty string.
pub fn format_results(results: &ResultSet) -> String {
    results
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text for a failed search
pub fn format_error(error: &SearchError) -> String {
    match error.kind() {
        ErrorKind::Provider => NO_RESULTS_MESSAGE.to_string(),
        _ => format!("Search failed: {error}"),
    }
}

/// Text for any search outcome
pub fn render_outcome(outcome: &Result<ResultSet>) -> String {
    match outcome {
        Ok(results) => format_results(results),
        Err(error) => format_error(error),
    }
}
