//! Core types for the Serper search client

use crate::error::{SearchError, SearchResult as Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of results shown for a query
pub const TOP_RESULTS: usize = 4;

/// A non-empty search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Create a query, rejecting empty or whitespace-only text
    pub fn new(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(SearchError::InvalidInput(
                "Query cannot be empty".to_string(),
            ));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One organic web result returned by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the web page
    pub title: String,
    /// URL of the web page
    pub link: String,
    /// Snippet/description of the web page
    pub snippet: String,
}

impl SearchResult {
    pub fn new(title: &str, link: &str, snippet: &str) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
        }
    }
}

/// Results for one query, in provider ranking order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<SearchResult>,
}

impl ResultSet {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.results.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl FromIterator<SearchResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = SearchResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
