//! Serper (google.serper.dev) search client

use crate::{
    config::{ApiCredential, Config},
    error::{SearchError, SearchResult as Result},
    types::{Query, ResultSet, SearchResult, TOP_RESULTS},
    utils::http::HttpClient,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Largest result slice the client will hand out
pub const MAX_RESULTS_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
}

/// One organic entry. Every field is optional so a malformed entry decodes
/// instead of failing the whole response.
#[derive(Debug, Deserialize)]
struct SerperOrganicEntry {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// What to do with a single organic entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDecision {
    Keep(SearchResult),
    Skip(&'static str),
}

/// Decide whether an organic entry is complete enough to show
pub fn decode_entry(value: &Value) -> EntryDecision {
    if !value.is_object() {
        return EntryDecision::Skip("entry is not an object");
    }

    let entry: SerperOrganicEntry = match serde_json::from_value(value.clone()) {
        Ok(entry) => entry,
        Err(_) => return EntryDecision::Skip("entry has non-string fields"),
    };

    match (entry.title, entry.link, entry.snippet) {
        (Some(title), Some(link), Some(snippet)) => {
            EntryDecision::Keep(SearchResult { title, link, snippet })
        }
        (None, _, _) => EntryDecision::Skip("missing title"),
        (_, None, _) => EntryDecision::Skip("missing link"),
        (_, _, None) => EntryDecision::Skip("missing snippet"),
    }
}

/// Turn a decoded response body into a result set.
///
/// Only the first `max_results` entries are considered; incomplete ones among
/// them are dropped, not replaced by later entries.
pub fn extract_results(body: &Value, status: u16, max_results: usize) -> Result<ResultSet> {
    let object = body.as_object().ok_or_else(|| {
        SearchError::ParseError("Serper response is not a JSON object".to_string())
    })?;

    let organic = match object.get("organic") {
        Some(organic) => organic,
        None => {
            let message = object
                .get("message")
                .or_else(|| object.get("error"))
                .and_then(Value::as_str)
                .unwrap_or("response has no organic results")
                .to_string();
            return Err(SearchError::ProviderError {
                message,
                status_code: Some(status),
            });
        }
    };

    let entries = organic.as_array().ok_or_else(|| {
        SearchError::ParseError("Serper 'organic' field is not an array".to_string())
    })?;

    let results = entries
        .iter()
        .take(max_results)
        .enumerate()
        .filter_map(|(position, entry)| match decode_entry(entry) {
            EntryDecision::Keep(result) => Some(result),
            EntryDecision::Skip(reason) => {
                debug!("Skipping organic entry {}: {reason}", position + 1);
                None
            }
        })
        .collect();

    Ok(results)
}

/// Client for the Serper search endpoint
#[derive(Debug, Clone)]
pub struct SerperClient {
    http: HttpClient,
    credential: ApiCredential,
    endpoint: String,
    max_results: usize,
}

impl SerperClient {
    pub fn new(config: &Config) -> Result<Self> {
        url::Url::parse(&config.endpoint).map_err(|e| {
            SearchError::ConfigError(format!("Invalid Serper endpoint '{}': {e}", config.endpoint))
        })?;

        Ok(Self {
            http: HttpClient::with_timeout(config.timeout_ms)?,
            credential: config.credential.clone(),
            endpoint: config.endpoint.clone(),
            max_results: TOP_RESULTS,
        })
    }

    /// Set custom endpoint URL (for testing or proxies)
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set how many results to keep, between 1 and [`MAX_RESULTS_LIMIT`]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.clamp(1, MAX_RESULTS_LIMIT);
        self
    }

    pub fn name(&self) -> &str {
        "serper"
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Run one search. Exactly one request is sent; nothing is retried.
    pub async fn search(&self, query: &Query) -> Result<ResultSet> {
        debug!(
            "POST {} (query: {} chars, keeping {})",
            self.endpoint,
            query.as_str().chars().count(),
            self.max_results
        );

        let response = self
            .http
            .post_json_with_headers(
                &self.endpoint,
                &SerperRequest { q: query.as_str() },
                &[("X-API-KEY", self.credential.expose())],
            )
            .await
            .map_err(|e| {
                warn!("Serper request failed: {e}");
                e
            })?;

        debug!(
            "Serper responded with status {} ({} bytes)",
            response.status,
            response.body.len()
        );

        let body: Value = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            Err(e) if response.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(SearchError::HttpError {
                    message: format!("Serper request failed with status {}", response.status),
                    status_code: Some(response.status),
                    response_body: Some(response.body),
                });
            }
        };

        extract_results(&body, response.status, self.max_results).map_err(|e| {
            warn!("Serper returned no usable results: {e}");
            e
        })
    }

    /// Get client configuration (for debugging/logging)
    pub fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert("provider".to_string(), self.name().to_string());
        config.insert("api_key".to_string(), "***".to_string());
        config.insert("endpoint".to_string(), self.endpoint.clone());
        config.insert("max_results".to_string(), self.max_results.to_string());
        config.insert("timeout_ms".to_string(), self.http.timeout_ms().to_string());
        config
    }
}
