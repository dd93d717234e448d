//! Error types for the Serper search client

use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Default request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Error types for search operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// HTTP request failed (connection, DNS, unreadable or non-JSON error body)
    #[error("HTTP request failed: {message}")]
    HttpError {
        message: String,
        status_code: Option<u16>,
        response_body: Option<String>,
    },

    /// The request did not complete in time
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider answered, but without any organic results
    #[error("Provider error: {message}")]
    ProviderError {
        message: String,
        status_code: Option<u16>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Response body could not be decoded
    #[error("Parsing error: {0}")]
    ParseError(String),
}

/// Broad failure categories, for callers that branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Provider,
    Config,
    InvalidInput,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::HttpError { .. } | SearchError::Timeout { .. } => ErrorKind::Transport,
            SearchError::ParseError(_) => ErrorKind::Decode,
            SearchError::ProviderError { .. } => ErrorKind::Provider,
            SearchError::ConfigError(_) => ErrorKind::Config,
            SearchError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// HTTP status attached to the error, if the provider answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SearchError::HttpError { status_code, .. }
            | SearchError::ProviderError { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        SearchError::ParseError(format!("JSON parsing failed: {error}"))
    }
}
