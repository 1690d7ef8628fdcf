use std::time::Duration;

use thiserror::Error;

/// Error types for PubMed fetch operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed (connection error, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {message}")]
    XmlParse { message: String },

    /// API rate limit exceeded (HTTP 429)
    #[error("API rate limit exceeded")]
    RateLimited,

    /// Non-success HTTP status from the API
    #[error("API error: HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// All retry attempts were exhausted
    #[error("retries exhausted after {attempts} attempts over {elapsed:?}: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        elapsed: Duration,
        last_error: String,
    },

    /// Invalid configuration supplied to the client
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Writing the CSV report failed
    #[error("failed to write CSV report: {0}")]
    CsvWrite(#[from] std::io::Error),
}

impl PubMedError {
    /// Whether this error is worth retrying.
    ///
    /// The upstream API rate-limits aggressively and intermittently returns
    /// 5xx, so every HTTP-level failure is treated as transient. Parse and
    /// configuration errors are permanent.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PubMedError::RequestError(_)
                | PubMedError::RateLimited
                | PubMedError::HttpStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PubMedError>;
