use std::time::Duration;

use crate::error::{PubMedError, Result};
use crate::retry::RetryPolicy;

/// Base URL for the NCBI E-utilities API
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Per-attempt HTTP request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of search results to request
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Configuration for the PubMed client
///
/// An API key is required: NCBI throttles keyless clients hard enough that
/// unattended runs become unreliable, and the CLI refuses to start without one.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Create a configuration with the given NCBI API key
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_paper_fetcher::ClientConfig;
    ///
    /// let config = ClientConfig::new("your_api_key_here");
    /// ```
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout: REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the API base URL (used by tests to point at a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the per-attempt request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The effective base URL for API requests
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Validate the configuration before any network activity
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(PubMedError::InvalidConfig {
                message: "API key must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_base_url() {
        let config = ClientConfig::new("key");
        assert_eq!(config.effective_base_url(), DEFAULT_BASE_URL);

        let config = ClientConfig::new("key").with_base_url("http://localhost:8080");
        assert_eq!(config.effective_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        assert!(ClientConfig::new("key").validate().is_ok());
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("   ").validate().is_err());
    }
}
