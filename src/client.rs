use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::retry::with_retry;

/// ESearch JSON response envelope
#[derive(Debug, Deserialize)]
struct ESearchResult {
    esearchresult: ESearchData,
}

#[derive(Debug, Deserialize)]
struct ESearchData {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Retry-wrapped client for the NCBI ESearch and EFetch endpoints
#[derive(Clone)]
pub struct EutilsClient {
    client: Client,
    config: ClientConfig,
}

impl EutilsClient {
    /// Build a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    /// Search PubMed and return matching PMIDs, bounded by `max_results`
    ///
    /// Identifiers come back in the API's relevance order. A genuinely empty
    /// result set is `Ok(vec![])`; exhausted retries surface as
    /// [`PubMedError::RetriesExhausted`] so the caller can tell the two apart.
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn search_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        info!("Sending query to PubMed");

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmode=json&retmax={}&api_key={}",
            self.config.effective_base_url(),
            urlencoding::encode(query),
            max_results,
            urlencoding::encode(self.config.api_key()),
        );

        let result: ESearchResult = with_retry(&self.config.retry, || {
            let url = url.clone();
            async move {
                let response = self.checked_get(&url).await?;
                let parsed = response.json::<ESearchResult>().await?;
                Ok(parsed)
            }
        })
        .await?;

        let ids = result.esearchresult.idlist;
        info!(results_found = ids.len(), "Search completed");
        Ok(ids)
    }

    /// Fetch the full bibliographic XML for a batch of PMIDs
    ///
    /// Returns an empty string without a round trip when `ids` is empty.
    #[instrument(skip(self), fields(id_count = ids.len()))]
    pub async fn fetch_xml(&self, ids: &[String]) -> Result<String> {
        if ids.is_empty() {
            debug!("No identifiers to fetch, skipping EFetch request");
            return Ok(String::new());
        }

        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml&api_key={}",
            self.config.effective_base_url(),
            ids.join(","),
            urlencoding::encode(self.config.api_key()),
        );

        let xml = with_retry(&self.config.retry, || {
            let url = url.clone();
            async move {
                let response = self.checked_get(&url).await?;
                let body = response.text().await?;
                Ok(body)
            }
        })
        .await?;

        debug!(bytes = xml.len(), "Fetched article XML");
        Ok(xml)
    }

    /// Issue one GET and map non-success statuses to transient error kinds
    async fn checked_get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("API rate limit hit (429)");
            return Err(PubMedError::RateLimited);
        }
        if !status.is_success() {
            return Err(PubMedError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            });
        }

        Ok(response)
    }
}
