use tracing::{error, info, instrument};

use crate::client::EutilsClient;
use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::models::PaperRecord;
use crate::parser::PubMedXmlParser;

/// End-to-end pipeline: query → search → fetch → parse → records
#[derive(Clone)]
pub struct PaperFetcher {
    client: EutilsClient,
}

impl PaperFetcher {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: EutilsClient::new(config)?,
        })
    }

    /// Run one query end to end and return fully-formed records
    ///
    /// There is no partial-success outcome: either every fetched article is
    /// parsed into a record, or the run yields an empty list. Exhausted
    /// retries on search or fetch degrade to an empty list (logged at error
    /// level); an unparseable XML payload is fatal and propagates.
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn run(&self, query: &str, max_results: usize) -> Result<Vec<PaperRecord>> {
        let ids = match self.client.search_ids(query, max_results).await {
            Ok(ids) => ids,
            Err(PubMedError::RetriesExhausted { .. }) => {
                error!("Search failed after exhausting retries, treating as no results");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        if ids.is_empty() {
            info!("No papers found");
            return Ok(Vec::new());
        }

        info!(papers_found = ids.len(), "Fetching paper details");

        let xml = match self.client.fetch_xml(&ids).await {
            Ok(xml) => xml,
            Err(PubMedError::RetriesExhausted { .. }) => {
                error!("Fetch failed after exhausting retries, treating as no results");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        if xml.is_empty() {
            return Ok(Vec::new());
        }

        PubMedXmlParser::parse_articles(&xml)
    }
}
