//! # PubMed Paper Fetcher
//!
//! Queries the PubMed E-utilities API for papers matching a search term,
//! flags authors affiliated with commercial (non-academic) organizations
//! using keyword heuristics, and writes a structured CSV report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_paper_fetcher::{ClientConfig, PaperFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("your_api_key_here");
//!     let fetcher = PaperFetcher::new(config)?;
//!
//!     let records = fetcher.run("cancer immunotherapy", 20).await?;
//!     for record in &records {
//!         println!("{}: {}", record.pmid, record.title);
//!         println!("  company authors: {}", record.non_academic_authors.join(", "));
//!     }
//!
//!     pubmed_paper_fetcher::output::save_to_csv(&records, "pubmed_papers.csv")?;
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod retry;

// Re-export main types for convenience
pub use classify::{extract_company_authors, COMPANY_KEYWORDS};
pub use client::EutilsClient;
pub use config::{ClientConfig, DEFAULT_MAX_RESULTS};
pub use error::{PubMedError, Result};
pub use models::{AuthorEntry, PaperRecord};
pub use output::{save_to_csv, DEFAULT_CSV_FILENAME};
pub use parser::PubMedXmlParser;
pub use pipeline::PaperFetcher;
pub use retry::RetryPolicy;
