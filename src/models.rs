use serde::{Deserialize, Serialize};

/// Placeholder when an article carries no PMID
pub const MISSING_PMID: &str = "N/A";

/// Placeholder when an article carries no title
pub const MISSING_TITLE: &str = "No title available";

/// Placeholder when an article carries no `<PubDate>` element at all
pub const MISSING_DATE: &str = "Unknown Date";

/// Placeholder when an author carries no affiliation
pub const MISSING_AFFILIATION: &str = "Unknown Affiliation";

/// Placeholder when no author affiliation contains an email address
pub const MISSING_EMAIL: &str = "Not available";

/// One (name, affiliation) pair extracted from an `<Author>` element
///
/// The name is fore name and last name joined by a space and trimmed; either
/// component may be absent, leaving a partial or empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorEntry {
    pub name: String,
    pub affiliation: String,
}

impl AuthorEntry {
    pub fn new(name: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: affiliation.into(),
        }
    }
}

/// One fully-formed output row
///
/// `non_academic_authors` and `company_affiliations` are index-aligned: the
/// name at position i belongs to the affiliation at position i. Both preserve
/// the order authors appear in the source XML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// PubMed ID, or [`MISSING_PMID`]
    pub pmid: String,
    /// Article title, or [`MISSING_TITLE`]
    pub title: String,
    /// Publication date as `year-month-day` with empty segments for missing
    /// sub-fields, or [`MISSING_DATE`] when no date container exists
    pub pub_date: String,
    /// Names of authors with a company-keyword affiliation, document order
    pub non_academic_authors: Vec<String>,
    /// The matching affiliation strings, index-aligned with the names
    pub company_affiliations: Vec<String>,
    /// First affiliation text containing an `@`, trimmed, or [`MISSING_EMAIL`]
    pub corresponding_email: String,
}
