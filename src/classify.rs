//! Heuristic classification of author affiliations as commercial vs academic.

use crate::models::AuthorEntry;

/// Substrings that flag an affiliation as commercial (non-academic)
///
/// Matching is case-insensitive and unanchored, so "BioTech Pharmaceuticals
/// Ltd" matches via "Biotech" anywhere in the phrase.
pub const COMPANY_KEYWORDS: &[&str] = &[
    "Pharma",
    "Biotech",
    "Inc.",
    "Ltd",
    "Corporation",
    "Laboratories",
    "Synapse",
    "Genomics",
    "Therapeutics",
    "Biosciences",
    "Pathology",
    "Diagnostics",
    "Life Sciences",
    "Biomedical",
    "Biopharma",
    "Research Institute",
    "Technologies",
    "Laboratory",
    "Neurosciences",
    "Health Solutions",
    "GmbH",
    "LLC",
    "S.A.",
    "Pvt Ltd",
];

/// Filter author entries down to those with a company-keyword affiliation.
///
/// Returns two index-aligned vectors: the matching authors' names and their
/// original (non-normalized) affiliation strings, both in input order.
/// Entries with no matching keyword are dropped from both outputs; academic
/// authors are implicitly everyone absent from the result.
pub fn extract_company_authors(authors: &[AuthorEntry]) -> (Vec<String>, Vec<String>) {
    let mut non_academic_authors = Vec::new();
    let mut company_affiliations = Vec::new();

    for entry in authors {
        let affiliation_clean = entry.affiliation.trim().to_lowercase();
        if COMPANY_KEYWORDS
            .iter()
            .any(|keyword| affiliation_clean.contains(&keyword.to_lowercase()))
        {
            non_academic_authors.push(entry.name.clone());
            company_affiliations.push(entry.affiliation.clone());
        }
    }

    (non_academic_authors, company_affiliations)
}
