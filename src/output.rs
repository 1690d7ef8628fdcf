//! CSV report writing for fetched paper records.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::PaperRecord;

/// Default output filename when none is given on the command line
pub const DEFAULT_CSV_FILENAME: &str = "pubmed_papers.csv";

/// Fixed column order of the report
pub const CSV_HEADERS: [&str; 6] = [
    "PubMedID",
    "Title",
    "Publication Date",
    "Non-academic Authors",
    "Company Affiliations",
    "Corresponding Author Email",
];

/// Render records as CSV text, header row included
///
/// Multi-value fields are comma-joined into a single cell. Zero records still
/// produce the header row, never an empty document.
pub fn render_csv(records: &[PaperRecord]) -> String {
    let mut output = String::new();
    output.push_str(&CSV_HEADERS.join(","));
    output.push('\n');

    for record in records {
        let row = [
            csv_escape(&record.pmid),
            csv_escape(&record.title),
            csv_escape(&record.pub_date),
            csv_escape(&record.non_academic_authors.join(", ")),
            csv_escape(&record.company_affiliations.join(", ")),
            csv_escape(&record.corresponding_email),
        ];
        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

/// Write the CSV report to disk
pub fn save_to_csv(records: &[PaperRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_csv(records))?;
    info!(records = records.len(), path = %path.display(), "Results saved to CSV");
    Ok(())
}

/// Quote a cell when it contains a delimiter, quote, or newline
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PaperRecord {
        PaperRecord {
            pmid: "12345678".to_string(),
            title: "A study of things, revisited".to_string(),
            pub_date: "2023-Jun-15".to_string(),
            non_academic_authors: vec!["Jane Doe".to_string()],
            company_affiliations: vec!["Acme Biotech Inc., Boston".to_string()],
            corresponding_email: "jane.doe@acmebiotech.com".to_string(),
        }
    }

    #[test]
    fn test_zero_records_still_produces_header() {
        let csv = render_csv(&[]);
        assert_eq!(
            csv,
            "PubMedID,Title,Publication Date,Non-academic Authors,Company Affiliations,Corresponding Author Email\n"
        );
    }

    #[test]
    fn test_cells_with_commas_are_quoted() {
        let csv = render_csv(&[sample_record()]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"A study of things, revisited\""));
        assert!(lines[1].contains("\"Acme Biotech Inc., Boston\""));
        assert!(lines[1].contains("jane.doe@acmebiotech.com"));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut record = sample_record();
        record.title = "The \"gold standard\" trial".to_string();
        let csv = render_csv(&[record]);
        assert!(csv.contains("\"The \"\"gold standard\"\" trial\""));
    }

    #[test]
    fn test_multi_value_fields_are_comma_joined() {
        let mut record = sample_record();
        record.non_academic_authors = vec!["A One".to_string(), "B Two".to_string()];
        record.company_affiliations =
            vec!["Acme Inc.".to_string(), "Beta Ltd".to_string()];
        let csv = render_csv(&[record]);
        assert!(csv.contains("\"A One, B Two\""));
        assert!(csv.contains("\"Acme Inc., Beta Ltd\""));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_to_csv(&[sample_record()], &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("PubMedID,"));
        assert_eq!(contents.lines().count(), 2);
    }
}
