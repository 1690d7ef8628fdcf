use std::io::BufReader;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, instrument};

use crate::classify::extract_company_authors;
use crate::error::{PubMedError, Result};
use crate::models::{
    AuthorEntry, PaperRecord, MISSING_AFFILIATION, MISSING_DATE, MISSING_EMAIL, MISSING_PMID,
    MISSING_TITLE,
};

/// Streaming parser for EFetch `PubmedArticleSet` documents
pub struct PubMedXmlParser;

/// Per-article accumulator, reset at each `<PubmedArticle>` boundary
#[derive(Default)]
struct ArticleState {
    pmid: Option<String>,
    title: Option<String>,
    // (year, month, day), each independently optional
    date_parts: Option<(String, String, String)>,
    authors: Vec<AuthorEntry>,
    current_fore: String,
    current_last: String,
    current_affiliation: Option<String>,
}

impl ArticleState {
    fn finish_author(&mut self) {
        let name = format!("{} {}", self.current_fore, self.current_last)
            .trim()
            .to_string();
        let affiliation = self
            .current_affiliation
            .take()
            .unwrap_or_else(|| MISSING_AFFILIATION.to_string());
        self.authors.push(AuthorEntry::new(name, affiliation));
        self.current_fore.clear();
        self.current_last.clear();
    }

    fn into_record(self) -> PaperRecord {
        let pub_date = match self.date_parts {
            Some((year, month, day)) => format!("{year}-{month}-{day}"),
            None => MISSING_DATE.to_string(),
        };

        // First affiliation text containing an email marker, document order
        let corresponding_email = self
            .authors
            .iter()
            .find(|entry| entry.affiliation.contains('@'))
            .map(|entry| entry.affiliation.trim().to_string())
            .unwrap_or_else(|| MISSING_EMAIL.to_string());

        let (non_academic_authors, company_affiliations) =
            extract_company_authors(&self.authors);

        PaperRecord {
            pmid: self.pmid.unwrap_or_else(|| MISSING_PMID.to_string()),
            title: self.title.unwrap_or_else(|| MISSING_TITLE.to_string()),
            pub_date,
            non_academic_authors,
            company_affiliations,
            corresponding_email,
        }
    }
}

impl PubMedXmlParser {
    /// Parse all `<PubmedArticle>` records from an EFetch XML response
    ///
    /// Output order is document order. Missing optional fields fall back to
    /// placeholders and never error; an unparseable document is fatal for the
    /// whole call, with no partial results.
    #[instrument(skip(xml), fields(xml_size = xml.len()))]
    pub fn parse_articles(xml: &str) -> Result<Vec<PaperRecord>> {
        let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));
        reader.config_mut().trim_text(true);

        let mut records: Vec<PaperRecord> = Vec::new();
        let mut article: Option<ArticleState> = None;

        let mut in_pmid = false;
        let mut in_article_title = false;
        let mut in_pub_date = false;
        let mut in_year = false;
        let mut in_month = false;
        let mut in_day = false;
        let mut in_author = false;
        let mut in_fore_name = false;
        let mut in_last_name = false;
        let mut in_affiliation = false;

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"PubmedArticle" => article = Some(ArticleState::default()),
                    b"PMID" => {
                        // Only the citation's own PMID; articles can embed
                        // further PMID elements in comment/correction blocks
                        if let Some(state) = article.as_ref() {
                            if state.pmid.is_none() && !in_author {
                                in_pmid = true;
                            }
                        }
                    }
                    b"ArticleTitle" => {
                        if article.is_some() {
                            in_article_title = true;
                        }
                    }
                    b"PubDate" => {
                        if let Some(state) = article.as_mut() {
                            if state.date_parts.is_none() {
                                state.date_parts =
                                    Some((String::new(), String::new(), String::new()));
                                in_pub_date = true;
                            }
                        }
                    }
                    b"Year" if in_pub_date => in_year = true,
                    b"Month" if in_pub_date => in_month = true,
                    b"Day" if in_pub_date => in_day = true,
                    b"Author" => {
                        if article.is_some() {
                            in_author = true;
                        }
                    }
                    b"ForeName" if in_author => in_fore_name = true,
                    b"LastName" if in_author => in_last_name = true,
                    b"Affiliation" if in_author => in_affiliation = true,
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"PubmedArticle" => {
                        if let Some(state) = article.take() {
                            records.push(state.into_record());
                        }
                    }
                    b"PMID" => in_pmid = false,
                    b"ArticleTitle" => in_article_title = false,
                    b"PubDate" => in_pub_date = false,
                    b"Year" => in_year = false,
                    b"Month" => in_month = false,
                    b"Day" => in_day = false,
                    b"Author" => {
                        if in_author {
                            if let Some(state) = article.as_mut() {
                                state.finish_author();
                            }
                            in_author = false;
                        }
                    }
                    b"ForeName" => in_fore_name = false,
                    b"LastName" => in_last_name = false,
                    b"Affiliation" => in_affiliation = false,
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| PubMedError::XmlParse {
                            message: format!("failed to decode XML text: {e}"),
                        })?
                        .into_owned();

                    if let Some(state) = article.as_mut() {
                        if in_pmid {
                            state.pmid = Some(text);
                        } else if in_article_title {
                            match state.title.as_mut() {
                                Some(title) => title.push_str(&text),
                                None => state.title = Some(text),
                            }
                        } else if in_year && in_pub_date {
                            if let Some((year, _, _)) = state.date_parts.as_mut() {
                                *year = text;
                            }
                        } else if in_month && in_pub_date {
                            if let Some((_, month, _)) = state.date_parts.as_mut() {
                                *month = text;
                            }
                        } else if in_day && in_pub_date {
                            if let Some((_, _, day)) = state.date_parts.as_mut() {
                                *day = text;
                            }
                        } else if in_fore_name && in_author {
                            state.current_fore = text;
                        } else if in_last_name && in_author {
                            state.current_last = text;
                        } else if in_affiliation && in_author {
                            // First affiliation per author wins, matching the
                            // descendant lookup order of the source format
                            if state.current_affiliation.is_none() {
                                state.current_affiliation = Some(text);
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(PubMedError::XmlParse {
                        message: format!("XML parsing error: {e}"),
                    });
                }
                _ => {}
            }
            buf.clear();
        }

        debug!(records_parsed = records.len(), "Completed XML parsing");
        Ok(records)
    }
}
