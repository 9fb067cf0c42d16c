use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A loaded source document: one entry per PDF file, immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub pages: Vec<Page>,
    pub total_pages: usize,
}

impl Document {
    pub fn new(filename: impl Into<String>, pages: Vec<Page>) -> Document {
        let total_pages = pages.len();
        Document {
            filename: filename.into(),
            pages,
            total_pages,
        }
    }
}

/// Raw extracted text for a single page. Page numbers are 1-indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub page_number: usize,
    pub text: String,
}

/// A contiguous span of document text introduced by a detected header line.
///
/// Invariants upheld by the extractor: `section_title` is non-empty and
/// capital-initial, `content` is cleaned and at least the configured
/// minimum length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub document: String,
    pub page_number: usize,
    pub section_title: String,
    pub content: String,
    pub word_count: usize,
}

impl Section {
    pub fn new(
        document: impl Into<String>,
        page_number: usize,
        section_title: impl Into<String>,
        content: impl Into<String>,
    ) -> Section {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        Section {
            document: document.into(),
            page_number,
            section_title: section_title.into(),
            content,
            word_count,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} p.{}: {}",
            self.document, self.page_number, self.section_title
        )
    }
}

/// Normalized representation of who is asking and what they need.
///
/// Built once per run from the two free-text inputs and consumed read-only
/// by the scorer. `keywords` is a BTreeSet so iteration order (and thus
/// scoring) is deterministic across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaContext {
    pub persona_role: String,
    pub job_task: String,
    pub keywords: BTreeSet<String>,
    pub combined_query: String,
}

/// A section annotated with its composite relevance score and final rank.
///
/// Constructed as a new value from a `Section`; the underlying section is
/// never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSection {
    #[serde(flatten)]
    pub section: Section,
    /// Weighted composite in [0, 1].
    pub relevance_score: f64,
    /// 1-based position in the final ranked set, dense and unique.
    pub importance_rank: usize,
}

/// A shortened, readable excerpt derived from one top-ranked section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subsection {
    pub document: String,
    pub page_number: usize,
    pub refined_text: String,
    pub source_section: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_counts_pages() {
        let doc = Document::new(
            "guide.pdf",
            vec![
                Page {
                    page_number: 1,
                    text: "first".into(),
                },
                Page {
                    page_number: 2,
                    text: "second".into(),
                },
            ],
        );
        assert_eq!(doc.total_pages, 2);
    }

    #[test]
    fn test_section_word_count() {
        let s = Section::new("a.pdf", 1, "Title Here", "three little words");
        assert_eq!(s.word_count, 3);
    }

    #[test]
    fn test_scored_section_serializes_flat() {
        let scored = ScoredSection {
            section: Section::new("a.pdf", 2, "City Highlights", "words in the body"),
            relevance_score: 0.5,
            importance_rank: 1,
        };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["document"], "a.pdf");
        assert_eq!(json["section_title"], "City Highlights");
        assert_eq!(json["importance_rank"], 1);
    }
}
