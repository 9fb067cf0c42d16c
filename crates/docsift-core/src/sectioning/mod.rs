//! Section extraction: heuristic segmentation of raw page text into
//! titled sections.
//!
//! There is no styling channel to lean on, so header detection is a
//! cascade of cheap structural checks (see `header`), and content is
//! whatever readable text follows the accepted header line.

pub mod clean;
pub mod header;

use crate::model::{Document, Section};

/// Strictness configuration for section extraction.
///
/// One explicit value carries every tunable the extractor consults:
/// length windows, the rejection word tables, and the content
/// collection bounds. `Default` holds the canonical tuning.
#[derive(Debug, Clone, Copy)]
pub struct SectionRules {
    /// Shortest line accepted as a header.
    pub min_header_len: usize,
    /// Longest line accepted as a header.
    pub max_header_len: usize,
    /// Lowercase prefixes that mark a continuation line.
    pub connector_prefixes: &'static [&'static str],
    /// Lowercase suffixes that leave a line dangling.
    pub dangling_suffixes: &'static [&'static str],
    /// Lead words of guide-style titles.
    pub guide_lead_words: &'static [&'static str],
    /// Words that rescue short title-like lines.
    pub marker_words: &'static [&'static str],
    /// Minimum non-blank characters the lines after a header must carry.
    pub min_following_chars: usize,
    /// How many lines below a header are scanned for content.
    pub max_content_lines: usize,
    /// Stop collecting content once this many characters accumulate.
    pub content_char_budget: usize,
    /// Sections with cleaned content at or below this are discarded.
    pub min_content_len: usize,
}

impl Default for SectionRules {
    fn default() -> Self {
        SectionRules {
            min_header_len: 15,
            max_header_len: 100,
            connector_prefixes: header::CONNECTOR_PREFIXES,
            dangling_suffixes: header::DANGLING_SUFFIXES,
            guide_lead_words: header::GUIDE_LEAD_WORDS,
            marker_words: header::MARKER_WORDS,
            min_following_chars: 30,
            max_content_lines: 15,
            content_char_budget: 200,
            min_content_len: 50,
        }
    }
}

/// Sentence openers that keep a title-cased line inside a content run.
///
/// Slightly wider than the set used for header validation: articles are
/// common at the start of body sentences.
const CONTENT_STARTERS: &[&str] = &["the ", "this ", "it ", "you ", "a ", "an "];

/// Extract every section from a document, in page order and then
/// in-page top-to-bottom discovery order.
///
/// All decisions in here are policy: a page that yields nothing is not
/// an error, and a candidate whose cleaned content falls at or below
/// the minimum is dropped silently.
pub fn extract_sections(document: &Document, rules: &SectionRules) -> Vec<Section> {
    let mut sections = Vec::new();

    for page in &document.pages {
        if page.text.trim().is_empty() {
            continue;
        }
        let lines: Vec<&str> = page.text.lines().map(str::trim).collect();

        for (i, &line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            if !header::is_section_header(line, &lines, i, rules) {
                continue;
            }

            let content = collect_content(&lines, i, rules);
            if content.chars().count() > rules.min_content_len {
                sections.push(Section::new(
                    document.filename.clone(),
                    page.page_number,
                    line,
                    content,
                ));
            }
        }
    }

    sections
}

/// Gather the content belonging to an accepted header: scan a bounded
/// window of following lines, stopping at the next header-shaped line
/// or once enough characters accumulate, then clean the joined text.
fn collect_content(lines: &[&str], header_index: usize, rules: &SectionRules) -> String {
    let mut collected: Vec<&str> = Vec::new();
    let mut total = 0usize;

    let end = (header_index + rules.max_content_lines).min(lines.len());
    for &line in &lines[header_index + 1..end] {
        if line.is_empty() {
            continue;
        }
        if header::header_shaped(line) && !header::starts_with_any(line, CONTENT_STARTERS) {
            break;
        }

        if !collected.is_empty() {
            total += 1;
        }
        total += line.chars().count();
        collected.push(line);

        if total > rules.content_char_budget {
            break;
        }
    }

    clean::clean_text(&collected.join(" "))
}
