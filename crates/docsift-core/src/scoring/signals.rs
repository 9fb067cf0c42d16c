//! The four relevance sub-scores, each normalized to [0, 1].
//!
//! Band checks taper toward a floor instead of cutting to zero, so a
//! slightly-too-long title or an oversized section loses a little score
//! rather than disappearing from the ranking.

use std::collections::BTreeSet;

use crate::model::Section;
use crate::persona;

/// Keyword overlap against the persona keyword set.
///
/// A keyword present as a whole token in the section scores 2 points, a
/// keyword present only as a substring of the lowercased text scores 1,
/// normalized by the 2-point maximum. Empty keyword sets score 0.0.
pub fn keyword_overlap(
    keywords: &BTreeSet<String>,
    section_tokens: &BTreeSet<String>,
    section_text: &str,
) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let mut points = 0usize;
    for keyword in keywords {
        if section_tokens.contains(keyword) {
            points += 2;
        } else if section_text.contains(keyword.as_str()) {
            points += 1;
        }
    }
    points as f64 / (2 * keywords.len()) as f64
}

/// Jaccard similarity between the section's token set and the combined
/// query's token set.
pub fn query_similarity(
    section_tokens: &BTreeSet<String>,
    query_tokens: &BTreeSet<String>,
) -> f64 {
    if section_tokens.is_empty() || query_tokens.is_empty() {
        return 0.0;
    }
    let intersection = section_tokens.intersection(query_tokens).count();
    let union = section_tokens.union(query_tokens).count();
    intersection as f64 / union as f64
}

/// Intrinsic section quality, independent of the persona.
///
/// Average of four tapering factors: title length band, capital-initial
/// title, multi-word title, and content length band.
pub fn section_quality(section: &Section) -> f64 {
    let title_len = section.section_title.chars().count() as f64;
    let title_band = band_taper(title_len, 10.0, 80.0, 0.3, 0.4);
    let capital_initial = if section
        .section_title
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase())
    {
        1.0
    } else {
        0.5
    };
    let multi_word = if section.section_title.split_whitespace().count() >= 2 {
        1.0
    } else {
        0.6
    };
    let length_band = band_taper(section.word_count as f64, 50.0, 500.0, 0.3, 0.4);

    (title_band + capital_initial + multi_word + length_band) / 4.0
}

/// Completeness of the section as an extraction unit: structural markers
/// in the content plus lexical alignment between title and content.
pub fn completeness(section: &Section) -> f64 {
    let structure = structure_factor(&section.content);
    let alignment = alignment_factor(&section.section_title, &section.content);
    (structure + alignment) / 2.0
}

/// 1.0 inside [lo, hi]; below, a linear ramp from `below_floor` at zero;
/// above, a linear decay clamped at `above_floor`.
fn band_taper(value: f64, lo: f64, hi: f64, below_floor: f64, above_floor: f64) -> f64 {
    if value < lo {
        below_floor + (1.0 - below_floor) * (value / lo)
    } else if value > hi {
        let overshoot = (value - hi) / hi;
        (1.0 - overshoot).max(above_floor)
    } else {
        1.0
    }
}

/// Sentence punctuation density plus the presence of a numbered-list
/// marker.
fn structure_factor(content: &str) -> f64 {
    let chars = content.chars().count();
    if chars == 0 {
        return 0.0;
    }
    let punctuation = content
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count();
    let per_100 = punctuation as f64 * 100.0 / chars as f64;
    let density = (per_100 / 2.0).min(1.0);
    let marker = if has_list_marker(content) { 1.0 } else { 0.0 };
    0.7 * density + 0.3 * marker
}

/// Fraction of title tokens that also appear in the content.
fn alignment_factor(title: &str, content: &str) -> f64 {
    let title_tokens = persona::token_set(title);
    if title_tokens.is_empty() {
        return 0.0;
    }
    let content_tokens = persona::token_set(content);
    let present = title_tokens
        .iter()
        .filter(|t| content_tokens.contains(*t))
        .count();
    present as f64 / title_tokens.len() as f64
}

/// True when any whitespace-separated word is a one- or two-digit
/// enumerator such as "1." or "12)".
fn has_list_marker(content: &str) -> bool {
    content.split_whitespace().any(is_enumerator)
}

fn is_enumerator(word: &str) -> bool {
    let bytes = word.as_bytes();
    if bytes.len() < 2 || bytes.len() > 3 {
        return false;
    }
    let (digits, tail) = bytes.split_at(bytes.len() - 1);
    matches!(tail[0], b'.' | b')') && digits.iter().all(|b| b.is_ascii_digit())
}
