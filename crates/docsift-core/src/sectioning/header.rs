//! Header detection predicates.
//!
//! A line qualifies as a section header by surviving a cascade of checks:
//! a length window, continuation-fragment rejection, a leading capital,
//! one of several structural shapes, and finally validation against the
//! surrounding lines.

use super::clean::BULLET_GLYPHS;
use super::SectionRules;

/// Lowercase connectives that mark a line as the tail of a broken sentence.
pub const CONNECTOR_PREFIXES: &[&str] = &[
    "to ", "for ", "with ", "during ", "whether ", "and ", "or ", "but ",
];

/// Trailing words that leave a line grammatically dangling.
pub const DANGLING_SUFFIXES: &[&str] = &[
    " and", " or", " with", " to", " for", " of", " in", " on",
];

/// Lead words typical of guide-style section titles.
pub const GUIDE_LEAD_WORDS: &[&str] =
    &["Comprehensive", "Complete", "Ultimate", "General", "Essential"];

/// Marker words that rescue short title-like lines the shape templates miss.
pub const MARKER_WORDS: &[&str] = &[
    "guide", "tips", "adventures", "experiences", "highlights", "delights",
];

/// Sentence openers: a line starting with one of these is body text even
/// when its casing looks header-like.
pub const SENTENCE_STARTERS: &[&str] = &["the ", "this ", "it ", "you "];

/// Full cascade: is `line` (already trimmed) a section header at position
/// `index` within `lines`?
pub fn is_section_header(
    line: &str,
    lines: &[&str],
    index: usize,
    rules: &SectionRules,
) -> bool {
    let len = line.chars().count();
    if len < rules.min_header_len || len > rules.max_header_len {
        return false;
    }
    if is_continuation_fragment(line, rules) {
        return false;
    }
    if !starts_uppercase(line) {
        return false;
    }
    if matches_template(line, rules) || heuristic_header(line, rules) {
        return validate_context(lines, index, rules);
    }
    false
}

/// Shape check used when peeking at neighboring lines: long enough and
/// cased like a title.
pub fn header_shaped(line: &str) -> bool {
    line.chars().count() > 15 && (is_title_case(line) || is_all_caps(line))
}

/// Does the lowercased line open with any of the given prefixes?
pub fn starts_with_any(line: &str, prefixes: &[&str]) -> bool {
    let lower = line.to_lowercase();
    prefixes.iter().any(|p| lower.starts_with(p))
}

/// Reject fragments of broken sentences and list items: lowercase
/// connective openers, dangling suffixes, bullet lines, and lines that
/// trail off in a comma, semicolon, or colon.
fn is_continuation_fragment(line: &str, rules: &SectionRules) -> bool {
    let lower = line.to_lowercase();
    if rules.connector_prefixes.iter().any(|p| lower.starts_with(p)) {
        return true;
    }
    if rules.dangling_suffixes.iter().any(|s| lower.ends_with(s)) {
        return true;
    }
    if is_bullet_line(line) {
        return true;
    }
    line.ends_with([',', ';', ':'])
}

fn is_bullet_line(line: &str) -> bool {
    match line.chars().next() {
        Some(c) if BULLET_GLYPHS.contains(&c) => true,
        // pdftotext renders some bullets as a bare "o "
        Some('o') => line.starts_with("o "),
        _ => false,
    }
}

fn starts_uppercase(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Titlecase: every alphabetic word opens uppercase and carries no
/// further capitals.
pub fn is_title_case(line: &str) -> bool {
    let mut has_word = false;
    for word in line.split_whitespace() {
        let mut chars = word.chars();
        let Some(first) = chars.next() else { continue };
        if !first.is_alphabetic() {
            continue;
        }
        has_word = true;
        if !first.is_uppercase() || chars.any(|c| c.is_uppercase()) {
            return false;
        }
    }
    has_word
}

/// At least one letter, and every letter uppercase.
pub fn is_all_caps(line: &str) -> bool {
    let mut has_letter = false;
    for c in line.chars() {
        if c.is_alphabetic() {
            has_letter = true;
            if !c.is_uppercase() {
                return false;
            }
        }
    }
    has_letter
}

fn matches_template(line: &str, rules: &SectionRules) -> bool {
    is_capitalized_phrase(line)
        || is_caps_phrase(line)
        || is_guide_style(line, rules.guide_lead_words)
        || is_chapter_heading(line)
        || is_numbered_outline(line)
}

/// Mixed-case phrase of letters and spaces, 16-81 chars, opening uppercase.
fn is_capitalized_phrase(line: &str) -> bool {
    let len = line.chars().count();
    if !(16..=81).contains(&len) {
        return false;
    }
    if !line.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return false;
    }
    letters_and_spaces(line)
}

/// All-caps phrase of letters and spaces, 9-61 chars.
fn is_caps_phrase(line: &str) -> bool {
    let len = line.chars().count();
    if !(9..=61).contains(&len) {
        return false;
    }
    line.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_whitespace())
        && line.chars().any(|c| c.is_ascii_uppercase())
}

/// "Comprehensive Guide To The Coast" and friends: a known lead word
/// followed by a 10-50 char phrase.
fn is_guide_style(line: &str, lead_words: &[&str]) -> bool {
    for lead in lead_words {
        let Some(rest) = line.strip_prefix(lead) else { continue };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let rest = rest.trim_start();
        let len = rest.chars().count();
        if (10..=50).contains(&len) && letters_and_spaces(rest) {
            return true;
        }
    }
    false
}

/// "Chapter 3: Getting Around", "Part 2 Coastal Towns".
fn is_chapter_heading(line: &str) -> bool {
    let Some(rest) = ["Chapter ", "Section ", "Part "]
        .iter()
        .find_map(|p| line.strip_prefix(p))
    else {
        return false;
    };
    let rest = rest.trim_start();
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    let offset: usize = rest.chars().take(digits).map(char::len_utf8).sum();
    let mut rest = &rest[offset..];
    if let Some(stripped) = rest.strip_prefix(':') {
        rest = stripped;
    }
    let rest = rest.trim_start();
    if !rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return false;
    }
    let len = rest.chars().count();
    (6..=51).contains(&len) && letters_and_spaces(rest)
}

/// "2.1 Packing For The Season" style outline numbering.
fn is_numbered_outline(line: &str) -> bool {
    let Some((number, rest)) = line.split_once(char::is_whitespace) else {
        return false;
    };
    let numeric = number
        .split('.')
        .all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_digit()));
    if !numeric {
        return false;
    }
    let rest = rest.trim_start();
    if !rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return false;
    }
    let len = rest.chars().count();
    (11..=61).contains(&len) && letters_and_spaces(rest)
}

fn letters_and_spaces(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// Fallback for title-like lines the shape templates miss: a multi-word
/// titlecased line, or a short line carrying a marker word.
fn heuristic_header(line: &str, rules: &SectionRules) -> bool {
    let words = line.split_whitespace().count();
    if words < 3 {
        return false;
    }
    if is_title_case(line) && !line.ends_with('.') && line.chars().count() > 20 {
        return true;
    }
    let lower = line.to_lowercase();
    words <= 8 && rules.marker_words.iter().any(|m| lower.contains(m))
}

/// A header must introduce real content: the following lines must carry
/// enough non-blank text, and the immediate next line must not itself
/// read as a header.
fn validate_context(lines: &[&str], index: usize, rules: &SectionRules) -> bool {
    let window = &lines[(index + 1).min(lines.len())..(index + 5).min(lines.len())];
    let following: usize = window
        .iter()
        .map(|l| l.chars().filter(|c| !c.is_whitespace()).count())
        .sum();
    if following < rules.min_following_chars {
        return false;
    }

    if let Some(next) = lines.get(index + 1) {
        let next = next.trim();
        if !next.is_empty()
            && header_shaped(next)
            && !starts_with_any(next, SENTENCE_STARTERS)
        {
            return false;
        }
    }
    true
}
