//! Subsection refinement: condense each top-ranked section's content
//! into a short readable excerpt.
//!
//! Three rules, first applicable wins: short content is kept verbatim
//! behind its title, medium content is cut to its leading sentences, and
//! anything else is truncated at a word boundary. Text at or under the
//! short threshold is never reflowed, so refinement is idempotent there.

use crate::model::{ScoredSection, Subsection};

/// Length thresholds for the refinement cascade, in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefinePolicy {
    /// Content at or under this length is kept verbatim.
    pub short_len: usize,
    /// Budget for the leading-sentences rule.
    pub sentence_budget: usize,
    /// Hard cap for the truncation fallback.
    pub truncate_at: usize,
    /// Final cap applied at the output boundary.
    pub output_cap: usize,
}

impl Default for RefinePolicy {
    fn default() -> RefinePolicy {
        RefinePolicy {
            short_len: 300,
            sentence_budget: 400,
            truncate_at: 300,
            output_cap: 500,
        }
    }
}

/// Refine each scored section into a `Subsection`, in input order.
/// Sections with empty content are skipped, never errored.
pub fn refine_sections(top: &[ScoredSection], policy: &RefinePolicy) -> Vec<Subsection> {
    top.iter()
        .filter(|scored| !scored.section.content.trim().is_empty())
        .map(|scored| Subsection {
            document: scored.section.document.clone(),
            page_number: scored.section.page_number,
            refined_text: condense(
                &scored.section.section_title,
                &scored.section.content,
                policy,
            ),
            source_section: scored.section.section_title.clone(),
        })
        .collect()
}

/// Apply the refinement cascade to one section's title and content.
pub fn condense(title: &str, content: &str, policy: &RefinePolicy) -> String {
    let content = content.trim();
    if content.chars().count() <= policy.short_len {
        return format!("{}: {}", title, content);
    }

    let sentences = split_sentences(content);
    for take in [3, 2] {
        if sentences.len() >= take {
            let head = sentences[..take].join(" ");
            if head.chars().count() <= policy.sentence_budget {
                return head;
            }
        }
    }

    truncate_at_whitespace(content, policy.truncate_at)
}

/// Split on `.`/`!`/`?` runs followed by whitespace, keeping the
/// terminator with its sentence. "3.5" and "e.g." stay intact because
/// no whitespace follows the dot.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            while let Some(&next) = chars.peek() {
                if matches!(next, '.' | '!' | '?') {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if chars.peek().is_some_and(|next| next.is_whitespace()) {
                while chars.peek().is_some_and(|next| next.is_whitespace()) {
                    chars.next();
                }
                let sentence = current.trim().to_string();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                current.clear();
            }
        }
    }

    let tail = current.trim().to_string();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Cut at the last whitespace before `limit` chars. Identity for text
/// already within the limit. An ellipsis marks a cut that lands
/// mid-thought; a cut landing right after a sentence end gets none.
fn truncate_at_whitespace(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.trim().to_string();
    }
    let cut = text
        .char_indices()
        .nth(limit)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..cut];
    let head = match head.rfind(char::is_whitespace) {
        Some(pos) => &head[..pos],
        None => head,
    };
    let head = head.trim_end();
    if head.ends_with(['.', '!', '?']) {
        head.to_string()
    } else {
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn scored(title: &str, content: &str) -> ScoredSection {
        ScoredSection {
            section: Section::new("guide.pdf", 1, title, content),
            relevance_score: 0.5,
            importance_rank: 1,
        }
    }

    #[test]
    fn test_short_content_kept_verbatim_behind_title() {
        let policy = RefinePolicy::default();
        let content = "This guide covers top attractions, dining, and nightlife.";
        let refined = condense("Comprehensive Travel Guide", content, &policy);
        assert_eq!(
            refined,
            "Comprehensive Travel Guide: This guide covers top attractions, dining, and nightlife."
        );
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let policy = RefinePolicy::default();
        let content = "a".repeat(policy.short_len);
        let refined = condense("Edge Case", &content, &policy);
        assert!(refined.ends_with(&content));
    }

    #[test]
    fn test_sentence_rule_takes_three() {
        let policy = RefinePolicy::default();
        let s = "This sentence describes one of the attractions in reasonable detail for readers.";
        let content = format!("{s} {s} {s} {s} {s}");
        let refined = condense("Attractions", &content, &policy);
        assert_eq!(refined, format!("{s} {s} {s}"));
    }

    #[test]
    fn test_sentence_rule_backs_off_to_two() {
        let policy = RefinePolicy::default();
        // ~180 chars per sentence: three never fit the budget, two do.
        let s = format!("{} ends here.", "x".repeat(170));
        let content = format!("{s} {s} {s} {s}");
        let refined = condense("Long Sentences", &content, &policy);
        assert_eq!(refined, format!("{s} {s}"));
    }

    #[test]
    fn test_truncation_fallback_cuts_at_word_boundary() {
        let policy = RefinePolicy::default();
        let content = "word ".repeat(120);
        let refined = condense("Unbroken Prose", &content, &policy);
        let expected = format!("{}word...", "word ".repeat(59));
        assert_eq!(refined, expected);
    }

    #[test]
    fn test_truncation_after_sentence_end_gets_no_ellipsis() {
        let policy = RefinePolicy::default();
        let first = format!("{} end.", "a".repeat(290));
        let content = format!("{first} {}", "b".repeat(200));
        let refined = condense("Clean Cut", &content, &policy);
        assert_eq!(refined, first);
    }

    #[test]
    fn test_truncate_within_limit_is_identity() {
        assert_eq!(
            truncate_at_whitespace("Already short enough.", 300),
            "Already short enough."
        );
    }

    #[test]
    fn test_split_sentences_shapes() {
        assert_eq!(
            split_sentences("One. Two! Three?"),
            vec!["One.", "Two!", "Three?"]
        );
        assert_eq!(
            split_sentences("Version 3.5 shipped last year. Adoption grew."),
            vec!["Version 3.5 shipped last year.", "Adoption grew."]
        );
        assert_eq!(split_sentences("Really?! Yes."), vec!["Really?!", "Yes."]);
    }

    #[test]
    fn test_refine_skips_empty_content() {
        let policy = RefinePolicy::default();
        let mut empty = scored("Hollow Section", "placeholder");
        empty.section.content = String::new();
        let kept = scored("Kept Section", "Some body text worth keeping.");
        let refined = refine_sections(&[empty, kept], &policy);
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].source_section, "Kept Section");
    }

    #[test]
    fn test_refine_preserves_rank_order_and_provenance() {
        let policy = RefinePolicy::default();
        let first = scored("First Section", "Alpha body text for the first entry.");
        let second = scored("Second Section", "Beta body text for the second entry.");
        let refined = refine_sections(&[first, second], &policy);
        assert_eq!(refined.len(), 2);
        assert_eq!(refined[0].source_section, "First Section");
        assert_eq!(refined[1].source_section, "Second Section");
        assert_eq!(refined[0].document, "guide.pdf");
        assert_eq!(refined[0].page_number, 1);
    }
}
