//! Relevance scoring and ranked selection.
//!
//! Sections are scored against the persona context with a weighted sum of
//! four signals, sorted descending, then passed through a per-document
//! diversity cap before ranks are assigned. The whole pass is
//! deterministic: identical inputs produce identical rankings.

pub mod signals;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::DocsiftError;
use crate::model::{PersonaContext, ScoredSection, Section};
use crate::persona;

/// Weights of the four relevance signals. Must sum to 1.0 so the
/// composite score stays in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub keyword_overlap: f64,
    pub query_similarity: f64,
    pub section_quality: f64,
    pub completeness: f64,
}

impl Default for ScoringWeights {
    fn default() -> ScoringWeights {
        ScoringWeights {
            keyword_overlap: 0.35,
            query_similarity: 0.30,
            section_quality: 0.20,
            completeness: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), DocsiftError> {
        let parts = [
            self.keyword_overlap,
            self.query_similarity,
            self.section_quality,
            self.completeness,
        ];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DocsiftError::ConfigInvalid(
                "scoring weights must be finite and non-negative".to_string(),
            ));
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(DocsiftError::ConfigInvalid(format!(
                "scoring weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(())
    }
}

/// How many sections survive ranking and how many of those get refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub target_count: usize,
    pub refine_count: usize,
}

impl Default for SelectionPolicy {
    fn default() -> SelectionPolicy {
        SelectionPolicy {
            target_count: 15,
            refine_count: 10,
        }
    }
}

/// Score every section against the context, order by descending score,
/// apply the diversity cap, and assign dense 1-based importance ranks.
pub fn score_and_rank(
    sections: Vec<Section>,
    context: &PersonaContext,
    weights: &ScoringWeights,
    policy: &SelectionPolicy,
) -> Vec<ScoredSection> {
    let mut scored: Vec<(Section, f64)> = sections
        .into_iter()
        .map(|section| {
            let score = relevance_score(&section, context, weights);
            (section, score)
        })
        .collect();

    // total_cmp gives a total order over f64, and the stable sort keeps
    // input order on exact ties.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    enforce_diversity(scored, policy.target_count)
}

/// Weighted composite of the four signals, in [0, 1] for valid weights.
pub fn relevance_score(
    section: &Section,
    context: &PersonaContext,
    weights: &ScoringWeights,
) -> f64 {
    let mut section_tokens = persona::token_set(&section.section_title);
    section_tokens.extend(persona::token_set(&section.content));
    let section_text =
        format!("{} {}", section.section_title, section.content).to_lowercase();
    let query_tokens = persona::token_set(&context.combined_query);

    weights.keyword_overlap
        * signals::keyword_overlap(&context.keywords, &section_tokens, &section_text)
        + weights.query_similarity * signals::query_similarity(&section_tokens, &query_tokens)
        + weights.section_quality * signals::section_quality(section)
        + weights.completeness * signals::completeness(section)
}

/// Cap how many sections a single document may place in the result.
///
/// `ranked` must already be sorted descending by score. The cap is
/// `target / distinct_documents`, never below 1. Sections held back by
/// the cap backfill remaining slots in score order, so the result always
/// reaches `target` when the pool allows it.
fn enforce_diversity(ranked: Vec<(Section, f64)>, target: usize) -> Vec<ScoredSection> {
    let distinct_docs = ranked
        .iter()
        .map(|(section, _)| section.document.as_str())
        .collect::<BTreeSet<_>>()
        .len()
        .max(1);
    let max_per_doc = (target / distinct_docs).max(1);

    let mut per_doc: BTreeMap<String, usize> = BTreeMap::new();
    let mut admitted: Vec<(Section, f64)> = Vec::new();
    let mut held_back: Vec<(Section, f64)> = Vec::new();

    for (section, score) in ranked {
        if admitted.len() >= target {
            break;
        }
        let seen = per_doc.entry(section.document.clone()).or_insert(0);
        if *seen < max_per_doc {
            *seen += 1;
            admitted.push((section, score));
        } else {
            held_back.push((section, score));
        }
    }

    for entry in held_back {
        if admitted.len() >= target {
            break;
        }
        admitted.push(entry);
    }

    admitted
        .into_iter()
        .enumerate()
        .map(|(index, (section, relevance_score))| ScoredSection {
            section,
            relevance_score,
            importance_rank: index + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(document: &str, title: &str, content: &str) -> Section {
        Section::new(document, 1, title, content)
    }

    fn pool(counts: &[(&str, usize)]) -> Vec<(Section, f64)> {
        // Equal scores throughout, so admission order mirrors input order.
        counts.iter()
            .flat_map(|(doc, count)| {
                (0..*count).map(|i| {
                    (
                        section(doc, &format!("Section Number {i}"), "body text"),
                        0.5,
                    )
                })
            })
            .collect()
    }

    #[test]
    fn test_default_weights_validate() {
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn test_overweight_config_rejected() {
        let weights = ScoringWeights {
            keyword_overlap: 0.5,
            query_similarity: 0.5,
            section_quality: 0.5,
            completeness: 0.5,
        };
        let err = weights.validate().unwrap_err();
        assert!(matches!(err, DocsiftError::ConfigInvalid(_)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoringWeights {
            keyword_overlap: -0.1,
            query_similarity: 0.5,
            section_quality: 0.4,
            completeness: 0.2,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_diversity_cap_with_backfill() {
        // Two documents, ten sections each, target 15: the cap is 7, the
        // first pass admits 14, and one held-back section backfills.
        let ranked = pool(&[("a.pdf", 10), ("b.pdf", 10)]);
        let result = enforce_diversity(ranked, 15);

        assert_eq!(result.len(), 15);
        let from_a = result.iter().filter(|s| s.section.document == "a.pdf").count();
        let from_b = result.iter().filter(|s| s.section.document == "b.pdf").count();
        assert_eq!(from_a, 8);
        assert_eq!(from_b, 7);
    }

    #[test]
    fn test_diversity_cap_never_below_one() {
        // Four documents at target 3: the integer cap would be 0, but
        // every admitted document still places at least one section.
        let ranked = pool(&[("a.pdf", 2), ("b.pdf", 2), ("c.pdf", 2), ("d.pdf", 2)]);
        let result = enforce_diversity(ranked, 3);

        assert_eq!(result.len(), 3);
        let docs: Vec<&str> = result.iter().map(|s| s.section.document.as_str()).collect();
        assert_eq!(docs, vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_single_document_fills_target_alone() {
        let ranked = pool(&[("only.pdf", 20)]);
        let result = enforce_diversity(ranked, 15);
        assert_eq!(result.len(), 15);
        assert!(result.iter().all(|s| s.section.document == "only.pdf"));
    }

    #[test]
    fn test_ranks_dense_from_one() {
        let ranked = pool(&[("a.pdf", 3), ("b.pdf", 3)]);
        let result = enforce_diversity(ranked, 15);
        let ranks: Vec<usize> = result.iter().map(|s| s.importance_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_empty_pool_yields_empty_ranking() {
        assert!(enforce_diversity(Vec::new(), 15).is_empty());
    }

    #[test]
    fn test_score_and_rank_orders_by_relevance() {
        let context = persona::build_context(
            "Travel Planner",
            "Plan a coastal trip with beaches and nightlife",
        )
        .unwrap();
        let on_topic = section(
            "south.pdf",
            "Coastal Beaches Overview",
            "The coastal beaches suit any trip plan. Nightlife thrives nearby. \
             Travel between beaches is quick.",
        );
        let off_topic = section(
            "south.pdf",
            "Printer Maintenance Notes",
            "Replace the toner cartridge when the indicator blinks twice.",
        );
        let ranked = score_and_rank(
            vec![off_topic, on_topic],
            &context,
            &ScoringWeights::default(),
            &SelectionPolicy::default(),
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].section.section_title, "Coastal Beaches Overview");
        assert!(ranked[0].relevance_score > ranked[1].relevance_score);
        assert_eq!(ranked[0].importance_rank, 1);
        assert_eq!(ranked[1].importance_rank, 2);
    }

    #[test]
    fn test_score_and_rank_keeps_input_order_on_ties() {
        let context = persona::build_context("Planner", "Plan something").unwrap();
        let first = section("a.pdf", "Identical Heading Text", "identical body text here");
        let second = section("b.pdf", "Identical Heading Text", "identical body text here");
        let ranked = score_and_rank(
            vec![first, second],
            &context,
            &ScoringWeights::default(),
            &SelectionPolicy::default(),
        );
        assert_eq!(ranked[0].section.document, "a.pdf");
        assert_eq!(ranked[1].section.document, "b.pdf");
    }

    #[test]
    fn test_score_and_rank_is_deterministic() {
        let context = persona::build_context(
            "Food Contractor",
            "Prepare a vegetarian buffet menu",
        )
        .unwrap();
        let sections = vec![
            section(
                "menu.pdf",
                "Vegetarian Buffet Ideas",
                "Build the buffet around seasonal vegetables. Offer one warm dish. \
                 Label every allergen clearly.",
            ),
            section(
                "menu.pdf",
                "Dessert Pairings",
                "Pair light desserts with the buffet. Fruit platters travel well.",
            ),
        ];
        let first = score_and_rank(
            sections.clone(),
            &context,
            &ScoringWeights::default(),
            &SelectionPolicy::default(),
        );
        let second = score_and_rank(
            sections,
            &context,
            &ScoringWeights::default(),
            &SelectionPolicy::default(),
        );
        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_relevance_score_in_unit_interval() {
        let context = persona::build_context("Travel Planner", "Plan a beach trip").unwrap();
        let s = section(
            "a.pdf",
            "Beach Trip Planning",
            "Plan the beach trip early. Book the beach hotels first.",
        );
        let score = relevance_score(&s, &context, &ScoringWeights::default());
        assert!(score > 0.0);
        assert!(score <= 1.0);
    }
}
