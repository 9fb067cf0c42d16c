//! Persona context: normalization of the free-text persona role and
//! job task into the query representation the scorer consumes.
//!
//! Deliberately domain-agnostic. There are no profession keyword tables
//! and no persona classification; the context is a pure function of the
//! two input strings, so the pipeline generalizes to any persona given
//! at runtime.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::error::DocsiftError;
use crate::model::PersonaContext;

/// Universal function words dropped during tokenization. Domain terms
/// never belong here.
static STOP_WORDS: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "with", "from", "into", "are", "was", "were",
        "this", "that", "those", "these", "they", "them", "you", "your",
        "his", "her", "she", "our", "its", "has", "have", "had", "but",
        "not", "all", "any", "can", "will", "than", "then", "also",
    ]
    .into_iter()
    .collect()
});

/// Split text into lowercase alphabetic runs of length >= 3, dropping
/// stop words.
///
/// Every similarity signal in the scorer runs through this same
/// tokenizer, so section text and query text always compare like with
/// like.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|word| word.chars().count() >= 3)
        .map(str::to_lowercase)
        .filter(|word| !STOP_WORDS.contains(word.as_str()))
        .collect()
}

/// Tokenize into a set for membership and overlap queries.
pub fn token_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

/// Build the normalized persona context from the two free-text inputs.
///
/// Fails fast when either input is empty or whitespace-only; there is
/// no default persona to substitute. The keyword set is the union of
/// both inputs' tokens, held in a `BTreeSet` so iteration order is
/// stable across runs.
pub fn build_context(persona_role: &str, job_task: &str) -> Result<PersonaContext, DocsiftError> {
    let role = persona_role.trim();
    let task = job_task.trim();

    if role.is_empty() {
        return Err(DocsiftError::MissingPersonaRole);
    }
    if task.is_empty() {
        return Err(DocsiftError::MissingJobTask);
    }

    let mut keywords: BTreeSet<String> = tokenize(role).into_iter().collect();
    keywords.extend(tokenize(task));

    Ok(PersonaContext {
        persona_role: role.to_string(),
        job_task: task.to_string(),
        keywords,
        combined_query: format!("{} {}", role, task).to_lowercase(),
    })
}
