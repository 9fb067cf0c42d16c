//! Final result structure and its assembly.
//!
//! Thin by design: everything here is copying already-computed values
//! into the wire shape. Field names are part of the output contract and
//! must not change.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Document, ScoredSection, Subsection};
use crate::request::AnalysisRequest;
use crate::AnalyzeOptions;

/// Run-level bookkeeping echoed back with every result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Input document filenames, in request order when descriptors were
    /// given, else loaded filenames sorted.
    pub input_documents: Vec<String>,
    /// Persona role, verbatim from the request.
    pub persona: String,
    /// Job task, verbatim from the request.
    pub job_to_be_done: String,
    /// RFC 3339 UTC timestamp of the run, second precision.
    pub processing_timestamp: String,
}

/// One ranked section in the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Source document filename.
    pub document: String,
    /// 1-indexed page the section starts on.
    pub page_number: usize,
    /// Detected header line, cleaned.
    pub section_title: String,
    /// 1-based rank, dense across the whole output.
    pub importance_rank: usize,
}

/// One refined excerpt in the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionEntry {
    /// Source document filename.
    pub document: String,
    /// Condensed excerpt, capped at the output limit.
    pub refined_text: String,
    /// 1-indexed page the source section starts on.
    pub page_number: usize,
}

/// The complete analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub metadata: RunMetadata,
    pub extracted_sections: Vec<SectionEntry>,
    pub subsection_analysis: Vec<SubsectionEntry>,
}

/// Package ranked sections and refined excerpts into the output
/// structure. The timestamp is injected so tests can pin it.
pub fn assemble(
    request: &AnalysisRequest,
    documents: &[Document],
    ranked: &[ScoredSection],
    subsections: &[Subsection],
    options: &AnalyzeOptions,
    timestamp: DateTime<Utc>,
) -> AnalysisOutput {
    let input_documents = if request.documents.is_empty() {
        let mut names: Vec<String> = documents.iter().map(|d| d.filename.clone()).collect();
        names.sort();
        names
    } else {
        request
            .documents
            .iter()
            .map(|d| d.filename.clone())
            .collect()
    };

    let extracted_sections = ranked
        .iter()
        .take(options.selection.target_count)
        .map(|scored| SectionEntry {
            document: scored.section.document.clone(),
            page_number: scored.section.page_number,
            section_title: scored.section.section_title.clone(),
            importance_rank: scored.importance_rank,
        })
        .collect();

    let subsection_analysis = subsections
        .iter()
        .take(options.selection.refine_count)
        .map(|sub| SubsectionEntry {
            document: sub.document.clone(),
            refined_text: cap_chars(&sub.refined_text, options.refine.output_cap),
            page_number: sub.page_number,
        })
        .collect();

    AnalysisOutput {
        metadata: RunMetadata {
            input_documents,
            persona: request.persona.role.clone(),
            job_to_be_done: request.job_to_be_done.task.clone(),
            processing_timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        },
        extracted_sections,
        subsection_analysis,
    }
}

/// Cap text at `cap` chars, cutting on a char boundary.
fn cap_chars(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
