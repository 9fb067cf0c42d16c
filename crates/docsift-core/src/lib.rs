pub mod error;
pub mod extraction;
pub mod model;
pub mod output;
pub mod persona;
pub mod refine;
pub mod request;
pub mod scoring;
pub mod sectioning;

use std::path::Path;

use chrono::Utc;

use error::DocsiftError;
use extraction::PdfTextSource;
use model::{Document, Section};
use output::AnalysisOutput;
use refine::RefinePolicy;
use request::AnalysisRequest;
use scoring::{ScoringWeights, SelectionPolicy};
use sectioning::SectionRules;

/// Tunables for one analysis run. `Default` is the shipped behavior;
/// callers override individual fields when experimenting.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub section_rules: SectionRules,
    pub weights: ScoringWeights,
    pub selection: SelectionPolicy,
    pub refine: RefinePolicy,
}

/// Main API entry point: run the full pipeline over already-extracted
/// documents.
///
/// Validates the request and options before touching any document, then
/// extracts sections per document in page order, scores the pooled
/// sections against the persona context, refines the top entries, and
/// assembles the result.
pub fn analyze(
    documents: &[Document],
    request: &AnalysisRequest,
    options: &AnalyzeOptions,
) -> Result<AnalysisOutput, DocsiftError> {
    request::validate_request(request)?;
    options.weights.validate()?;

    // Build the global section pool, document by document
    let mut pool: Vec<Section> = Vec::new();
    for document in documents {
        let sections = sectioning::extract_sections(document, &options.section_rules);
        log::info!(
            "extracted {} sections from {} ({} pages)",
            sections.len(),
            document.filename,
            document.total_pages
        );
        pool.extend(sections);
    }
    if pool.is_empty() {
        return Err(DocsiftError::NoSections);
    }

    // Score against the persona context
    let context = persona::build_context(&request.persona.role, &request.job_to_be_done.task)?;
    let ranked = scoring::score_and_rank(pool, &context, &options.weights, &options.selection);
    for scored in ranked.iter().take(5) {
        log::debug!(
            "rank {} score {:.3}: {}",
            scored.importance_rank,
            scored.relevance_score,
            scored.section
        );
    }

    // Refine the top entries
    let top = &ranked[..ranked.len().min(options.selection.refine_count)];
    let subsections = refine::refine_sections(top, &options.refine);

    Ok(output::assemble(
        request,
        documents,
        &ranked,
        &subsections,
        options,
        Utc::now(),
    ))
}

/// Run the pipeline over a folder of PDF files.
///
/// Unreadable files are skipped with a warning; an empty collection is
/// a terminal error, never an empty success.
pub fn analyze_folder(
    folder: &Path,
    source: &dyn PdfTextSource,
    request: &AnalysisRequest,
    options: &AnalyzeOptions,
) -> Result<AnalysisOutput, DocsiftError> {
    request::validate_request(request)?;

    let collection = extraction::load_documents(folder, source)?;
    if collection.documents.is_empty() {
        return Err(DocsiftError::NoDocuments {
            folder: folder.to_path_buf(),
        });
    }
    analyze(&collection.documents, request, options)
}
