use docsift_core::error::DocsiftError;
use docsift_core::extraction::pdftotext::PdftotextSource;
use docsift_core::request::{self, AnalysisRequest};
use docsift_core::AnalyzeOptions;
use std::path::{Path, PathBuf};

use crate::output;

pub fn run(
    config: Option<PathBuf>,
    pdf_folder: Option<PathBuf>,
    persona: Option<String>,
    task: Option<String>,
    output_format: &str,
    out: Option<PathBuf>,
) -> Result<(), DocsiftError> {
    // Merge the config file and flag overrides into one request
    let mut request = match &config {
        Some(path) => request::read_request(path)?,
        None => AnalysisRequest::from_parts("", ""),
    };
    if let Some(role) = persona {
        request.persona.role = role;
    }
    if let Some(task) = task {
        request.job_to_be_done.task = task;
    }
    request::validate_request(&request)?;

    let input = resolve_input(config.as_deref(), pdf_folder)?;
    let options = AnalyzeOptions::default();

    // Determine input type by extension
    let is_json = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let result = if is_json {
        // Load pre-extracted documents from a JSON dump
        let documents = docsift_core::extraction::load_documents_json(&input)?;
        if documents.is_empty() {
            return Err(DocsiftError::NoDocuments { folder: input });
        }
        docsift_core::analyze(&documents, &request, &options)?
    } else {
        // Extract from the PDF folder
        let source = PdftotextSource::new();
        docsift_core::analyze_folder(&input, &source, &request, &options)?
    };

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, json)?;
        eprintln!(
            "Analyzed {} document(s), written to {}",
            result.metadata.input_documents.len(),
            path.display()
        );
        return Ok(());
    }

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result),
    }

    Ok(())
}

/// Pick where documents come from.
///
/// An explicit --pdf-folder always wins. Otherwise documents are looked up
/// next to the config file: a PDFs/ subdirectory when one exists, else the
/// config's own directory.
fn resolve_input(
    config: Option<&Path>,
    pdf_folder: Option<PathBuf>,
) -> Result<PathBuf, DocsiftError> {
    if let Some(folder) = pdf_folder {
        return Ok(folder);
    }
    let Some(config) = config else {
        return Err(DocsiftError::ConfigInvalid(
            "no input given: pass --pdf-folder or --config".into(),
        ));
    };
    let base = match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let pdfs = base.join("PDFs");
    if pdfs.is_dir() {
        Ok(pdfs)
    } else {
        Ok(base)
    }
}
