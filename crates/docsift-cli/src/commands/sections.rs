use docsift_core::error::DocsiftError;
use docsift_core::extraction::pdftotext::PdftotextSource;
use docsift_core::model::{Document, Section};
use docsift_core::sectioning::{self, SectionRules};
use std::path::PathBuf;

use crate::output;

pub fn run(input: PathBuf, output_format: &str, out: Option<PathBuf>) -> Result<(), DocsiftError> {
    // Determine input type by extension
    let is_json = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let documents = if is_json {
        docsift_core::extraction::load_documents_json(&input)?
    } else {
        let source = PdftotextSource::new();
        docsift_core::extraction::load_documents(&input, &source)?.documents
    };
    if documents.is_empty() {
        return Err(DocsiftError::NoDocuments { folder: input });
    }

    let rules = SectionRules::default();
    let per_doc: Vec<(&Document, Vec<Section>)> = documents
        .iter()
        .map(|doc| (doc, sectioning::extract_sections(doc, &rules)))
        .collect();

    if let Some(path) = out {
        let report = section_report(&per_doc);
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        eprintln!("Section report written to {}", path.display());
        return Ok(());
    }

    match output_format {
        "json" => output::json::print_value(&section_report(&per_doc))?,
        _ => output::table::print_sections(&per_doc),
    }

    Ok(())
}

fn section_report(per_doc: &[(&Document, Vec<Section>)]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = per_doc
        .iter()
        .map(|(doc, sections)| {
            serde_json::json!({
                "document": doc.filename,
                "total_pages": doc.total_pages,
                "section_count": sections.len(),
                "sections": sections,
            })
        })
        .collect();
    serde_json::json!({ "documents": entries })
}
