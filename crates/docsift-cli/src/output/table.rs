use docsift_core::model::{Document, Section};
use docsift_core::output::AnalysisOutput;

pub fn print(result: &AnalysisOutput) {
    println!("=== Analysis ===\n");
    println!("  Persona:   {}", result.metadata.persona);
    println!("  Job:       {}", result.metadata.job_to_be_done);
    println!(
        "  Documents: {}",
        result.metadata.input_documents.join(", ")
    );
    println!("  Processed: {}\n", result.metadata.processing_timestamp);

    if !result.extracted_sections.is_empty() {
        println!("  Top sections:");

        let max_name = result
            .extracted_sections
            .iter()
            .map(|s| s.document.len())
            .max()
            .unwrap_or(10);

        for entry in &result.extracted_sections {
            println!(
                "  {:>3}. {:<width$}  p.{:<4} {}",
                entry.importance_rank,
                entry.document,
                entry.page_number,
                entry.section_title,
                width = max_name
            );
        }
        println!();
    }

    if !result.subsection_analysis.is_empty() {
        println!("  Refined excerpts:\n");
        for entry in &result.subsection_analysis {
            println!("  --- {} p.{} ---", entry.document, entry.page_number);
            println!("  {}\n", entry.refined_text);
        }
    }
}

pub fn print_sections(per_doc: &[(&Document, Vec<Section>)]) {
    for (doc, sections) in per_doc {
        println!(
            "=== {} ({} page(s), {} section(s)) ===\n",
            doc.filename,
            doc.total_pages,
            sections.len()
        );

        for section in sections {
            println!("  p.{:<4} {}", section.page_number, section.section_title);
        }
        if !sections.is_empty() {
            println!();
        }
    }
}
