pub mod pdftotext;

use std::path::Path;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::DocsiftError;
use crate::model::{Document, Page};

/// Trait for PDF text extraction backends.
///
/// The pipeline treats page text as a supplied capability: any backend that
/// can turn PDF bytes into per-page plain text slots in here.
pub trait PdfTextSource: Send + Sync {
    /// Extract text from PDF bytes, returning one Page per page (1-indexed).
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, DocsiftError>;

    /// Name of this extraction backend (for diagnostics).
    fn source_name(&self) -> &str;
}

/// A source file that could not be loaded, with the reason it was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: String,
}

/// Result of loading a folder: the documents that extracted cleanly plus
/// a record of every file that had to be skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedCollection {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedDocument>,
}

/// Load every PDF in `folder` (non-recursive, sorted by filename).
///
/// Unreadable or unextractable files are skipped and logged rather than
/// failing the run; only an unreadable folder is an error. An empty result
/// is not an error here; the pipeline entry decides whether an empty
/// collection is terminal.
pub fn load_documents(
    folder: &Path,
    source: &dyn PdfTextSource,
) -> Result<LoadedCollection, DocsiftError> {
    let mut pdf_paths: Vec<std::path::PathBuf> = Vec::new();
    for entry in WalkDir::new(folder).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            DocsiftError::Extraction(format!("cannot read folder {}: {}", folder.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_pdf = entry
            .path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            pdf_paths.push(entry.into_path());
        }
    }

    let mut documents = Vec::new();
    let mut skipped = Vec::new();

    for path in &pdf_paths {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match load_one(path, source) {
            Ok(pages) => {
                log::info!(
                    "loaded {} ({} page(s)) via {}",
                    filename,
                    pages.len(),
                    source.source_name()
                );
                documents.push(Document::new(filename, pages));
            }
            Err(e) => {
                log::warn!("skipping {}: {}", filename, e);
                skipped.push(SkippedDocument {
                    filename,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(LoadedCollection { documents, skipped })
}

fn load_one(path: &Path, source: &dyn PdfTextSource) -> Result<Vec<Page>, DocsiftError> {
    let bytes = std::fs::read(path)?;
    source.extract_pages(&bytes)
}

/// Load pre-extracted documents from a JSON dump (a serialized `Vec<Document>`).
///
/// Lets the pipeline run on text extracted elsewhere, without poppler.
pub fn load_documents_json(path: &Path) -> Result<Vec<Document>, DocsiftError> {
    let bytes = std::fs::read(path)?;
    let documents: Vec<Document> = serde_json::from_slice(&bytes)?;
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource;

    impl PdfTextSource for FixedSource {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<Page>, DocsiftError> {
            Ok(vec![Page {
                page_number: 1,
                text: "stub text".into(),
            }])
        }

        fn source_name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingSource;

    impl PdfTextSource for FailingSource {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<Page>, DocsiftError> {
            Err(DocsiftError::Extraction("corrupt xref table".into()))
        }

        fn source_name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_load_folder_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"%PDF-").unwrap();
        std::fs::write(dir.path().join("a.PDF"), b"%PDF-").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a pdf").unwrap();

        let loaded = load_documents(dir.path(), &FixedSource).unwrap();
        let names: Vec<&str> = loaded
            .documents
            .iter()
            .map(|d| d.filename.as_str())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn test_broken_file_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.pdf"), b"junk").unwrap();

        let loaded = load_documents(dir.path(), &FailingSource).unwrap();
        assert!(loaded.documents.is_empty());
        assert_eq!(loaded.skipped.len(), 1);
        assert!(loaded.skipped[0].reason.contains("corrupt"));
    }

    #[test]
    fn test_empty_folder_yields_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_documents(dir.path(), &FixedSource).unwrap();
        assert!(loaded.documents.is_empty());
    }

    #[test]
    fn test_json_dump_round_trips() {
        let docs = vec![Document::new(
            "guide.pdf",
            vec![Page {
                page_number: 1,
                text: "Comprehensive Travel Guide\nBody text under it.".into(),
            }],
        )];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.json");
        std::fs::write(&path, serde_json::to_vec(&docs).unwrap()).unwrap();

        let loaded = load_documents_json(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].filename, "guide.pdf");
        assert_eq!(loaded[0].total_pages, 1);
        assert_eq!(loaded[0].pages[0].page_number, 1);
        assert!(loaded[0].pages[0].text.starts_with("Comprehensive"));
    }

    #[test]
    fn test_malformed_json_dump_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.json");
        std::fs::write(&path, b"{not json").unwrap();

        let err = load_documents_json(&path).unwrap_err();
        assert!(matches!(err, DocsiftError::Json(_)));
    }
}
