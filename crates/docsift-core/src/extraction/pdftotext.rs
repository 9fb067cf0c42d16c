use crate::error::DocsiftError;
use crate::extraction::PdfTextSource;
use crate::model::Page;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Runs pdftotext in default (reading-order) mode, which suits prose
/// segmentation better than `-layout` column preservation.
pub struct PdftotextSource;

impl PdftotextSource {
    pub fn new() -> Self {
        PdftotextSource
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextSource for PdftotextSource {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, DocsiftError> {
        // Write PDF bytes to a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| DocsiftError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| DocsiftError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let output = Command::new("pdftotext")
            .arg(&tmp_path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DocsiftError::PdftotextNotFound
                } else {
                    DocsiftError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(DocsiftError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text))
    }

    fn source_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages (form feed \x0c separates pages).
///
/// The final form feed leaves an empty trailing piece, which is not a page.
fn split_pages(text: &str) -> Vec<Page> {
    let mut pages: Vec<Page> = text
        .split('\x0c')
        .enumerate()
        .map(|(i, page_text)| Page {
            page_number: i + 1,
            text: page_text.to_string(),
        })
        .collect();

    while pages.len() > 1 {
        match pages.last() {
            Some(last) if last.text.trim().is_empty() => {
                pages.pop();
            }
            _ => break,
        }
    }

    pages
}
