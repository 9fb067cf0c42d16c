use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DocsiftError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load input config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid input config: {0}")]
    ConfigInvalid(String),

    #[error("persona role is missing or empty")]
    MissingPersonaRole,

    #[error("job task is missing or empty")]
    MissingJobTask,

    #[error("no readable PDF documents found in {folder}")]
    NoDocuments { folder: PathBuf },

    #[error("no sections could be extracted from the loaded documents")]
    NoSections,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
