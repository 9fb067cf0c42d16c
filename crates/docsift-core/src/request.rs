//! Input config: the analysis request naming the persona, the job to be
//! done, and optionally the documents to read.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DocsiftError;

/// The request payload. Unknown top-level fields are ignored so wrapped
/// payloads with extra bookkeeping keys parse as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
    #[serde(default)]
    pub documents: Vec<DocumentDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// One expected input document. `title` is display metadata only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl AnalysisRequest {
    /// Build a request directly from flag values, without a config file.
    pub fn from_parts(role: impl Into<String>, task: impl Into<String>) -> AnalysisRequest {
        AnalysisRequest {
            persona: Persona { role: role.into() },
            job_to_be_done: JobToBeDone { task: task.into() },
            documents: Vec::new(),
        }
    }
}

/// Load a request from a JSON file.
pub fn load_request(path: &Path) -> Result<AnalysisRequest, DocsiftError> {
    let request = read_request(path)?;
    validate_request(&request)?;
    Ok(request)
}

/// Read a request file without validating it. Callers that overlay
/// flag values on top of the file validate the merged result instead.
pub fn read_request(path: &Path) -> Result<AnalysisRequest, DocsiftError> {
    let content = std::fs::read_to_string(path).map_err(|e| DocsiftError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| DocsiftError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse a request from a JSON string.
pub fn parse_request(json: &str, source: &Path) -> Result<AnalysisRequest, DocsiftError> {
    let request: AnalysisRequest =
        serde_json::from_str(json).map_err(|e| DocsiftError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_request(&request)?;
    Ok(request)
}

/// Parse a request from a JSON string (no file path context).
pub fn parse_request_str(json: &str) -> Result<AnalysisRequest, DocsiftError> {
    let request: AnalysisRequest = serde_json::from_str(json).map_err(DocsiftError::Json)?;
    validate_request(&request)?;
    Ok(request)
}

/// Validate that a request is well-formed before any extraction work.
pub fn validate_request(request: &AnalysisRequest) -> Result<(), DocsiftError> {
    if request.persona.role.trim().is_empty() {
        return Err(DocsiftError::MissingPersonaRole);
    }
    if request.job_to_be_done.task.trim().is_empty() {
        return Err(DocsiftError::MissingJobTask);
    }
    for descriptor in &request.documents {
        if descriptor.filename.trim().is_empty() {
            return Err(DocsiftError::ConfigInvalid(
                "document descriptor with empty filename".into(),
            ));
        }
    }
    Ok(())
}
