//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json` and prints one [`CommandOutput`] document
//! on stdout instead of colored text.

use chromabake_backend_mesh::MeshError;
use chromabake_backend_texture::TextureError;
use chromabake_spec::{BackendError, CodecError, JobError, ValidationError};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Backend errors keep their own codes (`MESH_*`, `TEXTURE_*`, `SPEC_*`,
/// `CODEC_*`); job validation errors keep their `J*` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Invalid command-line value
    pub const INVALID_ARGUMENT: &str = "CLI_002";
    /// Command failed without a more specific code
    pub const COMMAND_FAILED: &str = "CLI_010";
}

/// Warning codes for CLI operations.
pub mod warning_codes {
    /// Fewer than two channels selected for packing
    pub const FEW_PACK_SOURCES: &str = "CLI_W001";
    /// Mesh already carries vertex colors that baking replaces
    pub const EXISTING_VERTEX_COLORS: &str = "CLI_W002";
    /// Option has no effect for the chosen mode
    pub const IGNORED_OPTION: &str = "CLI_W003";
    /// Output name was taken; a numbered name was used
    pub const RENAMED_OUTPUT: &str = "CLI_W004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "J003", "TEXTURE_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "CLI_W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A file written by a job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputFile {
    /// Output kind (packed, red, green, blue, alpha, colors)
    pub kind: String,
    /// Output format (png, json)
    pub format: String,
    /// Path the file was written to
    pub path: String,
    /// BLAKE3 hash of the written bytes
    pub hash: String,
}

/// Outcome of one pack, unpack or bake job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobReport {
    /// Job kind (pack, unpack, bake)
    pub kind: String,
    /// Output name for pack/unpack, mesh path for bake
    pub name: String,
    /// Resolved output size for pack/unpack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[u32; 2]>,
    /// Vertex count across all baked primitives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertices: Option<usize>,
    /// Files written
    pub outputs: Vec<OutputFile>,
    /// Warnings raised while running the job
    pub warnings: Vec<JsonWarning>,
}

impl JobReport {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            size: None,
            vertices: None,
            outputs: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Top-level `--json` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether every job succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Completed jobs, in execution order
    pub jobs: Vec<JobReport>,
}

impl CommandOutput {
    pub fn success(jobs: Vec<JobReport>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            jobs,
        }
    }

    pub fn failure(errors: Vec<JsonError>, jobs: Vec<JobReport>) -> Self {
        Self {
            success: false,
            errors,
            jobs,
        }
    }
}

/// Convert a job validation error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let json = JsonError::new(error.code.code(), &error.message);
    match &error.path {
        Some(path) => json.with_path(path),
        None => json,
    }
}

/// Convert a command error, keeping the most specific backend code in its chain.
pub fn error_to_json(error: &anyhow::Error) -> Vec<JsonError> {
    for cause in error.chain() {
        if let Some(JobError::Invalid(errors)) = cause.downcast_ref::<JobError>() {
            return errors.iter().map(validation_error_to_json).collect();
        }
    }

    let code = error
        .chain()
        .find_map(backend_code)
        .unwrap_or(error_codes::COMMAND_FAILED);
    vec![JsonError::new(code, format!("{:#}", error))]
}

fn backend_code(cause: &(dyn std::error::Error + 'static)) -> Option<&'static str> {
    if let Some(e) = cause.downcast_ref::<MeshError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<TextureError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<JobError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<CodecError>() {
        return Some(e.code());
    }
    if cause.downcast_ref::<std::io::Error>().is_some() {
        return Some(error_codes::FILE_READ);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use chromabake_spec::ErrorCode;

    #[test]
    fn test_json_error_optional_fields_skipped() {
        let error = JsonError::new("CLI_010", "test error");
        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains("\"path\""));
        assert!(!json.contains("\"file\""));
    }

    #[test]
    fn test_backend_code_found_through_context() {
        let err: anyhow::Result<()> = Err(TextureError::UnsupportedFormat("tga".to_string()))
            .context("Failed to read red source");
        let errors = error_to_json(&err.unwrap_err());
        assert_eq!(errors[0].code, "TEXTURE_005");
        assert!(errors[0].message.starts_with("Failed to read red source"));
    }

    #[test]
    fn test_validation_errors_expanded() {
        let err = anyhow::Error::new(JobError::Invalid(vec![
            ValidationError::with_path(ErrorCode::UnsafeOutputName, "bad name", "jobs[0].name"),
            ValidationError::new(ErrorCode::NoJobs, "no jobs"),
        ]));
        let errors = error_to_json(&err);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, "J003");
        assert_eq!(errors[0].path.as_deref(), Some("jobs[0].name"));
        assert_eq!(errors[1].code, "J002");
    }

    #[test]
    fn test_unknown_error_gets_generic_code() {
        let errors = error_to_json(&anyhow::anyhow!("something odd"));
        assert_eq!(errors[0].code, error_codes::COMMAND_FAILED);
    }
}
