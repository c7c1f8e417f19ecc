//! Error types for the codec core and job validation.

use thiserror::Error;

/// Error raised by the pure bake/pack/unpack transforms.
///
/// Only malformed input is detected. The core never truncates or pads
/// mismatched buffers, and it never fails for any other reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Mismatched array lengths, zero target size, or a pixel buffer whose
    /// length disagrees with its dimensions.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CodecError {
    /// Shorthand for building an `InvalidInput` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        CodecError::InvalidInput(message.into())
    }
}

impl BackendError for CodecError {
    fn code(&self) -> &'static str {
        match self {
            CodecError::InvalidInput(_) => "CODEC_001",
        }
    }

    fn category(&self) -> &'static str {
        "codec"
    }
}

/// Error codes for job file validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// J001: Unsupported job file version
    UnsupportedVersion,
    /// J002: Job file declares no jobs
    NoJobs,
    /// J003: Output name is empty or unsafe
    UnsafeOutputName,
    /// J004: Duplicate output name among jobs of the same kind
    DuplicateOutputName,
    /// J005: Target size is invalid
    InvalidSize,
    /// J006: Input path is empty
    MissingInput,
    /// J007: Grouping tolerance is not a positive finite number
    InvalidGrouping,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "J001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedVersion => "J001",
            ErrorCode::NoJobs => "J002",
            ErrorCode::UnsafeOutputName => "J003",
            ErrorCode::DuplicateOutputName => "J004",
            ErrorCode::InvalidSize => "J005",
            ErrorCode::MissingInput => "J006",
            ErrorCode::InvalidGrouping => "J007",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "jobs\[0\].name").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Collected outcome of validating a job file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// All errors found, in document order.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Creates an empty (passing) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true when no errors were recorded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Errors from loading a job file.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("job file failed validation with {} error(s); first: {}", .0.len(), .0.first().map(|e| e.to_string()).unwrap_or_default())]
    Invalid(Vec<ValidationError>),
}

impl BackendError for JobError {
    fn code(&self) -> &'static str {
        match self {
            JobError::Io(_) => "SPEC_001",
            JobError::Json(_) => "SPEC_002",
            JobError::Invalid(_) => "SPEC_003",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}

/// Common trait for backend errors, giving every crate's errors a stable
/// code and category for reporting.
///
/// # Example
///
/// ```
/// use chromabake_spec::{BackendError, CodecError};
///
/// let err = CodecError::invalid("target size must be at least 1x1");
/// assert_eq!(err.code(), "CODEC_001");
/// assert_eq!(err.category(), "codec");
/// ```
pub trait BackendError: std::error::Error {
    /// Stable error code such as "MESH_001" or "TEXTURE_002".
    fn code(&self) -> &'static str;

    /// Human-readable message. Defaults to the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category such as "mesh", "texture", "codec", "spec".
    fn category(&self) -> &'static str;
}
