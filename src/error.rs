use std::path::PathBuf;
use thiserror::Error;

/// The main error type for diagcat operations.
///
/// Loader failures keep their individual kinds so callers can tell them
/// apart; the interactive shell decides how much of that detail to show.
#[derive(Debug, Error)]
pub enum DiagcatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid filename '{file_name}': expected a non-empty name ending in .xml")]
    InvalidFilename { file_name: String },

    #[error("Diagram '{key}' is already loaded")]
    DuplicateDiagram { key: String },

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse XML from {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    #[error("Missing <{field}> in {context} of {path}")]
    MissingField {
        path: PathBuf,
        field: String,
        context: String,
    },

    #[error("Invalid <{field}> value '{value}' in {context} of {path}; expected integer")]
    TypeError {
        path: PathBuf,
        field: String,
        context: String,
        value: String,
    },

    #[error("Diagram '{key}' not found")]
    NotFound { key: String },

    #[error("Invalid input for {field}: '{value}'")]
    InvalidInput { field: String, value: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl DiagcatError {
    /// Returns true for failures raised while loading a diagram file.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DiagcatError::InvalidFilename { .. }
                | DiagcatError::DuplicateDiagram { .. }
                | DiagcatError::FileRead { .. }
                | DiagcatError::XmlParse { .. }
                | DiagcatError::MissingField { .. }
                | DiagcatError::TypeError { .. }
        )
    }

    /// Returns true when the document itself was malformed (missing or mistyped fields).
    pub fn is_malformed_document(&self) -> bool {
        matches!(
            self,
            DiagcatError::MissingField { .. } | DiagcatError::TypeError { .. }
        )
    }
}
