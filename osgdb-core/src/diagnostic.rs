//! Non-fatal validation findings produced while reading records.

use thiserror::Error;

/// What is wrong with a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("missing title heading")]
    MissingTitle,

    #[error("required field is missing")]
    MissingField,

    #[error("unknown field")]
    UnknownField,

    #[error("field given more than once")]
    DuplicateField,

    #[error("field out of order (must come before {before})")]
    OutOfOrder { before: String },

    #[error("field has no value")]
    EmptyField,

    #[error("unknown {vocabulary} '{value}'")]
    UnknownValue { vocabulary: String, value: String },

    #[error("invalid URL '{value}'")]
    InvalidUrl { value: String },

    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("platforms not in canonical order")]
    PlatformOrder,

    #[error("no recommended keyword given")]
    NoRecommendedKeyword,

    #[error("unknown multiplayer mode '{mode}'")]
    UnknownMultiplayerMode { mode: String },

    #[error("unrecognized line '{line}'")]
    StrayLine { line: String },

    #[error("title also used by {other}")]
    DuplicateTitle { other: String },
}

/// A finding about one record, keyed by file and (when known) field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    pub field: Option<String>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(file: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            file: file.into(),
            field: None,
            kind,
        }
    }

    pub fn for_field(file: impl Into<String>, field: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            file: file.into(),
            field: Some(field.into()),
            kind,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}: {}", self.file, field, self.kind),
            None => write!(f, "{}: {}", self.file, self.kind),
        }
    }
}
