use thiserror::Error;

use crate::validate::ValidationReport;

/// Errors surfaced by the form engine.
#[derive(Debug, Error)]
pub enum FormsError {
    #[error("invalid form schema: {0}")]
    InvalidSchema(String),
    #[error("invalid form values: {0}")]
    InvalidValues(String),
    #[error("field index {index} out of range ({len} fields)")]
    FieldIndexOutOfRange { index: usize, len: usize },
    #[error("form template not found: {0}")]
    TemplateNotFound(String),
    #[error("Please select a form type")]
    NoTemplateSelected,
    #[error("{}", .0.notice().unwrap_or("form values are invalid"))]
    Invalid(ValidationReport),
    #[error("form session is closed")]
    SessionClosed,
    #[error("Failed to generate PDF preview")]
    MissingPreview,
    #[error("template source error: {0}")]
    Source(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
