//! Pipeline runtime errors.
//!
//! [`PipelineRuntimeError`] wraps a failure from any stage with a stable
//! [`ErrorCode`] for programmatic matching, the name of the stage that
//! failed, a human-readable `message`, and an optional `hint` suggesting a
//! fix.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error_code::ErrorCode;
use crate::errors::TopicError;

/// A failure that occurred while executing a pipeline stage.
///
/// # Display format
///
/// ```text
/// [insufficient_documents] (stage: validate): Insufficient documents: found 1, need at least 2
/// ```
///
/// # JSON format
///
/// ```json
/// {
///   "code": "insufficient_documents",
///   "stage": "validate",
///   "message": "Insufficient documents: found 1, need at least 2",
///   "hint": "Add at least one more document"
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("[{code}] (stage: {stage}): {message}")]
pub struct PipelineRuntimeError {
    /// Stable error code for programmatic matching.
    pub code: ErrorCode,

    /// Name of the pipeline stage that failed (e.g., `"normalize"`, `"cluster"`).
    pub stage: String,

    /// Human-readable description of the failure.
    pub message: String,

    /// Optional suggestion for how to fix or work around the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineRuntimeError {
    /// Create a new runtime error.
    pub fn new(code: ErrorCode, stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            stage: stage.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a hint suggesting how to fix or work around the failure.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Wrap a library error raised by `stage`, adding a default hint for
    /// the failures a user can act on.
    pub fn from_topic_error(stage: impl Into<String>, err: &TopicError) -> Self {
        let error = Self::new(err.code(), stage, err.to_string());
        match err {
            TopicError::NoDocuments { .. } => {
                error.with_hint("Enter some text or pass at least one readable file")
            }
            TopicError::InsufficientDocuments { required, .. } => error.with_hint(format!(
                "Provide at least {required} documents to compare"
            )),
            TopicError::EmptyInput { .. } | TopicError::EmptyVocabulary => error.with_hint(
                "Every document lost all of its words to stopword and length filtering; \
                 check the language setting",
            ),
            TopicError::ResourceUnavailable { .. } => {
                error.with_hint("Check that the cache directory is writable")
            }
            _ => error,
        }
    }

    /// Whether the failure was caused by the batch rather than the setup
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::NoDocuments
                | ErrorCode::EmptyInput
                | ErrorCode::InsufficientDocuments
                | ErrorCode::EmptyVocabulary
        )
    }
}
