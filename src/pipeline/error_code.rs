//! Stable error codes shared by every pipeline failure.
//!
//! Codes serialize as `snake_case` strings and never change meaning, so
//! scripts can match on them instead of on message text.

use serde::{Deserialize, Serialize};

use crate::errors::TopicError;

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The batch contains no documents.
    NoDocuments,
    /// Every document normalized to nothing.
    EmptyInput,
    /// Too few documents to cluster.
    InsufficientDocuments,
    /// No term survived normalization.
    EmptyVocabulary,
    /// A configuration or argument value is out of range.
    InvalidValue,
    /// A language resource could not be fetched or read.
    ResourceUnavailable,
    /// A stage failed for a reason not covered above.
    StageFailed,
    /// JSON encoding or decoding failed.
    Serialization,
}

impl ErrorCode {
    /// The serialized form, e.g. `"no_documents"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoDocuments => "no_documents",
            ErrorCode::EmptyInput => "empty_input",
            ErrorCode::InsufficientDocuments => "insufficient_documents",
            ErrorCode::EmptyVocabulary => "empty_vocabulary",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::ResourceUnavailable => "resource_unavailable",
            ErrorCode::StageFailed => "stage_failed",
            ErrorCode::Serialization => "serialization",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TopicError {
    /// The pipeline error code this error maps to.
    pub fn code(&self) -> ErrorCode {
        match self {
            TopicError::NoDocuments { .. } => ErrorCode::NoDocuments,
            TopicError::EmptyInput { .. } => ErrorCode::EmptyInput,
            TopicError::InsufficientDocuments { .. } => ErrorCode::InsufficientDocuments,
            TopicError::EmptyVocabulary => ErrorCode::EmptyVocabulary,
            TopicError::InvalidConfig { .. } => ErrorCode::InvalidValue,
            TopicError::ResourceUnavailable { .. } => ErrorCode::ResourceUnavailable,
            TopicError::Clustering { .. } => ErrorCode::StageFailed,
            TopicError::Serialization { .. } => ErrorCode::Serialization,
        }
    }
}
