//! Error types for rapid_topics
//!
//! Every stage of the pipeline reports failures through [`TopicError`].
//! Variants are distinct per failure point so callers can tell a bad batch
//! apart from a bad configuration or a missing language resource.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TopicError>;

/// Main error type for rapid_topics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopicError {
    /// The batch holds no documents at all (nothing typed, nothing decodable)
    #[error("No valid documents: {message}")]
    NoDocuments { message: String },

    /// Every document normalized to an empty token sequence
    #[error("Empty input: {message}")]
    EmptyInput { message: String },

    /// Fewer documents than clustering can meaningfully work with
    #[error("Insufficient documents: found {found}, need at least {required}")]
    InsufficientDocuments { found: usize, required: usize },

    /// No terms were observed across the whole batch
    #[error("Empty vocabulary: every token sequence is empty")]
    EmptyVocabulary,

    /// Configuration or argument validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A language resource is missing and could not be fetched or read.
    /// Fatal for the whole run.
    #[error("Resource '{resource}' unavailable: {message}")]
    ResourceUnavailable { resource: String, message: String },

    /// The k-means backend rejected the input
    #[error("Clustering failed: {message}")]
    Clustering { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl TopicError {
    /// Create a no documents error
    pub fn no_documents(message: impl Into<String>) -> Self {
        Self::NoDocuments {
            message: message.into(),
        }
    }

    /// Create an empty input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    /// Create an insufficient documents error
    pub fn insufficient_documents(found: usize, required: usize) -> Self {
        Self::InsufficientDocuments { found, required }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a resource unavailable error
    pub fn resource_unavailable(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResourceUnavailable {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a clustering error
    pub fn clustering(message: impl Into<String>) -> Self {
        Self::Clustering {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Input errors block the current interaction but say nothing about
    /// the installation; the user can fix them by changing the batch.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NoDocuments { .. }
                | Self::EmptyInput { .. }
                | Self::InsufficientDocuments { .. }
                | Self::EmptyVocabulary
        )
    }

    /// Check if this error is fatal for the whole run rather than one batch
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ResourceUnavailable { .. })
    }
}

impl From<serde_json::Error> for TopicError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
