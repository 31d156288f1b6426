//! Stage trait definitions for the pipeline.
//!
//! The two model-fitting stages sit behind traits so the runner can be
//! composed with other backends (or deterministic fakes in tests). Both are
//! statically dispatched.

use crate::clustering::KMeansAssigner;
use crate::errors::Result;
use crate::topics::LdaTopicExtractor;
use crate::types::{ClusterAssignment, Topic};
use crate::vectorize::DocumentTermMatrix;

// ============================================================================
// ClusterAssigner: document-term matrix to cluster labels
// ============================================================================

/// Partitions the rows of a document-term matrix.
///
/// # Contract
///
/// - **Input**: a matrix with at least `k` rows, and `k >= 1`.
/// - **Output**: exactly one label in `[0, k)` per row.
/// - **Deterministic**: same matrix and `k` give the same labels.
pub trait ClusterAssigner {
    fn assign(&self, matrix: &DocumentTermMatrix, k: usize) -> Result<ClusterAssignment>;
}

impl ClusterAssigner for KMeansAssigner {
    fn assign(&self, matrix: &DocumentTermMatrix, k: usize) -> Result<ClusterAssignment> {
        KMeansAssigner::assign(self, matrix, k)
    }
}

// ============================================================================
// TopicExtractor: token sequences to ranked topics
// ============================================================================

/// Fits a topic model over normalized token sequences.
///
/// # Contract
///
/// - **Input**: token sequences, not all empty, and `num_topics >= 1`.
/// - **Output**: topics `0..num_topics` in id order, each ranked by
///   descending weight.
/// - **Deterministic**: same input gives the same topics.
pub trait TopicExtractor {
    fn extract(&self, sequences: &[Vec<String>], num_topics: usize) -> Result<Vec<Topic>>;
}

impl TopicExtractor for LdaTopicExtractor {
    fn extract(&self, sequences: &[Vec<String>], num_topics: usize) -> Result<Vec<Topic>> {
        LdaTopicExtractor::extract(self, sequences, num_topics)
    }
}
