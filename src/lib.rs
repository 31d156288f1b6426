//! # rapid_topics
//!
//! Topic detection and recommendations for small batches of academic text.
//!
//! A batch of documents is normalized (tokenized, stopword-filtered and
//! lemmatized), turned into a bag-of-words matrix, clustered with k-means
//! and modelled with LDA. The top words of the first topic then drive a
//! short extractive summary of the first document and an optional list of
//! recommended documents.
//!
//! ## Features
//!
//! - **Deterministic**: k-means and LDA are seeded, so a batch always gives
//!   the same clusters and topics
//! - **Unicode-aware**: UAX #29 tokenization keeps accented words intact
//! - **Portuguese and English**: bundled stopwords, clitic rules and lemma
//!   data, cached on disk on first use

pub mod clustering;
pub mod errors;
pub mod input;
pub mod nlp;
pub mod pipeline;
pub mod summarizer;
pub mod topics;
pub mod types;
pub mod vectorize;

// Re-export commonly used types
pub use errors::{Result, TopicError};
pub use types::{
    ClusterAssignment, Document, KeywordSet, Language, NormalizedDocument, PipelineConfig, Topic,
    TopicWord,
};

// Re-export main functionality
pub use clustering::{effective_cluster_count, KMeansAssigner};
pub use input::{decode_text, BatchBuilder, DecodeWarning, LoadedBatch, TextEncoding};
pub use nlp::{stopwords::StopwordFilter, tokenizer::Tokenizer, ResourceCache, TextNormalizer};
pub use pipeline::{ErrorCode, Pipeline, PipelineOutput, PipelineRuntimeError, RunOptions};
pub use summarizer::{recommend, summarize, SentenceSelector, Summary};
pub use topics::LdaTopicExtractor;
pub use vectorize::{build, DocumentTermMatrix, Vocabulary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
