//! Core types for rapid_topics
//!
//! This module defines the data carried between pipeline stages: documents,
//! topics, keyword sets, cluster assignments, and the pipeline configuration.

use crate::errors::{Result, TopicError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Language
// ============================================================================

/// Languages with bundled tokenizer rules, stopwords and lemma data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Portuguese,
    English,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 2] = [Language::Portuguese, Language::English];

    /// Full lowercase name, also used as the resource file stem
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Portuguese => "portuguese",
            Language::English => "english",
        }
    }

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
            Language::English => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = TopicError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "pt" | "por" | "portuguese" | "português" | "portugues" => Ok(Language::Portuguese),
            "en" | "eng" | "english" => Ok(Language::English),
            other => Err(TopicError::invalid_config(format!(
                "unsupported language '{other}' (expected one of: pt, en)"
            ))),
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A raw input document and its position in the current batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Positional index within the batch (0-based)
    pub index: usize,
    /// Where the text came from: a file name, or `None` for typed text
    pub source: Option<String>,
    /// The raw, unnormalized text
    pub text: String,
}

impl Document {
    /// Create a document without a source name
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            source: None,
            text: text.into(),
        }
    }

    /// Attach a source name (usually the uploaded file name)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Human-readable label for listings
    pub fn label(&self) -> String {
        match &self.source {
            Some(source) => format!("Document {} ({})", self.index + 1, source),
            None => format!("Document {}", self.index + 1),
        }
    }
}

/// A document paired with its normalized token sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedDocument {
    pub document: Document,
    pub tokens: Vec<String>,
}

impl NormalizedDocument {
    pub fn new(document: Document, tokens: Vec<String>) -> Self {
        Self { document, tokens }
    }

    /// Whether normalization left any token
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// ============================================================================
// Topics & Keywords
// ============================================================================

/// A word and its probability within a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicWord {
    pub word: String,
    pub weight: f64,
}

impl TopicWord {
    pub fn new(word: impl Into<String>, weight: f64) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }
}

/// A fitted topic: its id plus the full word distribution, ranked by
/// descending weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: usize,
    pub words: Vec<TopicWord>,
}

impl Topic {
    pub fn new(id: usize, words: Vec<TopicWord>) -> Self {
        Self { id, words }
    }

    /// The `n` highest-weighted words
    pub fn top(&self, n: usize) -> &[TopicWord] {
        &self.words[..n.min(self.words.len())]
    }

    /// Copy of this topic truncated to its `n` best words
    pub fn truncated(&self, n: usize) -> Topic {
        Topic::new(self.id, self.top(n).to_vec())
    }

    /// Render the top `n` words as `0.045*"word" + 0.031*"other"`
    pub fn format_weights(&self, n: usize) -> String {
        self.top(n)
            .iter()
            .map(|tw| format!("{:.3}*\"{}\"", tw.weight, tw.word))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// The words that drive summarization and recommendation.
///
/// Order follows the topic ranking. Two matching policies are exposed on
/// purpose: substring containment for sentences and exact equality for
/// tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    /// Build from arbitrary words; duplicates are dropped, order kept
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for word in words {
            let word = word.into();
            if !out.contains(&word) {
                out.push(word);
            }
        }
        Self { words: out }
    }

    /// The `n` best words of a topic
    pub fn from_topic(topic: &Topic, n: usize) -> Self {
        Self::new(topic.top(n).iter().map(|tw| tw.word.clone()))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if any keyword occurs anywhere inside `text` (substring test)
    pub fn any_substring_of(&self, text: &str) -> bool {
        self.words.iter().any(|kw| text.contains(kw.as_str()))
    }

    /// True if `token` equals one of the keywords
    pub fn contains_exact(&self, token: &str) -> bool {
        self.words.iter().any(|kw| kw == token)
    }
}

// ============================================================================
// Cluster Assignment
// ============================================================================

/// One cluster label per document, in batch order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    num_clusters: usize,
}

impl ClusterAssignment {
    /// Wrap raw labels. Every label must be below `num_clusters`.
    pub fn new(labels: Vec<usize>, num_clusters: usize) -> Result<Self> {
        if let Some(bad) = labels.iter().find(|&&l| l >= num_clusters) {
            return Err(TopicError::clustering(format!(
                "label {bad} out of range for {num_clusters} clusters"
            )));
        }
        Ok(Self {
            labels,
            num_clusters,
        })
    }

    /// Label of a document, by batch index
    pub fn label(&self, document: usize) -> Option<usize> {
        self.labels.get(document).copied()
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Indices of the documents assigned to `cluster`
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == cluster)
            .map(|(i, _)| i)
            .collect()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Smallest cluster count the control surface offers
pub const MIN_CLUSTERS: usize = 2;
/// Largest cluster count the control surface offers
pub const MAX_CLUSTERS: usize = 10;

/// Configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language of stopwords, tokenizer rules and lemma data
    pub language: Language,
    /// Requested number of clusters, also used as the number of topics
    pub num_clusters: usize,
    /// Seed shared by k-means and LDA
    pub seed: u64,
    /// Independent k-means restarts; the lowest-inertia run wins
    pub kmeans_runs: usize,
    /// Iteration cap per k-means run
    pub kmeans_max_iterations: u64,
    /// k-means convergence tolerance
    pub kmeans_tolerance: f64,
    /// LDA outer passes over the corpus
    pub lda_passes: usize,
    /// Gibbs sweeps per LDA pass
    pub lda_iterations: usize,
    /// Document-topic prior (None = 1 / num_topics)
    pub lda_alpha: Option<f64>,
    /// Topic-word prior (None = 1 / num_topics)
    pub lda_eta: Option<f64>,
    /// Words shown per topic
    pub topic_words: usize,
    /// Words of topic 0 used as keywords
    pub keyword_count: usize,
    /// Maximum sentences in the generated summary
    pub summary_sentences: usize,
    /// Directory holding downloaded language resources
    pub cache_dir: PathBuf,
}

/// Default location of the language resource cache
pub const DEFAULT_CACHE_DIR: &str = "lang_data";

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: Language::Portuguese,
            num_clusters: MIN_CLUSTERS,
            seed: 42,
            kmeans_runs: 10,
            kmeans_max_iterations: 300,
            kmeans_tolerance: 1e-4,
            lda_passes: 15,
            lda_iterations: 50,
            lda_alpha: None,
            lda_eta: None,
            topic_words: 10,
            keyword_count: 5,
            summary_sentences: 3,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config; absent fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(MIN_CLUSTERS..=MAX_CLUSTERS).contains(&self.num_clusters) {
            return Err(TopicError::invalid_config(format!(
                "num_clusters must be between {MIN_CLUSTERS} and {MAX_CLUSTERS}, got {}",
                self.num_clusters
            )));
        }

        if self.kmeans_runs == 0 {
            return Err(TopicError::invalid_config("kmeans_runs must be > 0"));
        }

        if self.kmeans_max_iterations == 0 {
            return Err(TopicError::invalid_config(
                "kmeans_max_iterations must be > 0",
            ));
        }

        if self.kmeans_tolerance <= 0.0 {
            return Err(TopicError::invalid_config("kmeans_tolerance must be > 0"));
        }

        if self.lda_passes == 0 || self.lda_iterations == 0 {
            return Err(TopicError::invalid_config(
                "lda_passes and lda_iterations must be > 0",
            ));
        }

        for (name, prior) in [("lda_alpha", self.lda_alpha), ("lda_eta", self.lda_eta)] {
            if let Some(value) = prior {
                if !(value > 0.0 && value.is_finite()) {
                    return Err(TopicError::invalid_config(format!(
                        "{name} must be a positive finite number, got {value}"
                    )));
                }
            }
        }

        if self.keyword_count == 0 {
            return Err(TopicError::invalid_config("keyword_count must be > 0"));
        }

        if self.summary_sentences == 0 {
            return Err(TopicError::invalid_config(
                "summary_sentences must be > 0",
            ));
        }

        Ok(())
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Builder method: set requested cluster count
    pub fn with_num_clusters(mut self, num_clusters: usize) -> Self {
        self.num_clusters = num_clusters;
        self
    }

    /// Builder method: set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method: set LDA passes and sweeps per pass
    pub fn with_lda_schedule(mut self, passes: usize, iterations: usize) -> Self {
        self.lda_passes = passes;
        self.lda_iterations = iterations;
        self
    }

    /// Builder method: set words shown per topic
    pub fn with_topic_words(mut self, n: usize) -> Self {
        self.topic_words = n;
        self
    }

    /// Builder method: set keyword count
    pub fn with_keyword_count(mut self, n: usize) -> Self {
        self.keyword_count = n;
        self
    }

    /// Builder method: set maximum summary sentences
    pub fn with_summary_sentences(mut self, n: usize) -> Self {
        self.summary_sentences = n;
        self
    }

    /// Builder method: set resource cache directory
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }
}
