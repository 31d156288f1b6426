//! Pipeline inputs and outputs.
//!
//! [`RunOptions`] carries the per-interaction switches; [`PipelineOutput`]
//! is everything one run produces. The output serializes to JSON and
//! renders as plain text for the command line.

use serde::Serialize;
use std::fmt;

use crate::summarizer::Summary;
use crate::types::{ClusterAssignment, Document, KeywordSet, Topic};

/// Per-run switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Compute the recommendation list
    pub recommend: bool,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recommendations(mut self, recommend: bool) -> Self {
        self.recommend = recommend;
        self
    }
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Cluster count asked for
    pub requested_clusters: usize,
    /// Cluster and topic count actually used
    pub effective_clusters: usize,
    /// Display label of each document, in batch order
    pub documents: Vec<String>,
    pub clusters: ClusterAssignment,
    /// Topics in id order, each cut to its top words
    pub topics: Vec<Topic>,
    /// Top words of topic 0
    pub keywords: KeywordSet,
    /// Present only when recommendations were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Document>>,
    /// Summary of the first document
    pub summary: Summary,
}

impl PipelineOutput {
    /// Whether the requested cluster count had to be reduced
    pub fn was_clamped(&self) -> bool {
        self.effective_clusters < self.requested_clusters
    }

    pub fn to_json_pretty(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Length of the text preview shown for a recommended document
const PREVIEW_CHARS: usize = 80;

fn preview(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    }
}

impl fmt::Display for PipelineOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.was_clamped() {
            writeln!(
                f,
                "Clusters ({} requested, {} used):",
                self.requested_clusters, self.effective_clusters
            )?;
        } else {
            writeln!(f, "Clusters:")?;
        }
        for (label, cluster) in self.documents.iter().zip(self.clusters.labels()) {
            writeln!(f, "  {label}: Cluster {cluster}")?;
        }

        writeln!(f)?;
        writeln!(f, "Topics:")?;
        for topic in &self.topics {
            writeln!(
                f,
                "  Topic {}: {}",
                topic.id + 1,
                topic.format_weights(topic.words.len())
            )?;
        }

        if let Some(recommendations) = &self.recommendations {
            writeln!(f)?;
            writeln!(f, "Recommended documents (first topic):")?;
            if recommendations.is_empty() {
                writeln!(f, "  No recommendations found.")?;
            }
            for doc in recommendations {
                writeln!(f, "  - {}: {}", doc.label(), preview(&doc.text))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Summary (first topic):")?;
        write!(f, "  {}", self.summary)
    }
}
