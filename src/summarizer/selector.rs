//! Keyword-driven extractive summary
//!
//! Sentences are cut on the literal `.` character, nothing smarter. A
//! sentence is selected when its lowercase form contains any keyword as a
//! substring, so `"dog"` selects a sentence about `"Dogs"`.

use crate::types::KeywordSet;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Returned instead of an empty summary
pub const FALLBACK_SUMMARY: &str = "No sentence mentions the topic keywords.";

/// Default cap on selected sentences
pub const DEFAULT_MAX_SENTENCES: usize = 3;

/// Selected sentences, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub sentences: Vec<String>,
    /// Sentences that matched before the cap was applied
    pub matched: usize,
    fallback: String,
}

impl Summary {
    /// True when no sentence matched
    pub fn is_fallback(&self) -> bool {
        self.sentences.is_empty()
    }

    /// `"First. Second."`, or the fallback message
    pub fn text(&self) -> String {
        if self.sentences.is_empty() {
            self.fallback.clone()
        } else {
            format!("{}.", self.sentences.join(". "))
        }
    }
}

/// Serializes as `{sentences, matched, text, fallback}` where `text` is the
/// rendered summary and `fallback` tells whether it is the fallback message
impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Summary", 4)?;
        state.serialize_field("sentences", &self.sentences)?;
        state.serialize_field("matched", &self.matched)?;
        state.serialize_field("text", &self.text())?;
        state.serialize_field("fallback", &self.is_fallback())?;
        state.end()
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

/// Picks summary sentences out of raw text
#[derive(Debug, Clone)]
pub struct SentenceSelector {
    max_sentences: usize,
    fallback: String,
}

impl Default for SentenceSelector {
    fn default() -> Self {
        Self {
            max_sentences: DEFAULT_MAX_SENTENCES,
            fallback: FALLBACK_SUMMARY.to_string(),
        }
    }
}

impl SentenceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sentence cap. A cap of zero is raised to one, so the
    /// fallback is used only when no sentence matches.
    pub fn with_max_sentences(mut self, max_sentences: usize) -> Self {
        self.max_sentences = max_sentences.max(1);
        self
    }

    /// Replace the fallback message
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn select(&self, text: &str, keywords: &KeywordSet) -> Summary {
        let matching: Vec<String> = split_sentences(text)
            .filter(|sentence| keywords.any_substring_of(&sentence.to_lowercase()))
            .map(str::to_string)
            .collect();
        let matched = matching.len();

        Summary {
            sentences: matching.into_iter().take(self.max_sentences).collect(),
            matched,
            fallback: self.fallback.clone(),
        }
    }
}

/// Trimmed, non-empty pieces of `text` between periods
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split('.').map(str::trim).filter(|s| !s.is_empty())
}

/// Summary text of `text` using at most `max_sentences` matching sentences
/// (at least one)
pub fn summarize(text: &str, keywords: &KeywordSet, max_sentences: usize) -> String {
    SentenceSelector::new()
        .with_max_sentences(max_sentences)
        .select(text, keywords)
        .text()
}
