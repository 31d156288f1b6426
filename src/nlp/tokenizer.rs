//! Unicode-aware word tokenization
//!
//! Words are found with UAX #29 word boundaries, which keep accented and
//! non-Latin scripts intact. Language-specific clitics (English `n't`,
//! Portuguese `d'`) are then split off their host word, the way treebank
//! style tokenizers do.

use super::resources::{CliticRules, LanguageResources};
use unicode_segmentation::UnicodeSegmentation;

/// A word tokenizer following UAX #29 plus clitic rules
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    clitics: CliticRules,
}

impl Tokenizer {
    /// Create a tokenizer without clitic rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizer using the clitic rules of a loaded language
    pub fn from_resources(resources: &LanguageResources) -> Self {
        Self::new().with_clitics(resources.clitics.clone())
    }

    /// Set clitic rules
    pub fn with_clitics(mut self, clitics: CliticRules) -> Self {
        self.clitics = clitics;
        self
    }

    /// Split text into word and punctuation tokens.
    ///
    /// Whitespace is dropped; punctuation comes back as its own tokens so
    /// the caller decides what to keep.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            let segment = normalize_apostrophes(segment);
            if segment.contains('\'') && segment.chars().count() > 1 {
                self.split_clitics(&segment, &mut tokens);
            } else {
                tokens.push(segment);
            }
        }

        tokens
    }

    /// Split at most one prefix and one suffix clitic off `word`
    fn split_clitics(&self, word: &str, out: &mut Vec<String>) {
        let mut rest = word;

        if let Some(prefix) = self
            .clitics
            .prefixes
            .iter()
            .find(|p| rest.len() > p.len() && rest.starts_with(p.as_str()))
        {
            out.push(prefix.clone());
            rest = &rest[prefix.len()..];
        }

        if let Some(suffix) = self
            .clitics
            .suffixes
            .iter()
            .find(|s| rest.len() > s.len() && rest.ends_with(s.as_str()))
        {
            out.push(rest[..rest.len() - suffix.len()].to_string());
            out.push(suffix.clone());
        } else {
            out.push(rest.to_string());
        }
    }
}

/// Map typographic apostrophes onto `'`
fn normalize_apostrophes(segment: &str) -> String {
    segment
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
            other => other,
        })
        .collect()
}
