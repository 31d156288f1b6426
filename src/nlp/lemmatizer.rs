//! Rule-based lemmatization
//!
//! Reduces inflected nouns and adjectives to their dictionary form. Lookup
//! order is the language's exception table first, then an ordered list of
//! suffix rewrites where the first matching rule wins.
//!
//! This handles plural morphology only. Verbs are left as they are, like a
//! noun-only WordNet lemmatizer.

use super::resources::LanguageResources;
use crate::types::Language;
use rustc_hash::FxHashMap;

/// English plural rewrites, longest suffix first
const ENGLISH_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
];

/// Portuguese plural rewrites, longest suffix first
const PORTUGUESE_RULES: &[(&str, &str)] = &[
    ("ões", "ão"),
    ("ães", "ão"),
    ("ãos", "ão"),
    ("ores", "or"),
    ("ais", "al"),
    ("éis", "el"),
    ("eis", "el"),
    ("óis", "ol"),
    ("uis", "ul"),
    ("zes", "z"),
    ("ns", "m"),
];

/// A lemmatizer for one language
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    language: Language,
    exceptions: FxHashMap<String, String>,
    /// Minimum length (in chars) a lemma must keep
    min_length: usize,
}

impl Lemmatizer {
    /// Create a lemmatizer with rules only, no exception table
    pub fn new(language: Language) -> Self {
        Self {
            language,
            exceptions: FxHashMap::default(),
            min_length: 3,
        }
    }

    /// Lemmatizer using the exception table of a loaded language
    pub fn from_resources(resources: &LanguageResources) -> Self {
        Self {
            exceptions: resources.lemmas.clone(),
            ..Self::new(resources.language)
        }
    }

    /// Set minimum lemma length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Reduce a lowercase word to its base form.
    ///
    /// Returns the word unchanged when no rule applies or when the
    /// rewritten form would be shorter than the minimum length.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }

        let rules = match self.language {
            Language::English => ENGLISH_RULES,
            Language::Portuguese => PORTUGUESE_RULES,
        };

        for (suffix, replacement) in rules {
            if let Some(stem) = word.strip_suffix(suffix) {
                return self.accept(word, format!("{stem}{replacement}"));
            }
        }

        match self.strip_plural_s(word) {
            Some(stem) => self.accept(word, stem.to_string()),
            None => word.to_string(),
        }
    }

    /// Bare `-s` plural, guarded against words that merely end in `s`
    fn strip_plural_s<'a>(&self, word: &'a str) -> Option<&'a str> {
        let stem = word.strip_suffix('s')?;
        let before = stem.chars().last()?;
        match self.language {
            // status, analysis, class, bias, chaos
            Language::English => (!matches!(before, 's' | 'u' | 'i' | 'a' | 'o')).then_some(stem),
            // casas, dados, modelos; not mês, lápis, ônibus
            Language::Portuguese => matches!(before, 'a' | 'e' | 'i' | 'o' | 'u').then_some(stem),
        }
    }

    fn accept(&self, word: &str, lemma: String) -> String {
        if lemma.chars().count() >= self.min_length {
            lemma
        } else {
            word.to_string()
        }
    }
}
