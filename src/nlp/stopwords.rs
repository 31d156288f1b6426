//! Stopword filtering
//!
//! Stopword lists come from the language resource cache; callers can extend
//! them with their own words.

use super::resources::LanguageResources;
use rustc_hash::FxHashSet;

/// Case-insensitive stopword membership test
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    words: FxHashSet<String>,
}

impl StopwordFilter {
    /// Build a filter from any list of words
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The stopword list of a loaded language
    pub fn from_resources(resources: &LanguageResources) -> Self {
        Self {
            words: resources.stopwords.clone(),
        }
    }

    /// Add extra stopwords on top of the language list
    pub fn with_extra<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        self
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        // Tokens reaching the normalizer are already lowercase; this path
        // only serves ad-hoc callers.
        word.chars().any(char::is_uppercase) && self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn test_custom_list() {
        let filter = StopwordFilter::new(["de", "The", " a "]);
        assert!(filter.is_stopword("de"));
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("THE"));
        assert!(filter.is_stopword("a"));
        assert!(!filter.is_stopword("rede"));
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_with_extra() {
        let filter = StopwordFilter::new(["de"]).with_extra(["artigo"]);
        assert!(filter.is_stopword("artigo"));
        assert!(filter.is_stopword("de"));
    }

    #[test]
    fn test_bundled_lists() {
        let pt = LanguageResources::bundled(Language::Portuguese).unwrap();
        let filter = StopwordFilter::from_resources(&pt);
        assert!(filter.is_stopword("de"));
        assert!(filter.is_stopword("que"));
        assert!(!filter.is_stopword("proteína"));

        let en = LanguageResources::bundled(Language::English).unwrap();
        let filter = StopwordFilter::from_resources(&en);
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("and"));
        assert!(!filter.is_stopword("telescope"));
    }
}
