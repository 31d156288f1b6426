//! Text normalization
//!
//! Turns raw document text into the token sequence every later stage works
//! on: lowercase, tokenize, keep alphanumeric non-stopword tokens longer
//! than two characters, then lemmatize.

use super::lemmatizer::Lemmatizer;
use super::resources::{LanguageResources, ResourceCache, ResourceSource};
use super::stopwords::StopwordFilter;
use super::tokenizer::Tokenizer;
use crate::errors::Result;
use crate::types::{Document, Language, NormalizedDocument};

/// Tokens must be strictly longer than this many characters
pub const MIN_TOKEN_CHARS: usize = 2;

/// Language-bound normalizer
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    language: Language,
    tokenizer: Tokenizer,
    stopwords: StopwordFilter,
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    /// Build from already loaded resources
    pub fn from_resources(resources: &LanguageResources) -> Self {
        Self {
            language: resources.language,
            tokenizer: Tokenizer::from_resources(resources),
            stopwords: StopwordFilter::from_resources(resources),
            lemmatizer: Lemmatizer::from_resources(resources),
        }
    }

    /// Make sure the cache holds `language`, then build from it.
    ///
    /// This is the only step of a run that can touch the network or disk
    /// for language data; a failure here is fatal.
    pub fn from_cache<S: ResourceSource>(cache: &ResourceCache<S>, language: Language) -> Result<Self> {
        Ok(Self::from_resources(&cache.load(language)?))
    }

    /// Replace the stopword filter
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Normalize one text. An empty result is valid.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.tokenizer
            .tokenize(&lowered)
            .into_iter()
            .filter(|token| self.is_valid_token(token))
            .map(|token| {
                let lemma = self.lemmatizer.lemmatize(&token);
                if lemma != token && self.is_valid_token(&lemma) {
                    lemma
                } else {
                    token
                }
            })
            .collect()
    }

    /// Normalize a whole batch, keeping each document next to its tokens
    pub fn normalize_all(&self, documents: &[Document]) -> Vec<NormalizedDocument> {
        documents
            .iter()
            .map(|doc| NormalizedDocument::new(doc.clone(), self.normalize(&doc.text)))
            .collect()
    }

    fn is_valid_token(&self, token: &str) -> bool {
        let mut chars = 0;
        for c in token.chars() {
            if !c.is_alphanumeric() {
                return false;
            }
            chars += 1;
        }
        chars > MIN_TOKEN_CHARS && !self.stopwords.is_stopword(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(language: Language) -> TextNormalizer {
        TextNormalizer::from_resources(&LanguageResources::bundled(language).unwrap())
    }

    #[test]
    fn test_portuguese_pipeline() {
        let n = normalizer(Language::Portuguese);
        let tokens = n.normalize("Redes neurais e modelos de linguagem.");
        assert_eq!(tokens, vec!["rede", "neural", "modelo", "linguagem"]);
    }

    #[test]
    fn test_english_pipeline() {
        let n = normalizer(Language::English);
        let tokens = n.normalize("The telescopes don't photograph galaxies!");
        assert_eq!(tokens, vec!["telescope", "photograph", "galaxy"]);
    }

    #[test]
    fn test_english_singular_nouns_survive() {
        let n = normalizer(Language::English);
        for word in ["bias", "series", "species", "lens", "chaos", "canvas", "physics"] {
            let tokens = n.normalize(word);
            // Either kept as is or dropped as a stopword, never mangled
            assert!(tokens.is_empty() || tokens == vec![word], "{word} -> {tokens:?}");
        }
    }

    #[test]
    fn test_short_and_punctuation_tokens_dropped() {
        let n = normalizer(Language::English);
        let tokens = n.normalize("AI, ML & co-op 42 x1 zebra");
        assert_eq!(tokens, vec!["zebra"]);
    }

    #[test]
    fn test_lowercases() {
        let n = normalizer(Language::English);
        assert_eq!(n.normalize("QUANTUM Telescopes"), vec!["quantum", "telescope"]);
    }

    #[test]
    fn test_empty_output_is_valid() {
        let n = normalizer(Language::Portuguese);
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("de a o que").is_empty());
    }

    #[test]
    fn test_lemma_must_stay_valid() {
        let pt = LanguageResources::bundled(Language::Portuguese).unwrap();
        // "dado" would be the lemma of "dados"; as a stopword it is rejected
        let n = TextNormalizer::from_resources(&pt)
            .with_stopwords(StopwordFilter::from_resources(&pt).with_extra(["dado"]));
        assert_eq!(n.normalize("dados"), vec!["dados"]);
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let n = normalizer(Language::English);
        let docs = vec![Document::new(0, "cats purr"), Document::new(1, "dogs bark")];
        let out = n.normalize_all(&docs);
        assert_eq!(out[0].tokens, vec!["cat", "purr"]);
        assert_eq!(out[1].tokens, vec!["dog", "bark"]);
        assert_eq!(out[1].document.index, 1);
    }
}
