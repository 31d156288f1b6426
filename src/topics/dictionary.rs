//! Token dictionary for the topic model
//!
//! Ids are handed out in first-appearance order across documents; within
//! one document, newly seen tokens are numbered in sorted order. This
//! mapping is separate from the vector space vocabulary and the two must
//! not be mixed.

use rustc_hash::FxHashMap;

/// Token → id mapping plus a bag-of-words converter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    token2id: FxHashMap<String, usize>,
    id2token: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary covering every token of `documents`
    pub fn from_documents<S: AsRef<[String]>>(documents: &[S]) -> Self {
        let mut dict = Self::new();
        for doc in documents {
            dict.add_document(doc.as_ref());
        }
        dict
    }

    /// Register the unseen tokens of one document
    pub fn add_document(&mut self, tokens: &[String]) {
        let mut missing: Vec<&String> = tokens
            .iter()
            .filter(|t| !self.token2id.contains_key(t.as_str()))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        for token in missing {
            self.token2id.insert(token.clone(), self.id2token.len());
            self.id2token.push(token.clone());
        }
    }

    /// Sparse `(id, count)` representation of a document, sorted by id.
    /// Unknown tokens are skipped.
    pub fn doc2bow(&self, tokens: &[String]) -> Vec<(usize, u32)> {
        let mut counts: FxHashMap<usize, u32> = FxHashMap::default();
        for token in tokens {
            if let Some(&id) = self.token2id.get(token.as_str()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let mut bow: Vec<(usize, u32)> = counts.into_iter().collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id2token.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_first_appearance_then_sorted() {
        let dict = Dictionary::from_documents(&[doc(&["zeta", "alfa", "zeta"]), doc(&["beta", "alfa"])]);
        assert_eq!(dict.id("alfa"), Some(0));
        assert_eq!(dict.id("zeta"), Some(1));
        assert_eq!(dict.id("beta"), Some(2));
        assert_eq!(dict.token(1), Some("zeta"));
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_doc2bow() {
        let dict = Dictionary::from_documents(&[doc(&["rede", "dado"])]);
        let bow = dict.doc2bow(&doc(&["rede", "rede", "dado", "novo"]));
        assert_eq!(bow, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_empty() {
        let dict = Dictionary::from_documents(&[doc(&[]), doc(&[])]);
        assert!(dict.is_empty());
        assert!(dict.doc2bow(&doc(&["x"])).is_empty());
    }
}
