//! Document recommendation
//!
//! A document is recommended when one of its normalized tokens equals a
//! keyword. Unlike summary selection this is an exact match: `"dogs"` does
//! not recommend for `"dog"`.

use crate::types::{Document, KeywordSet, NormalizedDocument};

/// Documents holding at least one keyword token, in batch order
pub fn recommend<'a>(documents: &'a [NormalizedDocument], keywords: &KeywordSet) -> Vec<&'a Document> {
    documents
        .iter()
        .filter(|doc| doc.tokens.iter().any(|t| keywords.contains_exact(t)))
        .map(|doc| &doc.document)
        .collect()
}
