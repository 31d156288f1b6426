//! Language processing: resource cache, tokenization, stopwords,
//! lemmatization and the normalizer that chains them.

pub mod lemmatizer;
pub mod normalizer;
pub mod resources;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::TextNormalizer;
pub use resources::{BundledSource, LanguageResources, ResourceCache, ResourceKind, ResourceSource};
