//! Summaries and recommendations driven by a keyword set

pub mod recommend;
pub mod selector;

pub use recommend::recommend;
pub use selector::{summarize, SentenceSelector, Summary, FALLBACK_SUMMARY};
