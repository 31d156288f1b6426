//! Batch loading
//!
//! Collects typed text and uploaded files into the documents of one run.
//! Uploads are decoded as UTF-8, falling back to Windows-1252. A file that
//! fails both, or cannot be read at all, is left out of the batch with a
//! warning rather than failing the run.

use crate::errors::{Result, TopicError};
use crate::types::Document;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Encoding an upload was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    Utf8,
    Windows1252,
}

/// A file that was excluded from the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeWarning {
    pub source: String,
    pub reason: String,
}

impl std::fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipped '{}': {}", self.source, self.reason)
    }
}

/// Windows-1252 code points for bytes 0x80..=0x9F; `None` marks the five
/// undefined bytes
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)],
            _ => Some(char::from(b)),
        })
        .collect()
}

/// Decode uploaded bytes: UTF-8 first (a leading BOM is dropped), then
/// Windows-1252. `None` when neither applies.
pub fn decode_text(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
            Some((text.to_string(), TextEncoding::Utf8))
        }
        Err(_) => decode_windows_1252(bytes).map(|text| (text, TextEncoding::Windows1252)),
    }
}

/// Documents of one run, plus the files that were left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedBatch {
    pub documents: Vec<Document>,
    pub warnings: Vec<DecodeWarning>,
}

/// Accumulates a batch in insertion order
#[derive(Debug, Clone, Default)]
pub struct BatchBuilder {
    documents: Vec<Document>,
    warnings: Vec<DecodeWarning>,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add typed text. Blank text is ignored.
    pub fn add_manual_text(&mut self, text: &str) -> &mut Self {
        if !text.trim().is_empty() {
            let index = self.documents.len();
            self.documents.push(Document::new(index, text));
        }
        self
    }

    /// Add an uploaded file's bytes under `name`
    pub fn add_upload(&mut self, name: &str, bytes: &[u8]) -> &mut Self {
        match decode_text(bytes) {
            Some((text, encoding)) => {
                debug!(source = name, ?encoding, "upload decoded");
                let index = self.documents.len();
                self.documents
                    .push(Document::new(index, text).with_source(name));
            }
            None => self.skip(name, "not valid UTF-8 or Windows-1252 text"),
        }
        self
    }

    /// Read a file from disk and add it as an upload named after the file
    pub fn add_file(&mut self, path: &Path) -> &mut Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match fs::read(path) {
            Ok(bytes) => self.add_upload(&name, &bytes),
            Err(e) => {
                self.skip(&name, &format!("unreadable: {e}"));
                self
            }
        }
    }

    fn skip(&mut self, source: &str, reason: &str) {
        warn!(source, reason, "file excluded from batch");
        self.warnings.push(DecodeWarning {
            source: source.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    /// Close the batch. Fails with [`TopicError::NoDocuments`] when nothing
    /// usable was added; the warnings stay readable on the builder.
    pub fn finish(&self) -> Result<LoadedBatch> {
        if self.documents.is_empty() {
            let message = if self.warnings.is_empty() {
                "enter text or upload files".to_string()
            } else {
                format!("all {} uploaded file(s) were excluded", self.warnings.len())
            };
            return Err(TopicError::no_documents(message));
        }
        Ok(LoadedBatch {
            documents: self.documents.clone(),
            warnings: self.warnings.clone(),
        })
    }
}
