//! Bag-of-words vector space
//!
//! Builds a sparse document-term count matrix from normalized token
//! sequences. Columns follow the lexicographic order of the vocabulary, so
//! a token maps to the same column no matter which document introduced it.

use crate::errors::{Result, TopicError};
use ndarray::Array2;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Distinct tokens of one batch with stable column ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl Vocabulary {
    /// Build from every token of every sequence; ids follow sorted order
    pub fn from_sequences<S: AsRef<[String]>>(sequences: &[S]) -> Self {
        let sorted: BTreeSet<&str> = sequences
            .iter()
            .flat_map(|seq| seq.as_ref().iter().map(String::as_str))
            .collect();

        let terms: Vec<String> = sorted.into_iter().map(str::to_string).collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(id, term)| (term.clone(), id))
            .collect();
        Self { terms, index }
    }

    /// Column id of `term`
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term at column `id`
    pub fn term(&self, id: usize) -> Option<&str> {
        self.terms.get(id).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// All terms in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Sparse count matrix in compressed sparse row layout.
///
/// Row `r` owns `indices[indptr[r]..indptr[r + 1]]` (column ids, ascending)
/// and the matching slice of `data` (counts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTermMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<u32>,
}

impl DocumentTermMatrix {
    /// Count every sequence against `vocab`. Tokens missing from `vocab`
    /// are ignored.
    pub fn from_sequences<S: AsRef<[String]>>(sequences: &[S], vocab: &Vocabulary) -> Self {
        let mut indptr = Vec::with_capacity(sequences.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);

        let mut counts: FxHashMap<usize, u32> = FxHashMap::default();
        for seq in sequences {
            counts.clear();
            for token in seq.as_ref() {
                if let Some(col) = vocab.get(token) {
                    *counts.entry(col).or_insert(0) += 1;
                }
            }
            let mut row: Vec<(usize, u32)> = counts.iter().map(|(&c, &n)| (c, n)).collect();
            row.sort_unstable_by_key(|&(col, _)| col);
            for (col, count) in row {
                indices.push(col);
                data.push(count);
            }
            indptr.push(indices.len());
        }

        Self {
            n_cols: vocab.len(),
            indptr,
            indices,
            data,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored (non-zero) cells
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Count at (`row`, `col`); zero when out of range or not stored
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.row(row)
            .find(|&(c, _)| c == col)
            .map_or(0, |(_, count)| count)
    }

    /// Non-zero `(column, count)` pairs of one row, ascending by column
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        let range = if row < self.n_rows() {
            self.indptr[row]..self.indptr[row + 1]
        } else {
            0..0
        };
        self.indices[range.clone()]
            .iter()
            .copied()
            .zip(self.data[range].iter().copied())
    }

    /// Total token count of one row
    pub fn row_sum(&self, row: usize) -> u32 {
        self.row(row).map(|(_, count)| count).sum()
    }

    /// Dense `f64` copy, the layout k-means consumes
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.n_rows(), self.n_cols));
        for r in 0..self.n_rows() {
            for (c, count) in self.row(r) {
                dense[[r, c]] = f64::from(count);
            }
        }
        dense
    }
}

/// Build the count matrix and vocabulary of a batch.
///
/// Produces exactly one row per input sequence, empty ones included. Fails
/// with [`TopicError::EmptyVocabulary`] when no sequence has any token.
pub fn build<S: AsRef<[String]>>(sequences: &[S]) -> Result<(DocumentTermMatrix, Vocabulary)> {
    let vocab = Vocabulary::from_sequences(sequences);
    if vocab.is_empty() {
        return Err(TopicError::EmptyVocabulary);
    }
    let matrix = DocumentTermMatrix::from_sequences(sequences, &vocab);
    Ok((matrix, vocab))
}
