//! Topic extraction
//!
//! [`LdaTopicExtractor`] fits an LDA model over normalized token sequences
//! and returns every topic with its full ranked word distribution. It keeps
//! its own [`Dictionary`], unrelated to the vector space vocabulary.

pub mod dictionary;
pub mod lda;

pub use dictionary::Dictionary;
pub use lda::{LdaModel, LdaParams};

use crate::errors::{Result, TopicError};
use crate::types::{PipelineConfig, Topic};

/// Seeded LDA topic extractor
#[derive(Debug, Clone, PartialEq)]
pub struct LdaTopicExtractor {
    pub seed: u64,
    pub passes: usize,
    pub iterations: usize,
    pub alpha: Option<f64>,
    pub eta: Option<f64>,
}

impl Default for LdaTopicExtractor {
    fn default() -> Self {
        let params = LdaParams::new(1);
        Self {
            seed: params.seed,
            passes: params.passes,
            iterations: params.iterations,
            alpha: params.alpha,
            eta: params.eta,
        }
    }
}

impl LdaTopicExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            seed: config.seed,
            passes: config.lda_passes,
            iterations: config.lda_iterations,
            alpha: config.lda_alpha,
            eta: config.lda_eta,
        }
    }

    /// Shorter schedules for quick runs and tests
    pub fn with_schedule(mut self, passes: usize, iterations: usize) -> Self {
        self.passes = passes;
        self.iterations = iterations;
        self
    }

    fn params(&self, num_topics: usize) -> LdaParams {
        LdaParams {
            num_topics,
            passes: self.passes,
            iterations: self.iterations,
            alpha: self.alpha,
            eta: self.eta,
            seed: self.seed,
        }
    }

    /// Fit a model over `sequences`
    pub fn fit<S: AsRef<[String]>>(&self, sequences: &[S], num_topics: usize) -> Result<LdaModel> {
        if num_topics == 0 {
            return Err(TopicError::invalid_config("num_topics must be >= 1"));
        }
        let dictionary = Dictionary::from_documents(sequences);
        if dictionary.is_empty() {
            return Err(TopicError::EmptyVocabulary);
        }
        let corpus: Vec<Vec<(usize, u32)>> = sequences
            .iter()
            .map(|seq| dictionary.doc2bow(seq.as_ref()))
            .collect();
        LdaModel::fit(&corpus, dictionary, &self.params(num_topics))
    }

    /// Topics `0..num_topics`, each ranked over the whole dictionary
    pub fn extract<S: AsRef<[String]>>(&self, sequences: &[S], num_topics: usize) -> Result<Vec<Topic>> {
        Ok(self.fit(sequences, num_topics)?.topics())
    }
}
