//! Pipeline runner: orchestrates one full interaction.
//!
//! The [`Pipeline`] struct holds a language-bound normalizer plus
//! statically-composed model stages. Calling [`Pipeline::run`] executes
//! every stage in order over one batch and returns a [`PipelineOutput`].
//! Nothing is cached between runs: each call recomputes the matrix,
//! clusters and topics from the documents it is given.
//!
//! # Static dispatch
//!
//! `Pipeline` is generic over its [`ClusterAssigner`] and [`TopicExtractor`],
//! defaulting to seeded k-means and LDA.

use crate::clustering::{effective_cluster_count, KMeansAssigner};
use crate::errors::TopicError;
use crate::nlp::{ResourceCache, ResourceSource, TextNormalizer};
use crate::pipeline::artifacts::{PipelineOutput, RunOptions};
use crate::pipeline::error_code::ErrorCode;
use crate::pipeline::errors::PipelineRuntimeError;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, STAGE_CLUSTER, STAGE_KEYWORDS,
    STAGE_NORMALIZE, STAGE_RECOMMEND, STAGE_SUMMARY, STAGE_TOPICS, STAGE_VALIDATE,
    STAGE_VECTORIZE,
};
use crate::pipeline::traits::{ClusterAssigner, TopicExtractor};
use crate::summarizer::{recommend, SentenceSelector};
use crate::topics::LdaTopicExtractor;
use crate::types::{Document, KeywordSet, PipelineConfig};
use crate::vectorize;
use tracing::debug;

/// Stage name used for failures while preparing language resources.
pub const STAGE_RESOURCES: &str = "resources";

/// Fewest documents a batch must hold to be clustered.
pub const MIN_DOCUMENTS: usize = 2;

// ---------------------------------------------------------------------------
// Tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage. The span closes when the
/// enclosing block ends.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Error mapper for `stage`.
fn at(stage: &'static str) -> impl Fn(TopicError) -> PipelineRuntimeError {
    move |err| PipelineRuntimeError::from_topic_error(stage, &err)
}

// ============================================================================
// Pipeline: statically-composed stage container
// ============================================================================

/// A pipeline bound to one language and configuration.
///
/// # Type parameters
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `CA`  | [`ClusterAssigner`] | [`KMeansAssigner`] |
/// | `TE`  | [`TopicExtractor`] | [`LdaTopicExtractor`] |
#[derive(Debug, Clone)]
pub struct Pipeline<CA = KMeansAssigner, TE = LdaTopicExtractor> {
    pub normalizer: TextNormalizer,
    pub assigner: CA,
    pub extractor: TE,
    pub config: PipelineConfig,
}

impl Pipeline {
    /// Default model stages configured from `config`, around an existing
    /// normalizer.
    pub fn with_normalizer(normalizer: TextNormalizer, config: PipelineConfig) -> Self {
        Pipeline {
            assigner: KMeansAssigner::from_config(&config),
            extractor: LdaTopicExtractor::from_config(&config),
            normalizer,
            config,
        }
    }

    /// Validate `config`, make sure its language resources are cached under
    /// `config.cache_dir`, and build the default pipeline.
    pub fn from_config(config: PipelineConfig) -> Result<Self, PipelineRuntimeError> {
        let cache = ResourceCache::new(&config.cache_dir);
        Self::from_cache(&cache, config)
    }

    /// Like [`from_config`](Self::from_config) with an explicit cache.
    pub fn from_cache<S: ResourceSource>(
        cache: &ResourceCache<S>,
        config: PipelineConfig,
    ) -> Result<Self, PipelineRuntimeError> {
        config.validate().map_err(at(STAGE_VALIDATE))?;
        let normalizer =
            TextNormalizer::from_cache(cache, config.language).map_err(at(STAGE_RESOURCES))?;
        Ok(Self::with_normalizer(normalizer, config))
    }
}

impl<CA, TE> Pipeline<CA, TE> {
    /// Assemble a pipeline from explicit stages.
    pub fn new(
        normalizer: TextNormalizer,
        assigner: CA,
        extractor: TE,
        config: PipelineConfig,
    ) -> Self {
        Self {
            normalizer,
            assigner,
            extractor,
            config,
        }
    }

    /// Swap the cluster assigner.
    pub fn assigner<CA2>(self, assigner: CA2) -> Pipeline<CA2, TE> {
        Pipeline {
            normalizer: self.normalizer,
            assigner,
            extractor: self.extractor,
            config: self.config,
        }
    }

    /// Swap the topic extractor.
    pub fn extractor<TE2>(self, extractor: TE2) -> Pipeline<CA, TE2> {
        Pipeline {
            normalizer: self.normalizer,
            assigner: self.assigner,
            extractor,
            config: self.config,
        }
    }
}

// ============================================================================
// Pipeline::run: execute stages in order
// ============================================================================

impl<CA, TE> Pipeline<CA, TE>
where
    CA: ClusterAssigner,
    TE: TopicExtractor,
{
    /// Execute the pipeline over one batch.
    ///
    /// Stages run in order:
    /// 1. Validate the batch and configuration
    /// 2. Normalize every document
    /// 3. Build the document-term matrix
    /// 4. Cluster (with the cluster count clamped to the batch size)
    /// 5. Extract as many topics as clusters
    /// 6. Take the keywords of topic 0
    /// 7. Recommend documents (only when requested)
    /// 8. Summarize the first document
    pub fn run(
        &self,
        documents: &[Document],
        options: RunOptions,
    ) -> Result<PipelineOutput, PipelineRuntimeError> {
        self.run_observed(documents, options, &mut NoopObserver)
    }

    /// Same as [`run`](Self::run), reporting each stage to `observer`.
    pub fn run_observed(
        &self,
        documents: &[Document],
        options: RunOptions,
        observer: &mut impl PipelineObserver,
    ) -> Result<PipelineOutput, PipelineRuntimeError> {
        let cfg = &self.config;

        // Stage 1: Validate
        {
            trace_stage!(STAGE_VALIDATE);
            observer.on_stage_start(STAGE_VALIDATE);
            let clock = StageClock::start();
            cfg.validate().map_err(at(STAGE_VALIDATE))?;
            if documents.is_empty() {
                return Err(at(STAGE_VALIDATE)(TopicError::no_documents(
                    "the batch is empty",
                )));
            }
            if documents.len() < MIN_DOCUMENTS {
                return Err(at(STAGE_VALIDATE)(TopicError::insufficient_documents(
                    documents.len(),
                    MIN_DOCUMENTS,
                )));
            }
            let report = StageReport::new(clock.elapsed()).with_items(documents.len());
            observer.on_stage_end(STAGE_VALIDATE, &report);
        }

        // Stage 2: Normalize
        let normalized = {
            trace_stage!(STAGE_NORMALIZE);
            observer.on_stage_start(STAGE_NORMALIZE);
            let clock = StageClock::start();
            let normalized = self.normalizer.normalize_all(documents);
            if normalized.iter().all(|doc| doc.is_empty()) {
                return Err(at(STAGE_NORMALIZE)(TopicError::empty_input(format!(
                    "none of the {} documents kept a token after normalization",
                    documents.len()
                ))));
            }
            let tokens = normalized.iter().map(|doc| doc.tokens.len()).sum();
            let report = StageReport::new(clock.elapsed()).with_items(tokens);
            observer.on_stage_end(STAGE_NORMALIZE, &report);
            normalized
        };
        let sequences: Vec<Vec<String>> =
            normalized.iter().map(|doc| doc.tokens.clone()).collect();

        // Stage 3: Vectorize
        let matrix = {
            trace_stage!(STAGE_VECTORIZE);
            observer.on_stage_start(STAGE_VECTORIZE);
            let clock = StageClock::start();
            let (matrix, vocab) = vectorize::build(&sequences).map_err(at(STAGE_VECTORIZE))?;
            debug!(rows = matrix.n_rows(), terms = vocab.len(), "vector space built");
            let report = StageReport::new(clock.elapsed()).with_items(vocab.len());
            observer.on_stage_end(STAGE_VECTORIZE, &report);
            matrix
        };

        let k = effective_cluster_count(cfg.num_clusters, documents.len());
        if k != cfg.num_clusters {
            debug!(requested = cfg.num_clusters, effective = k, "cluster count clamped");
        }

        // Stage 4: Cluster
        let clusters = {
            trace_stage!(STAGE_CLUSTER);
            observer.on_stage_start(STAGE_CLUSTER);
            let clock = StageClock::start();
            let clusters = self.assigner.assign(&matrix, k).map_err(at(STAGE_CLUSTER))?;
            let report = StageReport::new(clock.elapsed()).with_items(k);
            observer.on_stage_end(STAGE_CLUSTER, &report);
            clusters
        };

        // Stage 5: Topics
        let topics = {
            trace_stage!(STAGE_TOPICS);
            observer.on_stage_start(STAGE_TOPICS);
            let clock = StageClock::start();
            let topics = self
                .extractor
                .extract(&sequences, k)
                .map_err(at(STAGE_TOPICS))?;
            let report = StageReport::new(clock.elapsed()).with_items(topics.len());
            observer.on_stage_end(STAGE_TOPICS, &report);
            topics
        };

        // Stage 6: Keywords
        let keywords = {
            trace_stage!(STAGE_KEYWORDS);
            observer.on_stage_start(STAGE_KEYWORDS);
            let clock = StageClock::start();
            let first = topics.first().ok_or_else(|| {
                PipelineRuntimeError::new(
                    ErrorCode::StageFailed,
                    STAGE_KEYWORDS,
                    "the topic model returned no topics",
                )
            })?;
            let keywords = KeywordSet::from_topic(first, cfg.keyword_count);
            debug!(keywords = ?keywords.words(), "keywords of topic 0");
            let report = StageReport::new(clock.elapsed()).with_items(keywords.len());
            observer.on_stage_end(STAGE_KEYWORDS, &report);
            keywords
        };

        // Stage 7: Recommend
        let recommendations = if options.recommend {
            trace_stage!(STAGE_RECOMMEND);
            observer.on_stage_start(STAGE_RECOMMEND);
            let clock = StageClock::start();
            let recs: Vec<Document> = recommend(&normalized, &keywords)
                .into_iter()
                .cloned()
                .collect();
            let report = StageReport::new(clock.elapsed()).with_items(recs.len());
            observer.on_stage_end(STAGE_RECOMMEND, &report);
            Some(recs)
        } else {
            None
        };

        // Stage 8: Summary
        let summary = {
            trace_stage!(STAGE_SUMMARY);
            observer.on_stage_start(STAGE_SUMMARY);
            let clock = StageClock::start();
            let summary = SentenceSelector::new()
                .with_max_sentences(cfg.summary_sentences)
                .select(&documents[0].text, &keywords);
            let report = StageReport::new(clock.elapsed()).with_items(summary.sentences.len());
            observer.on_stage_end(STAGE_SUMMARY, &report);
            summary
        };

        Ok(PipelineOutput {
            requested_clusters: cfg.num_clusters,
            effective_clusters: k,
            documents: documents.iter().map(Document::label).collect(),
            clusters,
            topics: topics
                .iter()
                .map(|topic| topic.truncated(cfg.topic_words))
                .collect(),
            keywords,
            recommendations,
            summary,
        })
    }
}
