//! Document clustering
//!
//! Partitions the rows of a document-term matrix into `k` groups with
//! seeded k-means from `linfa-clustering`. Labels are arbitrary ids; only
//! the partition carries meaning.

use crate::errors::{Result, TopicError};
use crate::types::{ClusterAssignment, PipelineConfig};
use crate::vectorize::DocumentTermMatrix;
use linfa::dataset::AsTargets;
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Clamp a requested cluster count to what a batch can support.
///
/// Never more clusters than documents, never fewer than one. The clamp is
/// silent; callers report the effective value.
pub fn effective_cluster_count(requested: usize, documents: usize) -> usize {
    requested.min(documents).max(1)
}

/// Seeded k-means over dense count vectors
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansAssigner {
    pub seed: u64,
    /// Independent restarts; the one with the lowest inertia wins
    pub n_runs: usize,
    pub max_iterations: u64,
    pub tolerance: f64,
}

impl Default for KMeansAssigner {
    fn default() -> Self {
        Self {
            seed: 42,
            n_runs: 10,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

impl KMeansAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            seed: config.seed,
            n_runs: config.kmeans_runs,
            max_iterations: config.kmeans_max_iterations,
            tolerance: config.kmeans_tolerance,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Assign every row of `matrix` to one of `k` clusters.
    ///
    /// Requires `1 <= k <= rows`. When the matrix has no more distinct rows
    /// than `k`, each distinct row gets its own cluster directly; k-means++
    /// cannot seed more centres than there are distinct points.
    pub fn assign(&self, matrix: &DocumentTermMatrix, k: usize) -> Result<ClusterAssignment> {
        let rows = matrix.n_rows();
        if k == 0 || k > rows {
            return Err(TopicError::invalid_config(format!(
                "cluster count must be between 1 and {rows}, got {k}"
            )));
        }

        let (distinct, first_seen) = distinct_rows(matrix);
        if distinct <= k {
            debug!(rows, distinct, k, "assigning identical rows together");
            return ClusterAssignment::new(first_seen, k);
        }

        let dataset = DatasetBase::from(matrix.to_dense());
        let rng = ChaCha8Rng::seed_from_u64(self.seed);
        let model = KMeans::params_with_rng(k, rng)
            .n_runs(self.n_runs)
            .max_n_iterations(self.max_iterations)
            .tolerance(self.tolerance)
            .fit(&dataset)
            .map_err(|e| TopicError::clustering(format!("k-means fit failed: {e}")))?;

        let predictions = model.predict(&dataset);
        let labels: Vec<usize> = predictions.as_targets().iter().copied().collect();
        debug!(rows, k, seed = self.seed, "k-means fitted");

        ClusterAssignment::new(labels, k)
    }
}

/// Count distinct rows, labelling each row with the first-appearance index
/// of its distinct value
fn distinct_rows(matrix: &DocumentTermMatrix) -> (usize, Vec<usize>) {
    let mut ids: FxHashMap<Vec<(usize, u32)>, usize> = FxHashMap::default();
    let labels = (0..matrix.n_rows())
        .map(|r| {
            let next = ids.len();
            *ids.entry(matrix.row(r).collect()).or_insert(next)
        })
        .collect();
    (ids.len(), labels)
}
