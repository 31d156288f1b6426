//! Latent Dirichlet Allocation
//!
//! Collapsed Gibbs sampling over a bag-of-words corpus. Every run is seeded,
//! so the same corpus, dictionary and parameters always give the same
//! topics.
//!
//! The sampler makes `passes × iterations` sweeps. Each sweep resamples the
//! topic of every token occurrence from
//!
//! ```text
//! p(z = k) ∝ (n_dk + α) · (n_kw + η) / (n_k + V·η)
//! ```
//!
//! and the final topic-word weights are `(n_kw + η) / (n_k + V·η)`.

use super::dictionary::Dictionary;
use crate::errors::{Result, TopicError};
use crate::types::{Topic, TopicWord};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Sampler settings
#[derive(Debug, Clone, PartialEq)]
pub struct LdaParams {
    pub num_topics: usize,
    pub passes: usize,
    pub iterations: usize,
    /// Document-topic prior; `None` means `1 / num_topics`
    pub alpha: Option<f64>,
    /// Topic-word prior; `None` means `1 / num_topics`
    pub eta: Option<f64>,
    pub seed: u64,
}

impl LdaParams {
    pub fn new(num_topics: usize) -> Self {
        Self {
            num_topics,
            passes: 15,
            iterations: 50,
            alpha: None,
            eta: None,
            seed: 42,
        }
    }

    fn resolved_alpha(&self) -> f64 {
        self.alpha.unwrap_or(1.0 / self.num_topics as f64)
    }

    fn resolved_eta(&self) -> f64 {
        self.eta.unwrap_or(1.0 / self.num_topics as f64)
    }
}

/// A fitted topic model
#[derive(Debug, Clone)]
pub struct LdaModel {
    dictionary: Dictionary,
    num_topics: usize,
    eta: f64,
    /// `topic_word[k][w]`: occurrences of word `w` assigned to topic `k`
    topic_word: Vec<Vec<u32>>,
    /// `topic_totals[k]`: occurrences assigned to topic `k`
    topic_totals: Vec<u32>,
    alpha: f64,
    /// `doc_topic[d][k]`: occurrences of document `d` assigned to topic `k`
    doc_topic: Vec<Vec<u32>>,
}

impl LdaModel {
    /// Fit a model on `corpus`, whose ids must come from `dictionary`
    pub fn fit(
        corpus: &[Vec<(usize, u32)>],
        dictionary: Dictionary,
        params: &LdaParams,
    ) -> Result<Self> {
        let k = params.num_topics;
        if k == 0 {
            return Err(TopicError::invalid_config("num_topics must be >= 1"));
        }
        if params.passes == 0 || params.iterations == 0 {
            return Err(TopicError::invalid_config(
                "passes and iterations must be >= 1",
            ));
        }
        let vocab = dictionary.len();
        if vocab == 0 {
            return Err(TopicError::EmptyVocabulary);
        }
        if let Some(&(bad, _)) = corpus.iter().flatten().find(|&&(id, _)| id >= vocab) {
            return Err(TopicError::invalid_config(format!(
                "word id {bad} is not in the dictionary ({vocab} entries)"
            )));
        }

        let alpha = params.resolved_alpha();
        let eta = params.resolved_eta();
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

        // One entry per token occurrence
        let words: Vec<Vec<usize>> = corpus
            .iter()
            .map(|bow| {
                bow.iter()
                    .flat_map(|&(id, count)| std::iter::repeat(id).take(count as usize))
                    .collect()
            })
            .collect();

        let mut topic_word = vec![vec![0u32; vocab]; k];
        let mut topic_totals = vec![0u32; k];
        let mut doc_topic = vec![vec![0u32; k]; words.len()];
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(words.len());

        for (d, doc) in words.iter().enumerate() {
            let mut z = Vec::with_capacity(doc.len());
            for &w in doc {
                let topic = rng.gen_range(0..k);
                topic_word[topic][w] += 1;
                topic_totals[topic] += 1;
                doc_topic[d][topic] += 1;
                z.push(topic);
            }
            assignments.push(z);
        }

        let v_eta = vocab as f64 * eta;
        let mut probs = vec![0.0f64; k];
        let sweeps = params.passes * params.iterations;

        for _ in 0..sweeps {
            for (d, doc) in words.iter().enumerate() {
                for (i, &w) in doc.iter().enumerate() {
                    let old = assignments[d][i];
                    topic_word[old][w] -= 1;
                    topic_totals[old] -= 1;
                    doc_topic[d][old] -= 1;

                    let mut total = 0.0;
                    for (t, p) in probs.iter_mut().enumerate() {
                        *p = (f64::from(doc_topic[d][t]) + alpha)
                            * (f64::from(topic_word[t][w]) + eta)
                            / (f64::from(topic_totals[t]) + v_eta);
                        total += *p;
                    }

                    let mut target = rng.gen::<f64>() * total;
                    let mut new = k - 1;
                    for (t, &p) in probs.iter().enumerate() {
                        if target < p {
                            new = t;
                            break;
                        }
                        target -= p;
                    }

                    assignments[d][i] = new;
                    topic_word[new][w] += 1;
                    topic_totals[new] += 1;
                    doc_topic[d][new] += 1;
                }
            }
        }

        debug!(
            topics = k,
            vocab,
            documents = words.len(),
            sweeps,
            "lda fitted"
        );

        Ok(Self {
            dictionary,
            num_topics: k,
            eta,
            topic_word,
            topic_totals,
            alpha,
            doc_topic,
        })
    }

    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Weight of every dictionary word in `topic`, indexed by word id
    pub fn topic_weights(&self, topic: usize) -> Option<Vec<f64>> {
        let counts = self.topic_word.get(topic)?;
        let v_eta = self.dictionary.len() as f64 * self.eta;
        let denom = f64::from(self.topic_totals[topic]) + v_eta;
        Some(
            counts
                .iter()
                .map(|&n| (f64::from(n) + self.eta) / denom)
                .collect(),
        )
    }

    /// The `topn` best words of `topic`, by descending weight with ties
    /// broken by dictionary id. Returns `None` for an unknown topic.
    pub fn show_topic(&self, topic: usize, topn: usize) -> Option<Topic> {
        let weights = self.topic_weights(topic)?;
        let mut ranked: Vec<(usize, f64)> = weights.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let words = ranked
            .into_iter()
            .take(topn)
            .filter_map(|(id, weight)| {
                self.dictionary
                    .token(id)
                    .map(|word| TopicWord::new(word, weight))
            })
            .collect();
        Some(Topic::new(topic, words))
    }

    /// Every topic with its full ranked distribution
    pub fn topics(&self) -> Vec<Topic> {
        (0..self.num_topics)
            .filter_map(|k| self.show_topic(k, self.dictionary.len()))
            .collect()
    }

    /// `(topic id, "0.045*\"word\" + ...")` for each topic
    pub fn print_topics(&self, num_words: usize) -> Vec<(usize, String)> {
        (0..self.num_topics)
            .filter_map(|k| self.show_topic(k, num_words))
            .map(|topic| (topic.id, topic.format_weights(num_words)))
            .collect()
    }

    /// Topic mixture of a training document
    pub fn document_topics(&self, document: usize) -> Option<Vec<f64>> {
        let counts = self.doc_topic.get(document)?;
        let total: u32 = counts.iter().sum();
        let denom = f64::from(total) + self.num_topics as f64 * self.alpha;
        Some(
            counts
                .iter()
                .map(|&n| (f64::from(n) + self.alpha) / denom)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(raw: &[&[&str]]) -> (Vec<Vec<(usize, u32)>>, Dictionary) {
        let docs: Vec<Vec<String>> = raw
            .iter()
            .map(|d| d.iter().map(|t| t.to_string()).collect())
            .collect();
        let dict = Dictionary::from_documents(&docs);
        let bows = docs.iter().map(|d| dict.doc2bow(d)).collect();
        (bows, dict)
    }

    fn sample() -> (Vec<Vec<(usize, u32)>>, Dictionary) {
        corpus(&[
            &["rede", "neural", "camada", "rede", "treino"],
            &["rede", "neural", "treino", "camada"],
            &["proteína", "gene", "célula", "gene"],
            &["gene", "proteína", "célula", "genoma"],
        ])
    }

    #[test]
    fn test_weights_are_distributions() {
        let (bows, dict) = sample();
        let model = LdaModel::fit(&bows, dict, &LdaParams::new(2)).unwrap();
        for k in 0..2 {
            let weights = model.topic_weights(k).unwrap();
            let sum: f64 = weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(weights.iter().all(|&w| w > 0.0 && w <= 1.0));
        }
    }

    #[test]
    fn test_show_topic_ranked() {
        let (bows, dict) = sample();
        let model = LdaModel::fit(&bows, dict, &LdaParams::new(2)).unwrap();
        let topic = model.show_topic(0, 5).unwrap();
        assert_eq!(topic.id, 0);
        assert_eq!(topic.words.len(), 5);
        for pair in topic.words.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
        assert!(model.show_topic(2, 5).is_none());
    }

    #[test]
    fn test_deterministic() {
        let (bows, dict) = sample();
        let a = LdaModel::fit(&bows, dict.clone(), &LdaParams::new(2)).unwrap();
        let b = LdaModel::fit(&bows, dict, &LdaParams::new(2)).unwrap();
        assert_eq!(a.topics(), b.topics());
    }

    #[test]
    fn test_topics_cover_dictionary() {
        let (bows, dict) = sample();
        let size = dict.len();
        let model = LdaModel::fit(&bows, dict, &LdaParams::new(3)).unwrap();
        let topics = model.topics();
        assert_eq!(topics.len(), 3);
        assert!(topics.iter().all(|t| t.words.len() == size));
    }

    #[test]
    fn test_print_topics_format() {
        let (bows, dict) = sample();
        let model = LdaModel::fit(&bows, dict, &LdaParams::new(2)).unwrap();
        let printed = model.print_topics(3);
        assert_eq!(printed.len(), 2);
        assert_eq!(printed[1].0, 1);
        assert_eq!(printed[0].1.matches(" + ").count(), 2);
        assert!(printed[0].1.contains("*\""));
    }

    #[test]
    fn test_document_topics() {
        let (bows, dict) = sample();
        let model = LdaModel::fit(&bows, dict, &LdaParams::new(2)).unwrap();
        let mix = model.document_topics(0).unwrap();
        assert!((mix.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(model.document_topics(9).is_none());
    }

    #[test]
    fn test_invalid_input() {
        let (bows, dict) = sample();
        assert!(LdaModel::fit(&bows, dict, &LdaParams::new(0)).is_err());
        let err = LdaModel::fit(&[vec![]], Dictionary::new(), &LdaParams::new(2)).unwrap_err();
        assert_eq!(err, TopicError::EmptyVocabulary);
        assert!(LdaModel::fit(&[vec![(50, 1)]], sample().1, &LdaParams::new(2)).is_err());
    }
}
