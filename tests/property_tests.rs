//! Property-based tests for rapid_topics

use proptest::prelude::*;
use rapid_topics::nlp::LanguageResources;
use rapid_topics::*;

fn english_normalizer() -> TextNormalizer {
    let resources = LanguageResources::bundled(Language::English).unwrap();
    TextNormalizer::from_resources(&resources)
}

fn word_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "telescope", "galaxy", "protein", "gene", "river", "mountain", "neural", "network",
        "cell", "star", "volcano", "ocean",
    ])
    .prop_map(str::to_string)
}

fn sequences_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(word_strategy(), 1..8), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Normalized tokens are lowercase alphanumerics longer than two
    /// characters and never stopwords
    #[test]
    fn normalized_tokens_are_valid(text in "[A-Za-zÀ-ÿ0-9 .,;!?'-]{0,200}") {
        let normalizer = english_normalizer();
        let resources = LanguageResources::bundled(Language::English).unwrap();
        for token in normalizer.normalize(&text) {
            prop_assert!(token.chars().count() > 2, "short token {:?}", token);
            prop_assert!(token.chars().all(char::is_alphanumeric), "token {:?}", token);
            prop_assert_eq!(token.to_lowercase(), token.clone());
            prop_assert!(!resources.stopwords.contains(&token), "stopword {:?}", token);
        }
    }

    /// Normalizing twice gives the same tokens
    #[test]
    fn normalize_is_deterministic(text in "\\PC{0,120}") {
        let normalizer = english_normalizer();
        prop_assert_eq!(normalizer.normalize(&text), normalizer.normalize(&text));
    }

    /// One matrix row per sequence, and row sums equal sequence lengths
    #[test]
    fn matrix_rows_match_sequences(seqs in sequences_strategy()) {
        let (matrix, vocab) = build(&seqs).unwrap();
        prop_assert_eq!(matrix.n_rows(), seqs.len());
        prop_assert_eq!(matrix.n_cols(), vocab.len());
        for (row, seq) in seqs.iter().enumerate() {
            prop_assert_eq!(matrix.row_sum(row) as usize, seq.len());
        }
    }

    /// The vocabulary is sorted and does not depend on document order
    #[test]
    fn vocabulary_ignores_document_order(seqs in sequences_strategy()) {
        let (_, forward) = build(&seqs).unwrap();
        let reversed: Vec<Vec<String>> = seqs.iter().rev().cloned().collect();
        let (_, backward) = build(&reversed).unwrap();
        prop_assert_eq!(forward.terms(), backward.terms());
        prop_assert!(forward.terms().windows(2).all(|w| w[0] < w[1]));
    }

    /// Effective cluster count never exceeds the batch and is at least one
    #[test]
    fn effective_count_is_clamped(requested in 0usize..20, documents in 0usize..20) {
        let k = effective_cluster_count(requested, documents);
        prop_assert!(k >= 1);
        prop_assert_eq!(k, requested.min(documents).max(1));
    }

    /// The summary respects the cap and falls back exactly when nothing matches
    #[test]
    fn summary_respects_cap(
        sentences in prop::collection::vec("[a-z ]{1,30}", 0..10),
        keyword in "[a-z]{3,5}",
        max in 0usize..5,
    ) {
        let text = sentences.join(". ");
        let keywords = KeywordSet::new([keyword.as_str()]);
        let summary = SentenceSelector::new().with_max_sentences(max).select(&text, &keywords);
        prop_assert!(summary.sentences.len() <= max.max(1));

        let any_match = text
            .split('.')
            .map(str::trim)
            .any(|s| !s.is_empty() && s.contains(keyword.as_str()));
        prop_assert_eq!(summary.matched > 0, any_match);
        prop_assert_eq!(summary.is_fallback(), !any_match);
        for sentence in &summary.sentences {
            prop_assert!(sentence.contains(keyword.as_str()));
        }
    }

    /// Recommendations keep batch order and only hold matching documents
    #[test]
    fn recommendations_match_exactly(seqs in sequences_strategy(), keyword in word_strategy()) {
        let docs: Vec<NormalizedDocument> = seqs
            .iter()
            .enumerate()
            .map(|(i, tokens)| NormalizedDocument::new(Document::new(i, tokens.join(" ")), tokens.clone()))
            .collect();
        let keywords = KeywordSet::new([keyword.as_str()]);
        let recs = recommend(&docs, &keywords);

        let expected: Vec<usize> = seqs
            .iter()
            .enumerate()
            .filter(|(_, tokens)| tokens.contains(&keyword))
            .map(|(i, _)| i)
            .collect();
        let got: Vec<usize> = recs.iter().map(|d| d.index).collect();
        prop_assert_eq!(got, expected);
    }

    /// k-means gives the same labels for the same matrix, all below k
    #[test]
    fn clustering_is_deterministic(seqs in sequences_strategy(), requested in 1usize..5) {
        let (matrix, _) = build(&seqs).unwrap();
        let k = effective_cluster_count(requested, seqs.len());
        let assigner = KMeansAssigner::new();
        let first = assigner.assign(&matrix, k).unwrap();
        let second = assigner.assign(&matrix, k).unwrap();
        prop_assert_eq!(first.labels(), second.labels());
        prop_assert_eq!(first.len(), seqs.len());
        prop_assert!(first.labels().iter().all(|&l| l < k));
    }

    /// Decoding arbitrary bytes never panics, and UTF-8 input is kept as is
    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Some((text, encoding)) = decode_text(&bytes) {
            if encoding == TextEncoding::Utf8 {
                prop_assert!(std::str::from_utf8(&bytes).unwrap().ends_with(text.as_str()));
            }
        }
    }

    #[test]
    fn utf8_text_always_decodes(text in "\\PC{0,100}") {
        let (decoded, encoding) = decode_text(text.as_bytes()).unwrap();
        prop_assert_eq!(encoding, TextEncoding::Utf8);
        prop_assert_eq!(decoded, text.strip_prefix('\u{FEFF}').unwrap_or(&text));
    }
}
