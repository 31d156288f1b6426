//! Benchmarks for rapid_topics

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rapid_topics::nlp::LanguageResources;
use rapid_topics::*;

/// Sample documents for benchmarking, one theme each
const SAMPLE_DOCS: [&str; 4] = [
    "Machine learning is a subset of artificial intelligence that provides systems \
     the ability to learn and improve from experience without being explicitly \
     programmed. Deep learning uses artificial neural networks with representation learning.",
    "Natural language processing is a subfield of linguistics and computer science \
     concerned with the interactions between computers and human language. Key \
     applications include sentiment analysis, machine translation and summarization.",
    "Proteins are synthesized by ribosomes inside the cell. Each gene encodes a \
     protein, and mutations in a gene can change the shape of the protein it encodes.",
    "Volcanoes erupt molten rock from deep inside the planet. Volcanic ash covers \
     nearby villages and changes the climate for months after a large eruption.",
];

fn normalizer() -> TextNormalizer {
    let resources = LanguageResources::bundled(Language::English).unwrap();
    TextNormalizer::from_resources(&resources)
}

fn batch(copies: usize) -> Vec<Document> {
    SAMPLE_DOCS
        .iter()
        .cycle()
        .take(SAMPLE_DOCS.len() * copies)
        .enumerate()
        .map(|(i, t)| Document::new(i, *t))
        .collect()
}

fn sequences(copies: usize) -> Vec<Vec<String>> {
    let normalizer = normalizer();
    batch(copies)
        .iter()
        .map(|doc| normalizer.normalize(&doc.text))
        .collect()
}

fn benchmark_normalization(c: &mut Criterion) {
    let normalizer = normalizer();

    c.bench_function("normalize_document", |b| {
        b.iter(|| normalizer.normalize(black_box(SAMPLE_DOCS[0])))
    });

    let mut group = c.benchmark_group("normalize_by_size");
    for size in [1, 5, 10, 20].iter() {
        let text = SAMPLE_DOCS.join(" ").repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| normalizer.normalize(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_vectorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorize_by_documents");
    for copies in [1, 5, 25].iter() {
        let seqs = sequences(*copies);
        group.throughput(Throughput::Elements(seqs.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(seqs.len()), &seqs, |b, seqs| {
            b.iter(|| build(black_box(seqs)))
        });
    }
    group.finish();
}

fn benchmark_clustering(c: &mut Criterion) {
    let assigner = KMeansAssigner::new();

    let mut group = c.benchmark_group("kmeans_by_k");
    let (matrix, _) = build(&sequences(5)).unwrap();
    for k in [2, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, &k| {
            b.iter(|| assigner.assign(black_box(&matrix), k))
        });
    }
    group.finish();
}

fn benchmark_topics(c: &mut Criterion) {
    let seqs = sequences(5);

    let mut group = c.benchmark_group("lda");
    group.sample_size(10);
    for (passes, iterations) in [(1, 10), (5, 20), (15, 50)].iter() {
        let extractor = LdaTopicExtractor::new().with_schedule(*passes, *iterations);
        group.bench_with_input(
            BenchmarkId::new("schedule", format!("{passes}x{iterations}")),
            &seqs,
            |b, seqs| b.iter(|| extractor.extract(black_box(seqs), 4)),
        );
    }
    group.finish();
}

fn benchmark_summarize(c: &mut Criterion) {
    let text = SAMPLE_DOCS.join(" ");
    let keywords = KeywordSet::new(["learning", "protein", "volcanic"]);

    c.bench_function("summarize", |b| {
        b.iter(|| summarize(black_box(&text), black_box(&keywords), 3))
    });
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let config = PipelineConfig::default()
        .with_language(Language::English)
        .with_num_clusters(4)
        .with_lda_schedule(3, 20);
    let pipeline = Pipeline::with_normalizer(normalizer(), config);

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    for copies in [1, 5].iter() {
        let docs = batch(*copies);
        group.throughput(Throughput::Elements(docs.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(docs.len()), &docs, |b, docs| {
            b.iter(|| pipeline.run(black_box(docs), RunOptions::new().with_recommendations(true)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalization,
    benchmark_vectorize,
    benchmark_clustering,
    benchmark_topics,
    benchmark_summarize,
    benchmark_full_pipeline,
);
criterion_main!(benches);
