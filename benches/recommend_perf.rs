//! Criterion benchmarks for the ranking hot paths.
//!
//! - hash_embedding: per-text embedding cost
//! - lexical: TF-IDF fit and query over synthetic corpora
//! - recommend: full per-call pipeline for each method

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use jobmatch::config::LexicalConfig;
use jobmatch::corpus::JobRecord;
use jobmatch::recommend::{HashEmbedder, LexicalIndex, Method, ModelHandle, Recommender};
use jobmatch::test_utils::fixtures::{scenario_query, synthetic_jobs};

// =============================================================================
// Hash Embedding Benchmarks
// =============================================================================

fn hash_embedding_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_embedding");
    let embedder = HashEmbedder::new(384);

    for size in [10, 100, 500] {
        let input = "python django engineer ".repeat(size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("text_size", size), &input, |b, input| {
            b.iter(|| embedder.embed_text(black_box(input)));
        });
    }

    group.finish();
}

// =============================================================================
// Lexical Index Benchmarks
// =============================================================================

fn lexical_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexical");
    let config = LexicalConfig::default();

    for count in [100, 500] {
        let texts: Vec<String> = synthetic_jobs(count)
            .iter()
            .map(JobRecord::composite_text)
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("fit", count), &texts, |b, texts| {
            b.iter(|| LexicalIndex::fit(black_box(texts), &config));
        });

        if let Ok(index) = LexicalIndex::fit(&texts, &config) {
            group.bench_with_input(BenchmarkId::new("query", count), &index, |b, index| {
                b.iter(|| index.query(black_box(scenario_query())));
            });
        }
    }

    group.finish();
}

// =============================================================================
// Full Pipeline Benchmarks
// =============================================================================

fn recommend_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let handle = ModelHandle::with_embedder(Arc::new(HashEmbedder::new(384)));
    let recommender = Recommender::new(&handle, LexicalConfig::default());
    let jobs = synthetic_jobs(500);

    for method in [Method::Lexical, Method::Semantic, Method::Hybrid, Method::Keyword] {
        group.bench_function(BenchmarkId::new("jobs_500", method.as_str()), |b| {
            b.iter(|| recommender.recommend(black_box(&jobs), scenario_query(), method, 20));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    hash_embedding_benchmarks,
    lexical_benchmarks,
    recommend_benchmarks
);
criterion_main!(benches);
