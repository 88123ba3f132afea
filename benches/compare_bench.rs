use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use docdrift::{
    ClassifyThresholds, DocdriftConfig, FeatureEmbedder, Pipeline, RawDocument, SemanticConfig,
    Sentence, align_with,
};

const FACTS: [&str; 4] = [
    "The tower was completed in 1889 for the world fair.",
    "It is made of wrought iron and weighs about ten thousand tonnes.",
    "Visitors climb the stairs or take the lifts every day.",
    "The structure was the tallest in the world for four decades.",
];

fn document(sentences: usize) -> String {
    FACTS
        .iter()
        .cycle()
        .take(sentences)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn embedded(embedder: &FeatureEmbedder, sentences: usize) -> Vec<Sentence> {
    FACTS
        .iter()
        .cycle()
        .take(sentences)
        .enumerate()
        .map(|(i, text)| Sentence::new(*text, i).with_embedding(embedder.embed(text)))
        .collect()
}

/// Greedy alignment cost grows with source length.
fn bench_align(c: &mut Criterion) {
    let embedder = FeatureEmbedder::new(&SemanticConfig::default()).expect("embedder");
    let thresholds = ClassifyThresholds::default();
    let target = Sentence::new("The tower opened in 1889.", 0)
        .with_embedding(embedder.embed("The tower opened in 1889."));

    let mut group = c.benchmark_group("align");
    for sources in [16usize, 128, 1024] {
        let source = embedded(&embedder, sources);
        group.throughput(Throughput::Elements(sources as u64));
        group.bench_function(format!("sources_{sources}"), |b| {
            b.iter(|| align_with(black_box(&target), black_box(&source), &thresholds))
        });
    }
    group.finish();
}

/// Split, embed, align and summarize two raw documents.
fn bench_compare_texts(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let pipeline = Pipeline::new(DocdriftConfig::default()).expect("pipeline");

    let mut group = c.benchmark_group("compare_texts");
    for sentences in [8usize, 64] {
        let source = document(sentences);
        let target = document(sentences / 2);
        group.throughput(Throughput::Elements(sentences as u64));
        group.bench_function(format!("sentences_{sentences}"), |b| {
            b.iter(|| {
                runtime
                    .block_on(pipeline.compare_texts(
                        RawDocument::new("S", "https://a.example", source.as_str()),
                        RawDocument::new("T", "https://b.example", target.as_str()),
                    ))
                    .expect("compare")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_align, bench_compare_texts);
criterion_main!(benches);
