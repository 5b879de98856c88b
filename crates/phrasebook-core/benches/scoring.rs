use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phrasebook_core::scoring::{levenshtein, similarity};

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");

    group.bench_function("short", |b| {
        b.iter(|| similarity(black_box("kitten"), black_box("sitting")))
    });

    let expected = "We propose a novel method for learning sentence representations.";
    let candidate = "We proposed a new method to learn sentence representation.";
    group.bench_function("sentence", |b| {
        b.iter(|| similarity(black_box(candidate), black_box(expected)))
    });

    group.bench_function("cjk", |b| {
        b.iter(|| {
            similarity(
                black_box("我们提出了一种学习句子表示的新方法"),
                black_box("我们提出一种学习句子表示的方法"),
            )
        })
    });

    group.finish();
}

fn bench_levenshtein_long(c: &mut Criterion) {
    let a = "the quick brown fox jumps over the lazy dog ".repeat(20);
    let b = "the quick brown cat leaps over the lazy dog ".repeat(20);

    c.bench_function("levenshtein/900 chars", |bench| {
        bench.iter(|| levenshtein(black_box(&a), black_box(&b)))
    });
}

criterion_group!(benches, bench_similarity, bench_levenshtein_long);
criterion_main!(benches);
