//! Criterion benchmarks for dictionary construction, lookup and segmentation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use symdel::{SymSpell, SymSpellConfig, Verbosity};

/// Generate a synthetic dictionary of `count` distinct words with decreasing counts.
fn generate_words(count: usize) -> Vec<(String, i64)> {
    let syllables = [
        "ka", "lo", "mi", "ren", "sa", "tor", "vel", "an", "dri", "es", "quo", "nu",
    ];
    (0..count)
        .map(|i| {
            let mut word = String::new();
            let mut n = i;
            loop {
                word.push_str(syllables[n % syllables.len()]);
                n /= syllables.len();
                if n == 0 {
                    break;
                }
            }
            (word, (count - i) as i64 * 10)
        })
        .collect()
}

fn build(count: usize) -> SymSpell {
    SymSpell::from_iter(SymSpellConfig::default(), generate_words(count))
        .unwrap_or_else(|e| panic!("failed to build dictionary: {e}"))
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for count in [1_000, 10_000] {
        let words = generate_words(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("from_iter", count), &words, |b, words| {
            b.iter(|| {
                SymSpell::from_iter(SymSpellConfig::default(), black_box(words.iter().cloned()))
            })
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let sym = build(10_000);
    let inputs = ["kalomi", "klaomi", "renstor", "velandri", "quonuxx", "zzzzzz"];

    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(inputs.len() as u64));
    for (name, verbosity) in [
        ("top", Verbosity::Top),
        ("closest", Verbosity::Closest),
        ("all", Verbosity::All),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for input in inputs {
                    black_box(sym.lookup(black_box(input), verbosity, 2).ok());
                }
            })
        });
    }
    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let sym = build(10_000);
    c.bench_function("word_segmentation", |b| {
        b.iter(|| black_box(sym.word_segmentation_with(black_box("kalomirensatorvelan"), 1, 8)))
    });
}

criterion_group!(benches, bench_construction, bench_lookup, bench_segmentation);
criterion_main!(benches);
