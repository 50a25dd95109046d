// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Scanner benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use misti_core::{Scanner, tokenize_all};
use std::hint::black_box;

const FLAT: &str = "val total = price * 1.08e+0 + 0xFF - count % 3";

const NESTED: &str = "\
var state = ()
val handler =
    match event
        \"click\" -> count += 1
        \"reset\" -> count = 0
    log \"done\\n\"
";

fn generate_blocks(n: usize) -> String {
    (0..n)
        .map(|i| format!("val block{i} =\n    inner{i} <$> {i}.5\n        deep_{i} \"s{i}\"\n"))
        .collect()
}

fn bench_scanner_simple(c: &mut Criterion) {
    c.bench_function("scanner/flat_line", |b| {
        b.iter(|| black_box(Scanner::new(black_box(FLAT)).tokens()));
    });

    c.bench_function("scanner/nested_blocks", |b| {
        b.iter(|| black_box(Scanner::new(black_box(NESTED)).tokens()));
    });
}

fn bench_scanner_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner/scaling");

    for size in [10, 100, 1000] {
        let source = generate_blocks(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("blocks", size), &source, |b, src| {
            b.iter(|| black_box(Scanner::new(src).tokens()));
        });
    }

    group.finish();
}

fn bench_tokenize_all(c: &mut Criterion) {
    let sources: Vec<String> = (0..64).map(|_| generate_blocks(50)).collect();

    c.bench_function("scanner/tokenize_all_64", |b| {
        b.iter(|| black_box(tokenize_all(&sources)));
    });
}

criterion_group!(
    benches,
    bench_scanner_simple,
    bench_scanner_scaling,
    bench_tokenize_all
);
criterion_main!(benches);
