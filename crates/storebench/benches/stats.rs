// Dweve storebench - Storage Benchmark Harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Statistics engine and signature normalizer benchmarks.
//!
//! Measures the per-comparison cost of the Welch test at typical and large
//! sample counts, and the per-statement cost of signature normalization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use storebench::stats::{compare_samples, SampleSummary};
use storebench::tracer::normalize;

fn samples(count: usize, base: u64, spread: u64) -> Vec<u64> {
    // Deterministic jitter so runs are comparable.
    (0..count as u64)
        .map(|i| base + (i * 7919) % spread.max(1))
        .collect()
}

// ============================================================================
// Statistics
// ============================================================================

fn bench_compare_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_samples");

    for &count in &[10usize, 61, 1_000] {
        let baseline = samples(count, 10_000, 500);
        let current = samples(count, 10_250, 500);

        group.throughput(Throughput::Elements(count as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| compare_samples(black_box(&baseline), black_box(&current), 0.05))
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let data = samples(1_000, 5_000, 2_000);
    c.bench_function("sample_summary_1000", |b| {
        b.iter(|| SampleSummary::from_samples(black_box(&data)))
    });
}

// ============================================================================
// Signature normalization
// ============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let statements = [
        ("key_lookup", "GET accounts:12345"),
        ("quoted_put", "PUT accounts:12345 'Ada Lovelace, 1815'"),
        (
            "sql",
            "SELECT id, name FROM accounts WHERE id IN (1, 2, 3, 4) AND name = 'bob' LIMIT 50",
        ),
    ];

    for (name, statement) in &statements {
        group.throughput(Throughput::Bytes(statement.len() as u64));
        group.bench_function(*name, |b| b.iter(|| normalize(black_box(statement))));
    }

    group.finish();
}

criterion_group!(benches, bench_compare_samples, bench_summary, bench_normalize);
criterion_main!(benches);
