// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gauntlet_model::table::{FunctionTable, FunctionTableBuilder};
use gauntlet_oracle::budget::EvaluationBudget;
use gauntlet_oracle::deadline::PhaseDeadline;
use gauntlet_oracle::oracle::{Oracle, TimingMode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

/// Builds a random NK-landscape with `n` variables and row arity `k + 1`.
fn random_landscape(rng: &mut ChaCha8Rng, n: usize, k: usize) -> FunctionTable {
    let row_arity = k + 1;
    let mut builder = FunctionTableBuilder::new(n, u64::MAX, row_arity)
        .unwrap_or_else(|e| panic!("invalid landscape shape n={n} k={k}: {e}"));
    for i in 0..n {
        let mut vars = Vec::with_capacity(row_arity);
        vars.push(i);
        while vars.len() < row_arity {
            let v = rng.random_range(0..n);
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        let values = (0..1usize << row_arity)
            .map(|_| rng.random_range(0.0..1.0))
            .collect();
        builder.add_row(vars, values).unwrap();
    }
    builder.build().unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(0x6a09_e667);
    let mut group = c.benchmark_group("evaluate_benchmark");

    for &(n, k) in &[(100usize, 2usize), (500, 4), (1000, 4), (1000, 8)] {
        let table = Arc::new(random_landscape(&mut rng, n, k));
        let deadline = PhaseDeadline::new();
        deadline.arm(Duration::from_secs(24 * 3600));
        let oracle = Oracle::new(
            format!("nk-{n}-{k}"),
            table,
            EvaluationBudget::new(u64::MAX),
            deadline,
            TimingMode::Testing,
        );
        let candidate: Vec<bool> = (0..n).map(|_| rng.random_bool(0.5)).collect();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("k{k}"), n),
            &candidate,
            |b, candidate| {
                b.iter(|| {
                    oracle
                        .evaluate(black_box(candidate))
                        .unwrap_or_else(|e| panic!("evaluation refused: {e}"))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
