// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_prefix_tree::PrefixIntervalTree;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        (self.next_u32() as usize) % upper_exclusive
    }
}

fn row_heights(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| 24.0 + rng.gen_range_usize(40) as f64).collect()
}

fn bench_prefix_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_prefix_tree");
    group.sample_size(50);

    for &n in &[1_000_usize, 100_000_usize] {
        let heights = row_heights(n, 0x9E1D_0000_0000_0001);
        let tree = PrefixIntervalTree::new(&heights);
        let total = tree.total();

        group.bench_function(format!("build(n={n})"), |b| {
            b.iter(|| black_box(PrefixIntervalTree::new(black_box(&heights))));
        });

        group.bench_function(format!("sum_until(n={n})"), |b| {
            let mut rng = Lcg::new(0x9E1D_0000_0000_0002);
            b.iter(|| black_box(tree.sum_until(rng.gen_range_usize(n + 1))));
        });

        group.bench_function(format!("least_upper_bound(n={n})"), |b| {
            let mut rng = Lcg::new(0x9E1D_0000_0000_0003);
            b.iter(|| {
                let target = total * f64::from(rng.next_u32()) / f64::from(u32::MAX);
                black_box(tree.least_upper_bound(target))
            });
        });

        group.bench_function(format!("set_1k(n={n})"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    let mut rng = Lcg::new(0x9E1D_0000_0000_0004);
                    for _ in 0..1_000 {
                        let index = rng.gen_range_usize(n);
                        tree.set(index, 48.0);
                    }
                    black_box(tree);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_prefix_tree);
criterion_main!(benches);
