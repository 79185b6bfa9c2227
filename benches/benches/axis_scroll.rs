// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_grid_axis::{AxisScrollHelper, ItemBuffer, ItemSizer, SizeGetter};

fn varying() -> SizeGetter {
    Rc::new(|index| 24.0 + (index % 7) as f64 * 6.0)
}

fn bench_axis_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_grid_axis");
    group.sample_size(50);

    for &n in &[10_000_usize, 1_000_000_usize] {
        group.bench_function(format!("scroll_by_uniform(n={n})"), |b| {
            b.iter_batched(
                || AxisScrollHelper::new(n, 600.0, ItemSizer::uniform(32.0)),
                |mut axis| {
                    for _ in 0..1_000 {
                        black_box(axis.scroll_by(120.0));
                    }
                    black_box(axis);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("scroll_by_measured(n={n})"), |b| {
            b.iter_batched(
                || AxisScrollHelper::new(n, 600.0, ItemSizer::from_getter(32.0, varying())),
                |mut axis| {
                    for _ in 0..1_000 {
                        black_box(axis.scroll_by(120.0));
                    }
                    black_box(axis);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("scroll_to_far(n={n})"), |b| {
            b.iter_batched(
                || AxisScrollHelper::new(n, 600.0, ItemSizer::uniform(32.0)),
                |mut axis| {
                    let end = axis.content_extent();
                    for step in 0..100 {
                        let position = end * f64::from(step) / 100.0;
                        black_box(axis.scroll_to(position));
                    }
                    black_box(axis);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.bench_function("row_window_scroll(n=100k,buffer=6)", |b| {
        let getter: SizeGetter = Rc::new(|_| 32.0);
        b.iter_batched(
            || ItemBuffer::new(100_000, 32.0, 600.0, getter.clone(), Some(6)),
            |mut buffer| {
                for index in 0..2_000 {
                    buffer.get_items(index, -8.0);
                    black_box(buffer.get_items_with_updated_buffer());
                }
                black_box(buffer);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_axis_scroll);
criterion_main!(benches);
