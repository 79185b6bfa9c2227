// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_grid::{Grid, GridProps};
use understory_grid_columns::{ColumnDef, ColumnOverrides, Fixed, compute_column_layout};
use understory_timing::TimerQueue;

fn column_tree(groups: usize, per_group: usize) -> Vec<ColumnDef> {
    let mut columns = vec![ColumnDef::leaf("id", 60.0).with_fixed(Fixed::Left)];
    for g in 0..groups {
        let children = (0..per_group)
            .map(|c| ColumnDef::leaf(format!("g{g}c{c}"), 80.0 + (c % 3) as f64 * 20.0))
            .collect();
        columns.push(ColumnDef::group(children));
    }
    columns.push(ColumnDef::leaf("actions", 90.0).with_fixed(Fixed::Right));
    columns
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_grid");
    group.sample_size(50);

    for &(groups, per_group) in &[(4_usize, 4_usize), (32_usize, 8_usize)] {
        let columns = column_tree(groups, per_group);
        let mut overrides = ColumnOverrides::new();
        overrides.record_width("g0c0", 150.0);

        group.bench_function(format!("column_layout(groups={groups},per={per_group})"), |b| {
            b.iter(|| black_box(compute_column_layout(black_box(&columns), &overrides, 1200.0)));
        });

        group.bench_function(format!("new(groups={groups},per={per_group})"), |b| {
            b.iter_batched(
                || GridProps::new(columns.clone(), 100_000, 1202.0, 800.0),
                |props| black_box(Grid::new(props)),
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("wheel_scroll(rows=100k)", |b| {
        let columns = column_tree(8, 4);
        b.iter_batched(
            || {
                let props = GridProps::new(columns.clone(), 100_000, 1202.0, 800.0);
                let grid = Grid::new(props).unwrap();
                (grid, TimerQueue::new())
            },
            |(mut grid, mut timers)| {
                for _ in 0..500 {
                    grid.on_wheel(20.0, 100.0, &mut timers);
                }
                black_box(grid.drain_events());
                black_box(grid);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
