// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_buffer_set::IntegerBufferSet;

fn filled(slots: usize) -> IntegerBufferSet {
    let mut set = IntegerBufferSet::new();
    for value in 0..slots {
        set.new_slot_for_value(value);
    }
    set
}

fn bench_buffer_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_buffer_set");
    group.sample_size(50);

    for &slots in &[16_usize, 64_usize] {
        // Slide a window of `slots` values forward one value at a time, the
        // way a list recycles rows while scrolling down.
        group.bench_function(format!("slide_forward(slots={slots},steps=10k)"), |b| {
            b.iter_batched(
                || filled(slots),
                |mut set| {
                    for low in 1..10_000 {
                        let value = low + slots - 1;
                        let slot = set.replace_furthest_value_slot(low, value, value);
                        black_box(slot);
                    }
                    black_box(set);
                },
                BatchSize::SmallInput,
            );
        });

        // Jump far away and back, evicting from both ends.
        group.bench_function(format!("jump(slots={slots},steps=1k)"), |b| {
            b.iter_batched(
                || filled(slots),
                |mut set| {
                    for step in 0..1_000 {
                        let low = if step % 2 == 0 { 100_000 + step } else { step };
                        for value in low..low + slots {
                            if !set.contains(value) {
                                set.replace_furthest_value_slot(low, low + slots - 1, value);
                            }
                        }
                    }
                    black_box(set);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_buffer_set);
criterion_main!(benches);
