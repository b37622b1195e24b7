//! Benchmarks for the linear ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sonificator::dsp::Envelope;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Retriggered each block: attack and decay branches
        let mut env = Envelope::adsr(20, 2000, 0.3, 2000);
        group.bench_with_input(BenchmarkId::new("attack_decay", size), &size, |b, _| {
            b.iter(|| {
                env.note_on(1.0, 10_000);
                env.render(black_box(&mut buffer));
            })
        });

        // Held note: frozen sustain
        let mut env = Envelope::new();
        env.note_on(1.0, u32::MAX);
        env.render(&mut vec![0.0; 1000]);
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Idle: the early return every silent voice takes
        let mut env = Envelope::new();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
