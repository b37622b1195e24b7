//! Benchmarks for the feedback delay line.
//!
//! The line is sized for the slowest tempo, so short logical lengths only
//! touch a small part of a large buffer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sonificator::{engine::context::delay_length, dsp::delay::FeedbackDelay, MIN_BPM};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");
    let capacity = delay_length(SAMPLE_RATE, MIN_BPM);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.1f32; size];

        for bpm in [140.0, 480.0] {
            let length = delay_length(SAMPLE_RATE, bpm);
            let mut delay = FeedbackDelay::new(capacity);
            group.bench_with_input(
                BenchmarkId::new(format!("{}bpm", bpm), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        delay.render(black_box(&mut buffer), 0.45, length);
                    })
                },
            );
        }
    }

    group.finish();
}
