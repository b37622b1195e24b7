//! Benchmarks for wavetable oscillators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sonificator::dsp::{TableOscillator, WaveKind, WavetableBank};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let bank = WavetableBank::new(sonificator::DEFAULT_TABLE_LENGTH).expect("table bank");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Every shape costs the same: one interpolated table read
        for kind in WaveKind::ALL {
            let mut osc = TableOscillator::new(bank.table(kind), SAMPLE_RATE);
            osc.set_frequency(123.75).expect("positive frequency");
            group.bench_with_input(BenchmarkId::new(kind.as_str(), size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&mut buffer));
                })
            });
        }

        // Kick-style sweep: retune every sample
        let mut osc = TableOscillator::new(bank.table(WaveKind::Sine), SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, _| {
            b.iter(|| {
                osc.set_frequency(180.0).expect("positive frequency");
                for sample in buffer.iter_mut() {
                    osc.detune(0.9998);
                    *sample = osc.next_sample();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
