//! Benchmarks for the five voices.
//!
//! Each voice is retriggered once per block at the pitch the sequencer uses
//! for a default element, so every branch (attack, decay, sustain) is hit.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sonificator::{
    dsp::WavetableBank,
    synth::VoiceSet,
    voices::{self, VoiceName},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let bank = WavetableBank::new(sonificator::DEFAULT_TABLE_LENGTH).expect("table bank");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === SINGLE VOICES ===
        // kick pays for the per-sample sweep, snr for noise, clip and filter
        for name in VoiceName::ALL {
            let mut voice = voices::build(name, &bank, SAMPLE_RATE);
            group.bench_with_input(BenchmarkId::new(name.as_str(), size), &size, |b, _| {
                b.iter(|| {
                    voice.note_on(123.75, 1.0, 2000).expect("positive pitch");
                    voice.render(black_box(&mut buffer));
                })
            });
        }

        // === ALL FIVE ===
        // Worst case: every voice sounding at once
        let mut set = VoiceSet::new(&bank, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("all_five", size), &size, |b, _| {
            b.iter(|| {
                for name in VoiceName::ALL {
                    set.note_on(name, 123.75, 1.0, 2000).expect("positive pitch");
                }
                set.render(black_box(&mut buffer));
            })
        });

        // === IDLE SET ===
        // The common case between sparse triggers
        let mut idle = VoiceSet::new(&bank, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
