//! Benchmarks for complete engine blocks.
//!
//! Scheduling, the tonal sequencer, five voices and the mix bus together,
//! at the default tempo and at the fastest tempo where every block carries
//! several triggers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sonificator::{
    sequencing::{ScheduledTriggers, TagCursor, TagEvent},
    Engine, EngineConfig,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

const PAGE: &[&str] = &[
    "h1", "div", "p", "a", "a", "a", "a", "li", "li", "img", "span", "h2", "div", "img", "p",
];

fn document() -> ScheduledTriggers<TagCursor> {
    let events = PAGE
        .iter()
        .enumerate()
        .map(|(i, tag)| TagEvent::new(*tag, 60.0 + 45.0 * i as f32).expect("positive width"))
        .collect();
    ScheduledTriggers::new(TagCursor::new(events))
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/block");

    for &size in BLOCK_SIZES {
        for bpm in [140.0, sonificator::MAX_BPM] {
            let config = EngineConfig::default()
                .with_sample_rate(SAMPLE_RATE)
                .with_block_length(size)
                .with_bpm(bpm);
            let mut engine = Engine::new(config).expect("valid config");
            let mut output = engine.new_output();
            let mut source = document();

            group.bench_with_input(
                BenchmarkId::new(format!("{}bpm", bpm), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        engine
                            .process_block(&mut source, black_box(&mut output))
                            .expect("output shaped for engine");
                    })
                },
            );
        }

        // Paused: the silence path
        let config = EngineConfig::default().with_block_length(size);
        let mut engine = Engine::new(config).expect("valid config");
        engine.pause();
        let mut output = engine.new_output();
        let mut source = document();
        group.bench_with_input(BenchmarkId::new("paused", size), &size, |b, _| {
            b.iter(|| {
                engine
                    .process_block(&mut source, black_box(&mut output))
                    .expect("output shaped for engine");
            })
        });
    }

    group.finish();
}
