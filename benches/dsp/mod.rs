//! Benchmarks for low-level DSP primitives.

mod delay;
mod envelope;
mod oscillator;

pub use delay::bench_delay;
pub use envelope::bench_envelope;
pub use oscillator::bench_oscillator;
