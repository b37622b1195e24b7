//! Real-world scenario benchmarks.
//!
//! The five voices as the engine plays them, and complete engine blocks
//! from trigger scheduling through the mix bus.

mod mix;
mod voices;

pub use mix::bench_mix;
pub use voices::bench_voices;
