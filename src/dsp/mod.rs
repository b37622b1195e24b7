//! Low-level DSP primitives used by the voices and the mix bus.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! making them safe to embed directly inside voice structs. They stay focused
//! on the signal-processing math; the voices and the engine layer on the
//! musical behaviour.

/// Circular feedback delay line with a runtime length.
pub mod delay;
/// Hard clipping used by the percussive voices.
pub mod distortion;
/// Linear-increment attack/decay/sustain/release envelope.
pub mod envelope;
/// Interpolating wavetable oscillator.
pub mod oscillator;
/// Two-sample averaging filters.
pub mod smooth;
/// The four shared waveform tables.
pub mod wavetable;

pub use envelope::{Envelope, EnvelopeStage};
pub use oscillator::TableOscillator;
pub use wavetable::{WaveKind, Wavetable, WavetableBank};
