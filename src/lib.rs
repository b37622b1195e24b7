pub mod config; // Engine configuration and validation
pub mod dsp;
pub mod engine; // Block processing, mix bus and transport
pub mod error;
pub mod io;
pub mod sequencing; // Tags, tick clock and the tonal state machine
pub mod synth; // Voice core, voice set and control messages
pub mod voices; // The five fixed voices

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::SynthError;

/// Largest block the engine will render in one call.
pub const MAX_BLOCK_SIZE: usize = 16_384;
/// Default wavetable resolution (samples per period).
pub const DEFAULT_TABLE_LENGTH: usize = 256;
/// Slowest supported tempo; sizes the mix bus delay line.
pub const MIN_BPM: f32 = 20.0;
/// Fastest supported tempo.
pub const MAX_BPM: f32 = 960.0;
