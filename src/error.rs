//! Error type shared by every fallible call in the crate.
//!
//! All of these are raised at configuration time or at a call boundary
//! (building an engine, filling a trigger block, triggering a voice). Nothing
//! in the per-sample render loop returns an error.

/// Errors raised while configuring or driving the synthesizer
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    /// Sample rate must be finite and positive
    InvalidSampleRate(f32),
    /// At least one output channel is required
    InvalidChannels(usize),
    /// Block length must be between 1 and `MAX_BLOCK_SIZE`
    InvalidBlockLength(usize),
    /// Tempo must lie within `MIN_BPM..=MAX_BPM`
    InvalidTempo(f32),
    /// Wavetables need at least one sample per period
    InvalidTableLength(usize),
    /// Waveform name that does not match any `WaveKind`
    UnknownWaveform(String),
    /// Voice name that does not match any `VoiceName`
    UnknownVoice(String),
    /// Oscillator frequencies must be finite and positive
    InvalidFrequency(f32),
    /// Element widths must be finite and positive
    InvalidWidth(f32),
    /// Trigger offset falls outside the current block
    TriggerOutOfRange { offset: usize, block_length: usize },
    /// Two triggers were placed on the same sample offset
    DuplicateTrigger(usize),
    /// Output buffers do not match the configured channel count / block length
    OutputShape {
        expected_channels: usize,
        expected_frames: usize,
    },
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthError::InvalidSampleRate(rate) => {
                write!(f, "Invalid sample rate: {} Hz (must be > 0)", rate)
            }
            SynthError::InvalidChannels(channels) => {
                write!(f, "Invalid channel count: {} (need at least 1)", channels)
            }
            SynthError::InvalidBlockLength(length) => write!(
                f,
                "Invalid block length: {} samples (must be 1..={})",
                length,
                crate::MAX_BLOCK_SIZE
            ),
            SynthError::InvalidTempo(bpm) => write!(
                f,
                "Invalid tempo: {} bpm (must be {}..={})",
                bpm,
                crate::MIN_BPM,
                crate::MAX_BPM
            ),
            SynthError::InvalidTableLength(length) => {
                write!(f, "Invalid wavetable length: {} (must be >= 1)", length)
            }
            SynthError::UnknownWaveform(name) => write!(f, "Unknown waveform: '{}'", name),
            SynthError::UnknownVoice(name) => write!(f, "Unknown voice: '{}'", name),
            SynthError::InvalidFrequency(freq) => {
                write!(f, "Invalid frequency: {} Hz (must be > 0)", freq)
            }
            SynthError::InvalidWidth(width) => {
                write!(f, "Invalid element width: {} (must be > 0)", width)
            }
            SynthError::TriggerOutOfRange {
                offset,
                block_length,
            } => write!(
                f,
                "Trigger offset {} is outside the block (0..{})",
                offset, block_length
            ),
            SynthError::DuplicateTrigger(offset) => {
                write!(f, "More than one trigger at offset {}", offset)
            }
            SynthError::OutputShape {
                expected_channels,
                expected_frames,
            } => write!(
                f,
                "Output buffers must be {} channels of {} frames",
                expected_channels, expected_frames
            ),
        }
    }
}

impl std::error::Error for SynthError {}
