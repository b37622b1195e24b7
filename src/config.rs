//! Engine configuration.
//!
//! `EngineConfig` is plain data: build it with struct update syntax or the
//! chainable `with_*` methods, then hand it to `Engine::new`, which validates
//! it before any audio is produced.
//!
//! ```ignore
//! use sonificator::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_sample_rate(48_000.0)
//!     .with_bpm(120.0)
//!     .with_key_change(false);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{SynthError, DEFAULT_TABLE_LENGTH, MAX_BLOCK_SIZE, MAX_BPM, MIN_BPM};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Output channels; every channel carries the same signal
    pub channels: usize,
    /// Samples rendered per `process_block` call
    pub block_length: usize,
    /// Tempo in events per minute (one beat = four trigger ticks)
    pub bpm: f32,
    /// Whether heading tags shift the key
    pub change_key: bool,
    /// Wavetable resolution (samples per period)
    pub table_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            channels: 2,
            block_length: 4096, // safe against glitches, coarse for visuals
            bpm: 140.0,
            change_key: true,
            table_length: DEFAULT_TABLE_LENGTH,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_block_length(mut self, block_length: usize) -> Self {
        self.block_length = block_length;
        self
    }

    pub fn with_bpm(mut self, bpm: f32) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn with_key_change(mut self, change_key: bool) -> Self {
        self.change_key = change_key;
        self
    }

    pub fn with_table_length(mut self, table_length: usize) -> Self {
        self.table_length = table_length;
        self
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(SynthError::InvalidSampleRate(self.sample_rate));
        }
        if self.channels == 0 {
            return Err(SynthError::InvalidChannels(self.channels));
        }
        if self.block_length == 0 || self.block_length > MAX_BLOCK_SIZE {
            return Err(SynthError::InvalidBlockLength(self.block_length));
        }
        validate_bpm(self.bpm)?;
        if self.table_length == 0 {
            return Err(SynthError::InvalidTableLength(self.table_length));
        }
        Ok(())
    }
}

/// Reject tempos outside `MIN_BPM..=MAX_BPM` (and NaN).
pub fn validate_bpm(bpm: f32) -> Result<f32, SynthError> {
    if (MIN_BPM..=MAX_BPM).contains(&bpm) {
        Ok(bpm)
    } else {
        Err(SynthError::InvalidTempo(bpm))
    }
}

/// Pull a tempo back into the supported range.
pub fn clamp_bpm(bpm: f32) -> f32 {
    if bpm.is_nan() {
        return MIN_BPM;
    }
    bpm.clamp(MIN_BPM, MAX_BPM)
}
