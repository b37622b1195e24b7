// Purpose - block buffers handed to hosts and adaptation to host callbacks

pub mod pump;

pub use pump::FramePump;

use crate::{EngineConfig, SynthError};

/// One rendered block, one buffer per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioOutput {
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    pub fn for_config(config: &EngineConfig) -> Self {
        Self::new(config.channels, config.block_length)
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    /// Frames in the first channel.
    pub fn frames(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }

    pub fn check_shape(&self, channels: usize, frames: usize) -> Result<(), SynthError> {
        let shaped = self.buffers.len() == channels
            && self.buffers.iter().all(|buffer| buffer.len() == frames);
        if shaped {
            Ok(())
        } else {
            Err(SynthError::OutputShape {
                expected_channels: channels,
                expected_frames: frames,
            })
        }
    }

    pub fn silence(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
    }

    /// Copy frames starting at `offset` into an interleaved buffer.
    ///
    /// `out` is read as frames of `channels()` samples. Returns the number of
    /// frames written, limited by both buffers.
    pub fn write_interleaved(&self, offset: usize, out: &mut [f32]) -> usize {
        let channels = self.channels();
        if channels == 0 {
            return 0;
        }

        let available = self.frames().saturating_sub(offset);
        let count = available.min(out.len() / channels);
        for (frame, chunk) in out.chunks_exact_mut(channels).take(count).enumerate() {
            for (sample, buffer) in chunk.iter_mut().zip(&self.buffers) {
                *sample = buffer[offset + frame];
            }
        }
        count
    }
}

impl Default for AudioOutput {
    fn default() -> Self {
        Self::for_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_default_config() {
        let output = AudioOutput::default();
        assert_eq!(output.channels(), 2);
        assert_eq!(output.frames(), 4096);
        assert_eq!(output.check_shape(2, 4096), Ok(()));
    }

    #[test]
    fn shape_check_catches_ragged_buffers() {
        let mut output = AudioOutput::new(2, 8);
        output.buffers[1].pop();
        assert!(output.check_shape(2, 8).is_err());
        assert!(AudioOutput::new(3, 8).check_shape(2, 8).is_err());
    }

    #[test]
    fn interleaves_from_offset() {
        let mut output = AudioOutput::new(2, 4);
        output.buffers[0] = vec![1.0, 2.0, 3.0, 4.0];
        output.buffers[1] = vec![-1.0, -2.0, -3.0, -4.0];

        let mut out = [0.0f32; 6];
        assert_eq!(output.write_interleaved(1, &mut out), 3);
        assert_eq!(out, [2.0, -2.0, 3.0, -3.0, 4.0, -4.0]);

        let mut short = [0.0f32; 3];
        assert_eq!(output.write_interleaved(0, &mut short), 1);
        assert_eq!(short, [1.0, -1.0, 0.0]);
    }
}
