use crate::SynthError;

use super::AudioOutput;

/// Feeds fixed-size engine blocks into host callbacks of any size.
///
/// Audio hosts ask for whatever frame count suits them; the engine renders
/// exactly one configured block at a time. The pump keeps the last rendered
/// block and a read position, rendering again only when it runs dry, so no
/// frame is dropped or repeated across callbacks.
pub struct FramePump {
    block: AudioOutput,
    position: usize,
}

impl FramePump {
    pub fn new(channels: usize, block_length: usize) -> Self {
        Self {
            block: AudioOutput::new(channels, block_length),
            // Start drained so the first fill renders
            position: block_length,
        }
    }

    /// Fill interleaved `data`, calling `render` for each new block needed.
    ///
    /// A failed render leaves that block silent; filling carries on and the
    /// first error is returned once `data` is full.
    pub fn fill<F>(&mut self, data: &mut [f32], mut render: F) -> Result<(), SynthError>
    where
        F: FnMut(&mut AudioOutput) -> Result<(), SynthError>,
    {
        let channels = self.block.channels();
        let block_length = self.block.frames();
        if channels == 0 || block_length == 0 {
            data.fill(0.0);
            return Ok(());
        }

        let mut result = Ok(());
        let mut written = 0;
        let frames = data.len() / channels;

        while written < frames {
            if self.position >= block_length {
                if let Err(err) = render(&mut self.block) {
                    self.block.silence();
                    if result.is_ok() {
                        result = Err(err);
                    }
                }
                self.position = 0;
            }

            let out = &mut data[written * channels..];
            let copied = self.block.write_interleaved(self.position, out);
            self.position += copied;
            written += copied;
        }

        // Trailing partial frame
        data[frames * channels..].fill(0.0);
        result
    }

    /// Frames left in the current block.
    pub fn buffered(&self) -> usize {
        self.block.frames().saturating_sub(self.position)
    }
}
