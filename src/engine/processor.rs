use crate::{
    io::AudioOutput,
    sequencing::{TonalSequencer, TriggerBlock, TriggerSource},
    synth::VoiceSet,
    SynthError,
};

use super::{context::EngineContext, mix::MixBus};

/// Renders one block: triggers -> tonal sequencer -> voices -> mix bus -> output.
///
/// Owns all per-sample state. Nothing here allocates, locks or logs once
/// constructed, so `process_block` is safe to call from an audio callback.
pub struct AudioBlockProcessor {
    voices: VoiceSet,
    tonal: TonalSequencer,
    bus: MixBus,
    triggers: TriggerBlock,
}

impl AudioBlockProcessor {
    pub fn new(ctx: &EngineContext) -> Self {
        Self {
            voices: VoiceSet::new(ctx.bank(), ctx.sample_rate()),
            tonal: TonalSequencer::new(),
            bus: MixBus::new(ctx.max_delay_length()),
            triggers: TriggerBlock::new(ctx.block_length()),
        }
    }

    /// Render `ctx.block_length()` samples into every channel of `output`.
    ///
    /// Fails before the voices, sequencer or bus move if the output has the
    /// wrong shape or the source rejects the block. A rejecting source may
    /// already have advanced its own clock or cursor.
    pub fn process_block(
        &mut self,
        ctx: &EngineContext,
        source: &mut impl TriggerSource,
        output: &mut AudioOutput,
    ) -> Result<(), SynthError> {
        let frames = ctx.block_length();
        output.check_shape(ctx.channels(), frames)?;

        self.triggers.reset(frames);
        source.fill(ctx, &mut self.triggers)?;

        let delay_length = ctx.delay_length();
        let change_key = ctx.change_key();

        let Self {
            voices,
            tonal,
            bus,
            triggers,
        } = self;
        let (first, rest) = output
            .buffers
            .split_first_mut()
            .ok_or(SynthError::OutputShape {
                expected_channels: ctx.channels(),
                expected_frames: frames,
            })?;

        let mut pending = triggers.iter().peekable();
        for (i, sample) in first.iter_mut().enumerate() {
            while let Some((_, event)) = pending.next_if(|(offset, _)| *offset == i) {
                let note = tonal.step(event, change_key);
                for &name in note.voices {
                    // Pitch is freq1 times a positive harmonic, always > 0
                    let started = voices.note_on(name, note.pitch, note.volume, note.length);
                    debug_assert!(started.is_ok(), "{} rejected {:?}", name, started);
                }
            }

            let raw = voices.next_sample();
            *sample = bus.next_sample(raw, tonal.feedback(), delay_length);
        }

        for channel in rest {
            channel.copy_from_slice(first);
        }

        Ok(())
    }

    pub fn voices(&self) -> &VoiceSet {
        &self.voices
    }

    pub fn tonal(&self) -> &TonalSequencer {
        &self.tonal
    }

    pub fn bus(&self) -> &MixBus {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sequencing::Silence, voices::VoiceName, EngineConfig};

    fn context() -> EngineContext {
        EngineContext::new(&EngineConfig::default().with_block_length(512)).unwrap()
    }

    #[test]
    fn silence_in_silence_out() {
        let ctx = context();
        let mut processor = AudioBlockProcessor::new(&ctx);
        let mut output = AudioOutput::new(2, 512);
        processor.process_block(&ctx, &mut Silence, &mut output).unwrap();
        assert!(output.buffers.iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn trigger_starts_voices_at_its_offset() {
        let ctx = context();
        let mut processor = AudioBlockProcessor::new(&ctx);
        let mut output = AudioOutput::new(2, 512);
        let mut source = |_: &EngineContext, block: &mut TriggerBlock| block.push(100, "a", 90.0);

        processor.process_block(&ctx, &mut source, &mut output).unwrap();

        let left = &output.buffers[0];
        assert!(left[..100].iter().all(|&s| s == 0.0));
        assert!(left[100..].iter().any(|&s| s != 0.0));
        assert_eq!(output.buffers[0], output.buffers[1]);

        let voices = processor.voices();
        assert!(voices.get(VoiceName::Kick).is_sounding());
        assert!(voices.get(VoiceName::Seq).is_sounding());
        assert!(!voices.get(VoiceName::Sin).is_sounding());
    }

    #[test]
    fn wrong_output_shape_is_rejected() {
        let ctx = context();
        let mut processor = AudioBlockProcessor::new(&ctx);
        let mut output = AudioOutput::new(1, 512);
        assert_eq!(
            processor.process_block(&ctx, &mut Silence, &mut output),
            Err(SynthError::OutputShape {
                expected_channels: 2,
                expected_frames: 512
            })
        );
    }

    #[test]
    fn source_errors_propagate() {
        let ctx = context();
        let mut processor = AudioBlockProcessor::new(&ctx);
        let mut output = AudioOutput::new(2, 512);
        let mut source = |_: &EngineContext, block: &mut TriggerBlock| block.push(512, "p", 90.0);

        assert_eq!(
            processor.process_block(&ctx, &mut source, &mut output),
            Err(SynthError::TriggerOutOfRange {
                offset: 512,
                block_length: 512
            })
        );
        assert_eq!(processor.tonal().repeats(), 0);
    }

    #[test]
    fn rejected_block_leaves_processor_idle_but_not_the_source() {
        let ctx = context();
        let mut processor = AudioBlockProcessor::new(&ctx);
        let mut output = AudioOutput::new(2, 512);
        let mut pulled = 0;
        let mut source = |_: &EngineContext, block: &mut TriggerBlock| {
            pulled += 1;
            block.push(10, "a", 90.0)?;
            block.push(10, "p", 90.0)
        };

        assert_eq!(
            processor.process_block(&ctx, &mut source, &mut output),
            Err(SynthError::DuplicateTrigger(10))
        );
        assert_eq!(pulled, 1);
        assert_eq!(processor.tonal().feedback(), crate::sequencing::tonal::INITIAL_FEEDBACK);
        assert!(VoiceName::ALL
            .into_iter()
            .all(|name| !processor.voices().get(name).is_sounding()));
    }
}
