//! Transport around the block processor.
//!
//! `Engine` is what a host holds: it validates the configuration, owns the
//! context and processor, and implements play/pause plus the live tunables.
//! Hosts on another thread drive it through `ControlMessage`s drained at
//! the start of each block.

pub mod context;
pub mod mix;
pub mod processor;

pub use context::EngineContext;
pub use mix::MixBus;
pub use processor::AudioBlockProcessor;

use crate::{
    dsp::WavetableBank,
    io::AudioOutput,
    sequencing::TriggerSource,
    synth::{ControlMessage, ControlReceiver},
    EngineConfig, SynthError,
};

pub struct Engine {
    ctx: EngineContext,
    processor: AudioBlockProcessor,
    playing: bool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, SynthError> {
        let ctx = EngineContext::new(&config)?;
        Ok(Self::from_context(ctx))
    }

    /// Build around an existing wavetable bank, e.g. one with seeded noise.
    pub fn with_bank(config: EngineConfig, bank: WavetableBank) -> Result<Self, SynthError> {
        let ctx = EngineContext::with_bank(&config, bank)?;
        Ok(Self::from_context(ctx))
    }

    fn from_context(ctx: EngineContext) -> Self {
        log::info!(
            "engine ready: {} Hz, {} ch, {} frames/block, {} bpm, key change {}",
            ctx.sample_rate(),
            ctx.channels(),
            ctx.block_length(),
            ctx.bpm(),
            if ctx.change_key() { "on" } else { "off" },
        );
        let processor = AudioBlockProcessor::new(&ctx);
        Self {
            ctx,
            processor,
            playing: true,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Returns true if now playing.
    pub fn toggle_playback(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_bpm(&mut self, bpm: f32) -> Result<(), SynthError> {
        self.ctx.set_bpm(bpm)
    }

    pub fn adjust_bpm(&mut self, delta: f32) -> f32 {
        self.ctx.adjust_bpm(delta)
    }

    pub fn toggle_key_change(&mut self) -> bool {
        self.ctx.toggle_key_change()
    }

    /// Apply one control message; cursor moves go to `source`.
    pub fn apply(&mut self, message: ControlMessage, source: &mut impl TriggerSource) {
        match message {
            ControlMessage::Play => self.play(),
            ControlMessage::Pause => self.pause(),
            ControlMessage::TogglePlayback => {
                self.toggle_playback();
            }
            ControlMessage::AdjustTempo(delta) => {
                self.adjust_bpm(delta);
            }
            ControlMessage::ToggleKeyChange => {
                self.toggle_key_change();
            }
            ControlMessage::Rewind(events) => source.seek(-(events as isize)),
            ControlMessage::Forward(events) => source.seek(events as isize),
            ControlMessage::RewindToStart => source.seek_start(),
        }
    }

    /// Drain every pending control message.
    pub fn apply_controls(
        &mut self,
        rx: &mut impl ControlReceiver,
        source: &mut impl TriggerSource,
    ) {
        while let Some(message) = rx.pop() {
            self.apply(message, source);
        }
    }

    /// Render one block, or silence while paused.
    ///
    /// A paused engine neither consults `source` nor advances any voice,
    /// sequencer or delay state, so resuming continues exactly where it
    /// stopped.
    pub fn process_block(
        &mut self,
        source: &mut impl TriggerSource,
        output: &mut AudioOutput,
    ) -> Result<(), SynthError> {
        if !self.playing {
            output.check_shape(self.ctx.channels(), self.ctx.block_length())?;
            output.silence();
            return Ok(());
        }
        self.processor.process_block(&self.ctx, source, output)
    }

    /// An output buffer shaped for this engine.
    pub fn new_output(&self) -> AudioOutput {
        AudioOutput::new(self.ctx.channels(), self.ctx.block_length())
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn processor(&self) -> &AudioBlockProcessor {
        &self.processor
    }
}
