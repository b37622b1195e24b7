use crate::{dsp::oscillator::check_frequency, synth::voice::VoiceCore, SynthError};

/// Second oscillator locked to a fixed ratio of the played pitch.
///
/// The two oscillators start in phase and drift apart at the difference
/// frequency, which is what gives sin/sin2/seq their interval colour.
#[derive(Debug, Clone, Copy)]
pub struct Detuned {
    ratio: f32,
}

impl Detuned {
    pub fn new(ratio: f32) -> Self {
        debug_assert!(ratio > 0.0);
        Self { ratio }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub(crate) fn note_on(
        &mut self,
        core: &mut VoiceCore,
        pitch: f32,
        volume: f32,
        length: u32,
    ) -> Result<(), SynthError> {
        let secondary = check_frequency(pitch * self.ratio)?;
        core.note_on(pitch, volume, length)?;
        if let Some(osc) = core.oscillator_mut(1) {
            osc.set_frequency(secondary)?;
        }
        Ok(())
    }
}
