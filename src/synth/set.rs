use crate::{
    dsp::WavetableBank,
    voices::{self, VoiceName},
    SynthError,
};

use super::voice::Voice;

/// The five voices, stored and summed in `VoiceName::ALL` order.
pub struct VoiceSet {
    voices: [Voice; 5],
}

impl VoiceSet {
    pub fn new(bank: &WavetableBank, sample_rate: f32) -> Self {
        Self {
            voices: VoiceName::ALL.map(|name| voices::build(name, bank, sample_rate)),
        }
    }

    pub fn note_on(
        &mut self,
        name: VoiceName,
        pitch: f32,
        volume: f32,
        length: u32,
    ) -> Result<(), SynthError> {
        self.voices[name.index()].note_on(pitch, volume, length)
    }

    pub fn note_off(&mut self, name: VoiceName) {
        self.voices[name.index()].note_off();
    }

    /// Sum of one sample from every voice.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.voices.iter_mut().map(|voice| voice.next_sample()).sum()
    }

    /// Fill `out` with the summed voices (no bus processing).
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn get(&self, name: VoiceName) -> &Voice {
        &self.voices[name.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    /// True while any voice is still producing sound.
    pub fn is_sounding(&self) -> bool {
        self.voices.iter().any(Voice::is_sounding)
    }
}
