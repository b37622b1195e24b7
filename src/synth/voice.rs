use crate::{
    dsp::{envelope::Envelope, oscillator::check_frequency, oscillator::TableOscillator},
    voices::{kick::KickSweep, snare::SnareBody, Detuned, VoiceName},
    SynthError,
};

/// Envelope plus oscillators: the part every voice shares.
///
/// Output is `amplitude * mean(oscillators)`. While the envelope is not
/// sounding the core returns exactly 0.0 and leaves its oscillators alone,
/// so phases pick up where they stopped on the next note.
pub struct VoiceCore {
    envelope: Envelope,
    oscillators: Vec<TableOscillator>,
}

impl VoiceCore {
    pub fn new(envelope: Envelope, oscillators: Vec<TableOscillator>) -> Self {
        debug_assert!(!oscillators.is_empty());
        Self {
            envelope,
            oscillators,
        }
    }

    /// Start (or restart) the envelope and tune every oscillator to `pitch`.
    pub fn note_on(&mut self, pitch: f32, volume: f32, length: u32) -> Result<(), SynthError> {
        let pitch = check_frequency(pitch)?;
        self.envelope.note_on(volume, length);
        for osc in &mut self.oscillators {
            osc.set_frequency(pitch)?;
        }
        Ok(())
    }

    pub fn note_off(&mut self) {
        self.envelope.note_off();
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if !self.envelope.is_sounding() {
            return 0.0;
        }

        let amplitude = self.envelope.next_sample();
        let sum: f32 = self.oscillators.iter_mut().map(|osc| osc.next_sample()).sum();
        amplitude * sum / self.oscillators.len() as f32
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn oscillators(&self) -> &[TableOscillator] {
        &self.oscillators
    }

    pub fn oscillator_mut(&mut self, index: usize) -> Option<&mut TableOscillator> {
        self.oscillators.get_mut(index)
    }

    pub fn amplitude(&self) -> f32 {
        self.envelope.amplitude()
    }

    pub fn is_sounding(&self) -> bool {
        self.envelope.is_sounding()
    }
}

/// Variant-specific behaviour layered over the shared core.
pub enum VoiceKind {
    /// Second oscillator follows the pitch at a fixed ratio (sin, sin2, seq)
    Detuned(Detuned),
    /// Fixed-pitch kick with a downward sweep and hard clip
    Kick(KickSweep),
    /// Snare body plus envelope-scaled noise and a smoothing filter
    Snare(SnareBody),
}

/// One named, monophonic voice.
///
/// A new `note_on` restarts the envelope in place; notes never stack.
pub struct Voice {
    name: VoiceName,
    core: VoiceCore,
    kind: VoiceKind,
}

impl Voice {
    pub fn new(name: VoiceName, core: VoiceCore, kind: VoiceKind) -> Self {
        Self { name, core, kind }
    }

    pub fn note_on(&mut self, pitch: f32, volume: f32, length: u32) -> Result<(), SynthError> {
        match &mut self.kind {
            VoiceKind::Detuned(detuned) => detuned.note_on(&mut self.core, pitch, volume, length),
            VoiceKind::Kick(sweep) => sweep.note_on(&mut self.core, pitch, volume, length),
            VoiceKind::Snare(body) => body.note_on(&mut self.core, pitch, volume, length),
        }
    }

    pub fn note_off(&mut self) {
        self.core.note_off();
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match &mut self.kind {
            VoiceKind::Detuned(_) => self.core.next_sample(),
            VoiceKind::Kick(sweep) => sweep.next_sample(&mut self.core),
            VoiceKind::Snare(body) => body.next_sample(&mut self.core),
        }
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn name(&self) -> VoiceName {
        self.name
    }

    pub fn core(&self) -> &VoiceCore {
        &self.core
    }

    pub fn kind(&self) -> &VoiceKind {
        &self.kind
    }

    pub fn is_sounding(&self) -> bool {
        self.core.is_sounding()
    }
}
