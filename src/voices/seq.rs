//! Sequence voice - block containers (and half of every link).
//!
//! Two sawtooth oscillators a fifth apart. Uses the stock envelope: a
//! slower 200-sample attack and short decay onto a 0.2 sustain, so it reads
//! as a buzzy, rhythmic bass line.

use crate::{
    dsp::{Envelope, WaveKind, WavetableBank},
    synth::voice::{Voice, VoiceCore, VoiceKind},
    voices::{oscillators, Detuned, VoiceName},
};

/// Create the `seq` voice.
pub fn seq(bank: &WavetableBank, sample_rate: f32) -> Voice {
    let core = VoiceCore::new(
        Envelope::new(),
        oscillators(bank, sample_rate, &[WaveKind::Saw, WaveKind::Saw]),
    );
    Voice::new(VoiceName::Seq, core, VoiceKind::Detuned(Detuned::new(1.5)))
}
