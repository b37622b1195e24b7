//! Squared-sine voice - list items and inline spans.
//!
//! sin² has no negative half, so the pair of oscillators (the second a fifth
//! above) sounds hollow and an octave up. The 0.01 sustain means the long
//! 4000-sample decay is effectively the whole note: a slow pluck.

use crate::{
    dsp::{Envelope, WaveKind, WavetableBank},
    synth::voice::{Voice, VoiceCore, VoiceKind},
    voices::{oscillators, Detuned, VoiceName},
};

/// Create the `sin2` voice.
pub fn sin2(bank: &WavetableBank, sample_rate: f32) -> Voice {
    let core = VoiceCore::new(
        Envelope::adsr(20, 4000, 0.01, Envelope::DEFAULT_RELEASE),
        oscillators(
            bank,
            sample_rate,
            &[WaveKind::SineSquared, WaveKind::SineSquared],
        ),
    );
    Voice::new(VoiceName::Sin2, core, VoiceKind::Detuned(Detuned::new(1.5)))
}
