//! Sine voice - the default voice for unclassified elements.
//!
//! Two sine oscillators, the second a fourth below the played pitch (x0.75).
//! A 20-sample attack gives a soft click, then a long decay settles onto a
//! fairly high 0.3 sustain, so held notes ring like a struck bell.

use crate::{
    dsp::{Envelope, WaveKind, WavetableBank},
    synth::voice::{Voice, VoiceCore, VoiceKind},
    voices::{oscillators, Detuned, VoiceName},
};

/// Create the `sin` voice.
pub fn sin(bank: &WavetableBank, sample_rate: f32) -> Voice {
    let core = VoiceCore::new(
        Envelope::adsr(20, 2000, 0.3, Envelope::DEFAULT_RELEASE),
        oscillators(bank, sample_rate, &[WaveKind::Sine, WaveKind::Sine]),
    );
    Voice::new(VoiceName::Sin, core, VoiceKind::Detuned(Detuned::new(0.75)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::tests::test_bank;

    #[test]
    fn second_oscillator_sits_a_fourth_below() {
        let mut voice = sin(&test_bank(), 44_100.0);
        voice.note_on(200.0, 1.0, 2000).unwrap();

        let oscs = voice.core().oscillators();
        assert_eq!(oscs[0].frequency(), 200.0);
        assert_eq!(oscs[1].frequency(), 150.0);
    }

    #[test]
    fn envelope_matches_voice_table() {
        let voice = sin(&test_bank(), 44_100.0);
        let env = voice.core().envelope();
        assert_eq!((env.attack(), env.decay(), env.release()), (20, 2000, 2000));
        assert_eq!(env.sustain(), 0.3);
    }
}
