//! Kick drum voice - links.
//!
//! A sine body at a fixed 180 Hz with a sine² partial three times the
//! played pitch, both sweeping downward every sample while the drum sounds.
//! The output is driven x2.3 into a hard clip, squaring off the loud start
//! of the hit.
//!
//! # How It Works
//!
//! 1. note_on ignores the requested pitch for the body: always 180 Hz,
//!    always a 10000-sample note
//! 2. The second oscillator still tracks the element (pitch x3), so links
//!    inside wide blocks click higher
//! 3. Every sample the body drops x0.9998 and the partial x0.9994: a slow
//!    exponential pitch fall, roughly an octave per 3500 samples for the body
//! 4. Drive and hard clip at +-1.0

use crate::{
    dsp::{distortion::hard_clip, oscillator::check_frequency, Envelope, WaveKind, WavetableBank},
    synth::voice::{Voice, VoiceCore, VoiceKind},
    voices::{oscillators, VoiceName},
    SynthError,
};

pub const KICK_PITCH: f32 = 180.0;
pub const KICK_NOTE_LENGTH: u32 = 10_000;
const KICK_DRIVE: f32 = 2.3;

/// Per-sample pitch sweep applied to the kick's two oscillators.
#[derive(Debug, Clone, Copy)]
pub struct KickSweep {
    body_ratio: f32,
    partial_ratio: f32,
}

impl Default for KickSweep {
    fn default() -> Self {
        Self {
            body_ratio: 0.9998,
            partial_ratio: 0.9994,
        }
    }
}

impl KickSweep {
    pub(crate) fn note_on(
        &mut self,
        core: &mut VoiceCore,
        pitch: f32,
        volume: f32,
        _length: u32,
    ) -> Result<(), SynthError> {
        let partial = check_frequency(pitch * 3.0)?;
        core.note_on(KICK_PITCH, volume, KICK_NOTE_LENGTH)?;
        if let Some(osc) = core.oscillator_mut(1) {
            osc.set_frequency(partial)?;
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn next_sample(&mut self, core: &mut VoiceCore) -> f32 {
        // Sweep only while sounding; an idle kick is retuned by its next note_on
        if core.is_sounding() {
            if let Some(body) = core.oscillator_mut(0) {
                body.detune(self.body_ratio);
            }
            if let Some(partial) = core.oscillator_mut(1) {
                partial.detune(self.partial_ratio);
            }
        }

        hard_clip(core.next_sample(), KICK_DRIVE, 1.0)
    }
}

/// Create the `kick` voice.
pub fn kick(bank: &WavetableBank, sample_rate: f32) -> Voice {
    let core = VoiceCore::new(
        Envelope::adsr(30, 3000, 0.01, Envelope::DEFAULT_RELEASE),
        oscillators(bank, sample_rate, &[WaveKind::Sine, WaveKind::SineSquared]),
    );
    Voice::new(VoiceName::Kick, core, VoiceKind::Kick(KickSweep::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::tests::test_bank;

    #[test]
    fn body_is_fixed_and_partial_tracks_pitch() {
        let mut voice = kick(&test_bank(), 44_100.0);
        voice.note_on(100.0, 1.0, 2000).unwrap();

        let oscs = voice.core().oscillators();
        assert_eq!(oscs[0].frequency(), KICK_PITCH);
        assert_eq!(oscs[1].frequency(), 300.0);
    }

    #[test]
    fn note_length_is_forced() {
        let mut voice = kick(&test_bank(), 44_100.0);
        voice.note_on(100.0, 1.0, 10).unwrap();
        for _ in 0..5000 {
            voice.next_sample();
        }
        assert!(voice.core().envelope().is_noting());
    }

    #[test]
    fn pitch_sweeps_downward() {
        let mut voice = kick(&test_bank(), 44_100.0);
        voice.note_on(100.0, 1.0, 2000).unwrap();
        voice.next_sample();

        let oscs = voice.core().oscillators();
        assert!((oscs[0].frequency() - KICK_PITCH * 0.9998).abs() < 1e-3);
        assert!((oscs[1].frequency() - 300.0 * 0.9994).abs() < 1e-3);

        for _ in 0..1000 {
            voice.next_sample();
        }
        let swept = voice.core().oscillators()[0].frequency();
        assert!(swept < KICK_PITCH * 0.83 && swept > KICK_PITCH * 0.81);
    }

    #[test]
    fn output_is_clipped_to_unit_range() {
        let mut voice = kick(&test_bank(), 44_100.0);
        voice.note_on(100.0, 1.0, 2000).unwrap();
        let mut hit_ceiling = false;
        for _ in 0..20_000 {
            let sample = voice.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
            hit_ceiling |= sample.abs() == 1.0;
        }
        assert!(hit_ceiling, "drive should push the attack into the clipper");
    }
}
