//! Snare voice - images.
//!
//! A sine² body an octave above the played pitch, a saw partial at three
//! times the pitch, and white noise scaled by the envelope for the rattle.
//!
//! # How It Works
//!
//! 1. note_on doubles the pitch for the body and forces full volume and a
//!    2000-sample note
//! 2. Each sample: body + uniform(0, 1) * amplitude * 0.4 of noise
//! 3. Drive x1.3 into a hard clip at +-0.8
//! 4. A recursive two-sample average (private to this voice) rounds off the
//!    noise so it hisses rather than crackles
//!
//! The noise is only ever positive, so the rattle also pushes the waveform
//! upward; the clipper catches most of that.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    dsp::{
        distortion::hard_clip, oscillator::check_frequency, smooth::OnePoleAverage, Envelope,
        WaveKind, WavetableBank,
    },
    synth::voice::{Voice, VoiceCore, VoiceKind},
    voices::{oscillators, VoiceName},
    SynthError,
};

pub const SNARE_NOTE_LENGTH: u32 = 2000;
const NOISE_LEVEL: f32 = 0.4;
const SNARE_DRIVE: f32 = 1.3;
const SNARE_CEILING: f32 = 0.8;

/// Noise source and smoothing state owned by the snare.
pub struct SnareBody {
    rng: SmallRng,
    filter: OnePoleAverage,
}

impl SnareBody {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            filter: OnePoleAverage::new(),
        }
    }

    pub(crate) fn note_on(
        &mut self,
        core: &mut VoiceCore,
        pitch: f32,
        _volume: f32,
        _length: u32,
    ) -> Result<(), SynthError> {
        let body = check_frequency(pitch * 2.0)?;
        let partial = check_frequency(pitch * 3.0)?;
        core.note_on(body, 1.0, SNARE_NOTE_LENGTH)?;
        if let Some(osc) = core.oscillator_mut(1) {
            osc.set_frequency(partial)?;
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn next_sample(&mut self, core: &mut VoiceCore) -> f32 {
        let mut sample = core.next_sample();
        sample += self.rng.gen::<f32>() * core.amplitude() * NOISE_LEVEL;
        let sample = hard_clip(sample, SNARE_DRIVE, SNARE_CEILING);
        self.filter.next_sample(sample)
    }
}

/// Create the `snr` voice with an entropy-seeded noise source.
pub fn snr(bank: &WavetableBank, sample_rate: f32) -> Voice {
    snr_with_rng(bank, sample_rate, SmallRng::from_entropy())
}

/// Create the `snr` voice with a caller-supplied noise source.
pub fn snr_with_rng(bank: &WavetableBank, sample_rate: f32, rng: SmallRng) -> Voice {
    let core = VoiceCore::new(
        Envelope::adsr(30, 2000, 0.01, Envelope::DEFAULT_RELEASE),
        oscillators(bank, sample_rate, &[WaveKind::SineSquared, WaveKind::Saw]),
    );
    Voice::new(VoiceName::Snr, core, VoiceKind::Snare(SnareBody::new(rng)))
}
