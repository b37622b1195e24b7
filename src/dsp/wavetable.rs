use std::{f32::consts::TAU, str::FromStr, sync::Arc};

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SynthError;

/*
Wavetables
==========

Instead of evaluating sin() (or any other waveform function) for every
sample, we compute one period of each waveform ONCE and store it in a table.
Oscillators then read through the table at a speed proportional to their
pitch.

Vocabulary
----------

  period      N, the number of samples describing one cycle (default 256).

  guard       One extra sample at index N, equal to index 0 for periodic
              waveforms. Linear interpolation between table[i] and
              table[i + 1] never has to wrap, because i is at most N - 1.

  bank        The four tables built at startup and shared read-only by every
              oscillator. Tables never change after construction, so they are
              shared through `Arc` without locking.


The Four Shapes
---------------

  sine     sin(2*pi*i/N)          pure tone
  sine2    sin(2*pi*i/N)^2        always >= 0, octave-up body, softer
  noise    uniform(-1, 1)         fixed random cycle; a short looped noise
                                  buffer sounds like a plucked steel string
  saw      2*(i/N) - 1            ramp from -1 to +1, bright and buzzy

Note the saw guard sample is +1.0 while saw[0] is -1.0. The oscillator wraps
its phase before reading, so the guard is only ever used to interpolate the
final rising edge; the drop back to -1.0 happens between two reads.

Only the noise table is non-deterministic. It is filled once per process
lifetime, never per note, so every noise-table oscillator loops the same
cycle.
*/

/// Waveform shapes available in the bank.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveKind {
    Sine,
    SineSquared,
    Noise,
    Saw,
}

impl WaveKind {
    pub const ALL: [WaveKind; 4] = [
        WaveKind::Sine,
        WaveKind::SineSquared,
        WaveKind::Noise,
        WaveKind::Saw,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WaveKind::Sine => "sine",
            WaveKind::SineSquared => "sine2",
            WaveKind::Noise => "noise",
            WaveKind::Saw => "saw",
        }
    }
}

impl FromStr for WaveKind {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sine" => Ok(WaveKind::Sine),
            "sine2" | "sine_squared" => Ok(WaveKind::SineSquared),
            "noise" | "steel" => Ok(WaveKind::Noise),
            "saw" | "sawtooth" => Ok(WaveKind::Saw),
            _ => Err(SynthError::UnknownWaveform(s.to_string())),
        }
    }
}

/// One period of a waveform plus the interpolation guard sample.
#[derive(Debug)]
pub struct Wavetable {
    kind: WaveKind,
    samples: Box<[f32]>,
}

impl Wavetable {
    fn build(kind: WaveKind, period: usize, mut sample: impl FnMut(usize) -> f32) -> Self {
        let samples = (0..=period).map(&mut sample).collect();
        Self { kind, samples }
    }

    pub fn kind(&self) -> WaveKind {
        self.kind
    }

    /// Samples per period (N). The table itself holds N + 1 values.
    pub fn period(&self) -> usize {
        self.samples.len() - 1
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

/// The shared, write-once set of waveform tables.
#[derive(Debug, Clone)]
pub struct WavetableBank {
    sine: Arc<Wavetable>,
    sine_squared: Arc<Wavetable>,
    noise: Arc<Wavetable>,
    saw: Arc<Wavetable>,
}

impl WavetableBank {
    /// Build all four tables with `period` samples per cycle.
    pub fn new(period: usize) -> Result<Self, SynthError> {
        Self::with_rng(period, &mut rand::thread_rng())
    }

    /// Build the bank drawing the noise table from `rng`.
    pub fn with_rng<R: Rng>(period: usize, rng: &mut R) -> Result<Self, SynthError> {
        if period < 1 {
            return Err(SynthError::InvalidTableLength(period));
        }

        let n = period as f32;
        let sine = Wavetable::build(WaveKind::Sine, period, |i| (TAU * i as f32 / n).sin());
        let sine_squared = Wavetable::build(WaveKind::SineSquared, period, |i| {
            (TAU * i as f32 / n).sin().powi(2)
        });
        let noise = Wavetable::build(WaveKind::Noise, period, |_| rng.gen_range(-1.0..1.0));
        let saw = Wavetable::build(WaveKind::Saw, period, |i| (i as f32 / n) * 2.0 - 1.0);

        Ok(Self {
            sine: Arc::new(sine),
            sine_squared: Arc::new(sine_squared),
            noise: Arc::new(noise),
            saw: Arc::new(saw),
        })
    }

    /// Shared handle to one table, for handing to an oscillator.
    pub fn table(&self, kind: WaveKind) -> Arc<Wavetable> {
        Arc::clone(self.get(kind))
    }

    pub fn get(&self, kind: WaveKind) -> &Arc<Wavetable> {
        match kind {
            WaveKind::Sine => &self.sine,
            WaveKind::SineSquared => &self.sine_squared,
            WaveKind::Noise => &self.noise,
            WaveKind::Saw => &self.saw,
        }
    }

    pub fn period(&self) -> usize {
        self.sine.period()
    }
}
