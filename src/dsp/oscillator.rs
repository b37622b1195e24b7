use std::sync::Arc;

use crate::{dsp::wavetable::Wavetable, SynthError};

/*
Wavetable Oscillator
====================

A phase accumulator walking through one shared wavetable.

  phase   Position inside the table, in table samples: 0.0 <= phase < N.
  step    How far the phase moves per output sample:

              step = N / (sample_rate / frequency)

          sample_rate / frequency is the period in output samples, so after
          that many steps the phase has travelled exactly N: one cycle.

Each call advances first, wraps, then reads:

    phase += step
    phase  = phase mod N          (exact float remainder, 0 <= phase < N)
    i      = floor(phase)         (0 <= i <= N - 1)
    frac   = phase - i
    out    = table[i] + (table[i + 1] - table[i]) * frac

Because i never exceeds N - 1, table[i + 1] always lands on a real sample or
the guard sample. Changing frequency only changes step, so the waveform stays
phase-continuous across pitch changes (the kick's pitch sweep relies on this).
*/

/// Phase-accumulating reader over one shared wavetable.
pub struct TableOscillator {
    table: Arc<Wavetable>,
    sample_rate: f32,
    frequency: f32,
    phase: f32,
    step: f32,
}

const DEFAULT_FREQUENCY: f32 = 440.0;

impl TableOscillator {
    pub fn new(table: Arc<Wavetable>, sample_rate: f32) -> Self {
        let mut osc = Self {
            table,
            sample_rate,
            frequency: DEFAULT_FREQUENCY,
            phase: 0.0,
            step: 0.0,
        };
        osc.apply_frequency(DEFAULT_FREQUENCY);
        osc
    }

    /// Retune the oscillator. Returns the applied frequency.
    pub fn set_frequency(&mut self, frequency: f32) -> Result<f32, SynthError> {
        let frequency = check_frequency(frequency)?;
        self.apply_frequency(frequency);
        Ok(frequency)
    }

    /// Multiply the current frequency by a positive ratio.
    ///
    /// Infallible so it can run every sample; a positive ratio keeps the
    /// frequency positive.
    #[inline]
    pub fn detune(&mut self, ratio: f32) {
        debug_assert!(ratio > 0.0);
        self.apply_frequency(self.frequency * ratio);
    }

    #[inline]
    fn apply_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.step = self.table.period() as f32 / (self.sample_rate / frequency);
    }

    /// Advance one sample and return the interpolated table value.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let period = self.table.period() as f32;

        self.phase += self.step;
        if self.phase >= period {
            self.phase %= period;
        }

        let index = self.phase as usize;
        let frac = self.phase - index as f32;
        let samples = self.table.samples();
        debug_assert!(index + 1 < samples.len());

        let a = samples[index];
        let b = samples[index + 1];
        a + (b - a) * frac
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn table(&self) -> &Wavetable {
        &self.table
    }
}

/// Accept only finite, strictly positive frequencies.
pub fn check_frequency(frequency: f32) -> Result<f32, SynthError> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(frequency)
    } else {
        Err(SynthError::InvalidFrequency(frequency))
    }
}
