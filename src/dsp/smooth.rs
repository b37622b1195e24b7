//! Cheap two-sample smoothing filters.
//!
//! Both average the current sample with one remembered value, a gentle
//! low-pass with a zero at Nyquist. They differ in WHAT is remembered:
//!
//!   TwoPointAverage   out = (x[n] + x[n-1]) / 2      remembers the input (FIR)
//!   OnePoleAverage    out = (x[n] + y[n-1]) / 2      remembers the output (IIR)
//!
//! The mix bus uses the FIR form; the snare uses the recursive form, which
//! has a longer tail and softens the noise more.

/// `out = (input + previous_input) / 2`
#[derive(Debug, Default, Clone, Copy)]
pub struct TwoPointAverage {
    previous: f32,
}

impl TwoPointAverage {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let out = (input + self.previous) / 2.0;
        self.previous = input;
        out
    }

    pub fn reset(&mut self) {
        self.previous = 0.0;
    }
}

/// `out = (input + previous_output) / 2`
#[derive(Debug, Default, Clone, Copy)]
pub struct OnePoleAverage {
    previous: f32,
}

impl OnePoleAverage {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let out = (input + self.previous) / 2.0;
        self.previous = out;
        out
    }

    pub fn reset(&mut self) {
        self.previous = 0.0;
    }
}
