use crate::dsp::{delay::FeedbackDelay, smooth::TwoPointAverage};

/// Smoothing and feedback echo applied to the summed voices.
///
/// `raw -> (raw + previous raw) / 2 -> + delayed * feedback -> out`
///
/// The delay line is sized once for the slowest tempo; the per-block length
/// only changes the modulus.
pub struct MixBus {
    smoother: TwoPointAverage,
    delay: FeedbackDelay,
}

impl MixBus {
    pub fn new(max_delay_length: usize) -> Self {
        Self {
            smoother: TwoPointAverage::new(),
            delay: FeedbackDelay::new(max_delay_length),
        }
    }

    #[inline]
    pub fn next_sample(&mut self, raw: f32, feedback: f32, delay_length: usize) -> f32 {
        let smoothed = self.smoother.next_sample(raw);
        self.delay.next_sample(smoothed, feedback, delay_length)
    }

    pub fn delay(&self) -> &FeedbackDelay {
        &self.delay
    }

    pub fn reset(&mut self) {
        self.smoother.reset();
        self.delay.reset();
    }
}
