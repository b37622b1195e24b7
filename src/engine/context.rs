use crate::{
    config::{clamp_bpm, validate_bpm},
    dsp::WavetableBank,
    sequencing::clock::samples_per_tick,
    EngineConfig, SynthError, MIN_BPM,
};

/// Fraction of a beat the mix bus echo lags behind the dry signal.
pub const DELAY_BEATS: f32 = 0.75;

/// Everything the engine reads while rendering: fixed format, the shared
/// wavetables, and the two tunables a control surface may change.
#[derive(Debug, Clone)]
pub struct EngineContext {
    sample_rate: f32,
    channels: usize,
    block_length: usize,
    bank: WavetableBank,
    bpm: f32,
    change_key: bool,
}

impl EngineContext {
    /// Validate `config` and build the wavetable bank.
    pub fn new(config: &EngineConfig) -> Result<Self, SynthError> {
        config.validate()?;
        let bank = WavetableBank::new(config.table_length)?;
        Ok(Self::from_parts(config, bank))
    }

    /// Validate `config` and use an existing bank (reproducible noise).
    pub fn with_bank(config: &EngineConfig, bank: WavetableBank) -> Result<Self, SynthError> {
        config.validate()?;
        Ok(Self::from_parts(config, bank))
    }

    fn from_parts(config: &EngineConfig, bank: WavetableBank) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: config.channels,
            block_length: config.block_length,
            bank,
            bpm: config.bpm,
            change_key: config.change_key,
        }
    }

    pub fn set_bpm(&mut self, bpm: f32) -> Result<(), SynthError> {
        self.bpm = validate_bpm(bpm)?;
        Ok(())
    }

    /// Nudge the tempo, clamping to the supported range. Returns the new tempo.
    pub fn adjust_bpm(&mut self, delta: f32) -> f32 {
        self.bpm = clamp_bpm(self.bpm + delta);
        self.bpm
    }

    pub fn set_change_key(&mut self, change_key: bool) {
        self.change_key = change_key;
    }

    /// Returns the new setting.
    pub fn toggle_key_change(&mut self) -> bool {
        self.change_key = !self.change_key;
        self.change_key
    }

    /// Echo length in samples at the current tempo.
    pub fn delay_length(&self) -> usize {
        delay_length(self.sample_rate, self.bpm)
    }

    /// Echo length at the slowest tempo; the delay line's capacity.
    pub fn max_delay_length(&self) -> usize {
        delay_length(self.sample_rate, MIN_BPM)
    }

    pub fn samples_per_tick(&self) -> f64 {
        samples_per_tick(self.sample_rate, self.bpm)
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn block_length(&self) -> usize {
        self.block_length
    }

    pub fn bank(&self) -> &WavetableBank {
        &self.bank
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn change_key(&self) -> bool {
        self.change_key
    }
}

/// `floor(sample_rate * 60 / bpm * 0.75)`, at least one sample.
pub fn delay_length(sample_rate: f32, bpm: f32) -> usize {
    let samples = sample_rate as f64 * 60.0 / bpm as f64 * DELAY_BEATS as f64;
    (samples.floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_BPM;

    #[test]
    fn derived_lengths_at_default_tempo() {
        let ctx = EngineContext::new(&EngineConfig::default()).unwrap();
        assert_eq!(ctx.delay_length(), 14_175);
        assert_eq!(ctx.samples_per_tick(), 4725.0);
        assert_eq!(ctx.max_delay_length(), 99_225);
        assert_eq!(ctx.bank().period(), 256);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = EngineConfig::default().with_channels(0);
        assert_eq!(
            EngineContext::new(&config).map(|_| ()),
            Err(SynthError::InvalidChannels(0))
        );
    }

    #[test]
    fn tempo_setters() {
        let mut ctx = EngineContext::new(&EngineConfig::default()).unwrap();
        assert_eq!(ctx.set_bpm(0.0), Err(SynthError::InvalidTempo(0.0)));
        assert_eq!(ctx.bpm(), 140.0);

        ctx.set_bpm(120.0).unwrap();
        assert_eq!(ctx.delay_length(), 16_537);

        assert_eq!(ctx.adjust_bpm(10_000.0), MAX_BPM);
        assert_eq!(ctx.adjust_bpm(-10_000.0), MIN_BPM);
        assert!(ctx.delay_length() <= ctx.max_delay_length());
    }

    #[test]
    fn key_change_toggles() {
        let mut ctx = EngineContext::new(&EngineConfig::default()).unwrap();
        assert!(ctx.change_key());
        assert!(!ctx.toggle_key_change());
        assert!(ctx.toggle_key_change());
    }
}
