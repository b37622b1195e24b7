/// Sixteenth-note tick grid measured in samples.
///
/// `phase` is the offset of the next tick from the start of the current
/// block. It is fractional, so rounding never accumulates: a tick lands at
/// `floor(phase)` and the remainder carries into the next block.
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    phase: f64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `on_tick` with the offset of every tick inside a block of
    /// `block_length` samples, then move the phase past the block.
    ///
    /// `samples_per_tick` below one is raised to one so offsets never repeat.
    pub fn advance(
        &mut self,
        block_length: usize,
        samples_per_tick: f64,
        mut on_tick: impl FnMut(usize),
    ) {
        let spacing = samples_per_tick.max(1.0);
        let length = block_length as f64;

        while self.phase < length {
            on_tick(self.phase as usize);
            self.phase += spacing;
        }
        self.phase -= length;
    }

    /// Offset of the next tick relative to the next block.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Put the next tick at the start of the next block.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// `sample_rate * 60 / (bpm * 4)`: one tick per sixteenth note.
pub fn samples_per_tick(sample_rate: f32, bpm: f32) -> f64 {
    sample_rate as f64 * 60.0 / (bpm as f64 * 4.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(clock: &mut TickClock, block: usize, spt: f64) -> Vec<usize> {
        let mut offsets = Vec::new();
        clock.advance(block, spt, |offset| offsets.push(offset));
        offsets
    }

    #[test]
    fn spacing_at_140_bpm() {
        assert_eq!(samples_per_tick(44_100.0, 140.0), 4725.0);
    }

    #[test]
    fn first_tick_is_at_block_start() {
        let mut clock = TickClock::new();
        assert_eq!(ticks(&mut clock, 4096, 4725.0), vec![0]);
        assert_eq!(ticks(&mut clock, 4096, 4725.0), vec![629]);
        // 629 + 4725 - 4096 = 1258
        assert_eq!(ticks(&mut clock, 4096, 4725.0), vec![1258]);
    }

    #[test]
    fn fractional_phase_carries_across_blocks() {
        let spt = 100.25;
        let mut clock = TickClock::new();
        let mut absolute = Vec::new();
        for block in 0..10 {
            for offset in ticks(&mut clock, 64, spt) {
                absolute.push(block * 64 + offset);
            }
        }
        let expected: Vec<usize> = (0..absolute.len())
            .map(|n| (n as f64 * spt) as usize)
            .collect();
        assert_eq!(absolute, expected);
    }

    #[test]
    fn several_ticks_per_block() {
        let mut clock = TickClock::new();
        assert_eq!(ticks(&mut clock, 1000, 300.0), vec![0, 300, 600, 900]);
        assert_eq!(clock.phase(), 200.0);

        clock.reset();
        assert_eq!(ticks(&mut clock, 10, 0.0), (0..10).collect::<Vec<_>>());
    }
}
