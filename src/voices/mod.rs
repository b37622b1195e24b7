//! The five fixed voices.
//!
//! Each voice is one envelope plus two wavetable oscillators, specialised
//! through a `VoiceKind` variant. Study the files to see how each timbre is
//! built; the roster itself never changes at runtime.
//!
//! | voice | oscillators  | A/D/S/R (samples)    | character                    |
//! |-------|--------------|----------------------|------------------------------|
//! | sin   | sine, sine   | 20/2000/0.3/2000     | soft bell, fourth below      |
//! | sin2  | sine², sine² | 20/4000/0.01/2000    | hollow pluck, fifth above    |
//! | seq   | saw, saw     | 200/500/0.2/2000     | buzzy sequence, fifth above  |
//! | kick  | sine, sine²  | 30/3000/0.01/2000    | swept 180 Hz thump, clipped  |
//! | snr   | sine², saw   | 30/2000/0.01/2000    | noisy snare, clipped, soft   |
//!
//! # Example
//!
//! ```ignore
//! use sonificator::{dsp::WavetableBank, voices};
//!
//! let bank = WavetableBank::new(256)?;
//! let mut kick = voices::kick(&bank, 44_100.0);
//! kick.note_on(120.0, 1.0, 2000)?;
//! ```

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{TableOscillator, WaveKind, WavetableBank},
    synth::voice::Voice,
    SynthError,
};

mod detuned;
pub mod kick;
mod seq;
mod sin;
mod sin2;
pub mod snare;

pub use detuned::Detuned;
pub use kick::kick;
pub use seq::seq;
pub use sin::sin;
pub use sin2::sin2;
pub use snare::snr;

/// Names of the five voices, in mixing order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceName {
    Sin,
    Sin2,
    Seq,
    Kick,
    Snr,
}

impl VoiceName {
    pub const ALL: [VoiceName; 5] = [
        VoiceName::Sin,
        VoiceName::Sin2,
        VoiceName::Seq,
        VoiceName::Kick,
        VoiceName::Snr,
    ];

    /// Position in `ALL`, used to index the voice set.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoiceName::Sin => "sin",
            VoiceName::Sin2 => "sin2",
            VoiceName::Seq => "seq",
            VoiceName::Kick => "kick",
            VoiceName::Snr => "snr",
        }
    }
}

impl FromStr for VoiceName {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoiceName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SynthError::UnknownVoice(s.to_string()))
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the named voice.
pub fn build(name: VoiceName, bank: &WavetableBank, sample_rate: f32) -> Voice {
    match name {
        VoiceName::Sin => sin(bank, sample_rate),
        VoiceName::Sin2 => sin2(bank, sample_rate),
        VoiceName::Seq => seq(bank, sample_rate),
        VoiceName::Kick => kick(bank, sample_rate),
        VoiceName::Snr => snr(bank, sample_rate),
    }
}

fn oscillators(bank: &WavetableBank, sample_rate: f32, kinds: &[WaveKind]) -> Vec<TableOscillator> {
    kinds
        .iter()
        .map(|&kind| TableOscillator::new(bank.table(kind), sample_rate))
        .collect()
}
