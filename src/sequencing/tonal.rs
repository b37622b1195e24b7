/*
Tonal Sequencer
===============

Turns each incoming tag into a note request and slowly reshapes the harmony
so long runs of similar elements do not drone on one pitch.

Vocabulary
----------

  base        The current key: freq1_base (melody) and freq2_base, a fifth
              above. Heading tags move the key when key change is enabled.

  freq1/2     The active frequencies. Repetition pushes them upward; any
              non-repeating tag snaps them back to the bases.

  cont        Repetition counter, incremented while a rule keeps matching
              and zeroed on the first tag that matches none.

  feedback    Gain of the mix bus delay line. Repetition nudges it up, a
              break resets it to 0.2, and it is never allowed above 0.9.


Per Event
---------

  1. key change      H1 -> base * 4/3, H2 -> base * 2^(10/12); the second
                     base follows at x1.5 and each base above 100 Hz is halved
  2. voice choice    from the tag class (see TagClass::voices)
  3. repetition      first matching rule wins (t-k = tag k events ago):

       rule          match                 freq1 step        freq2 step        feedback
       run           tag = t-1 = t-2 = t-3  cont%8==1: x1.5   cont%6==1: x1.5   x1.010
                                            > 20000: base     > 10000: base
       alternation   tag = t-2 = t-4        cont%6==1: x1.5   cont%8==1: x2.0   x1.013
                                            > 12000: base     > 24000: base
       cycle of 3    tag = t-3 = t-6        cont%6==1: x2.0   cont%4==1: x2.0   x1.018
                                            > 20000: base     > 20000: base
       none          -                      freq1 = base      freq2 = base      = 0.2
                                            cont = 0

  4. push the tag into the history
  5. clamp feedback to 0.9
  6. note: pitch = freq1 * (floor(width / 90) + 1), volume 1.0, 2000 samples

Ceilings are checked on every match of their rule, whether or not the
modulus step fired. The modulus tests fire on the FIRST repeat after a reset (cont = 1), and
then every K repeats after that (cont = K + 1, 2K + 1, ...). Wider elements
play higher harmonics of freq1.
*/

use crate::voices::VoiceName;

use super::{
    history::TagHistory,
    tag::{Tag, TagEvent},
};

pub const INITIAL_BASE: f32 = 61.875;
pub const FIFTH: f32 = 1.5;
pub const KEY_CEILING: f32 = 100.0;
pub const INITIAL_FEEDBACK: f32 = 0.45;
pub const RESET_FEEDBACK: f32 = 0.2;
pub const MAX_FEEDBACK: f32 = 0.9;
pub const WIDTH_STEP: f32 = 90.0;
pub const NOTE_VOLUME: f32 = 1.0;
pub const NOTE_LENGTH: u32 = 2000;

/// One frequency update inside a repetition rule.
#[derive(Debug, Clone, Copy)]
struct FrequencyStep {
    modulus: u64,
    factor: f32,
    ceiling: f32,
}

impl FrequencyStep {
    /// The ceiling is checked on every match, stepped or not: a frequency
    /// grown under another rule may already sit above this one's cap.
    fn apply(&self, cont: u64, frequency: &mut f32, base: f32) {
        if cont % self.modulus == 1 {
            *frequency *= self.factor;
        }
        if *frequency > self.ceiling {
            *frequency = base;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RepetitionRule {
    lags: &'static [usize],
    freq1: FrequencyStep,
    freq2: FrequencyStep,
    feedback: f32,
}

const fn step(modulus: u64, factor: f32, ceiling: f32) -> FrequencyStep {
    FrequencyStep {
        modulus,
        factor,
        ceiling,
    }
}

// Priority order
const RULES: [RepetitionRule; 3] = [
    RepetitionRule {
        lags: &[1, 2, 3],
        freq1: step(8, 1.5, 20_000.0),
        freq2: step(6, 1.5, 10_000.0),
        feedback: 1.01,
    },
    RepetitionRule {
        lags: &[2, 4],
        freq1: step(6, 1.5, 12_000.0),
        freq2: step(8, 2.0, 24_000.0),
        feedback: 1.013,
    },
    RepetitionRule {
        lags: &[3, 6],
        freq1: step(6, 2.0, 20_000.0),
        freq2: step(4, 2.0, 20_000.0),
        feedback: 1.018,
    },
];

/// What the sequencer wants played for one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteRequest {
    pub voices: &'static [VoiceName],
    pub pitch: f32,
    pub volume: f32,
    pub length: u32,
}

/// Key, repetition and feedback state driven by the tag stream.
#[derive(Debug, Clone)]
pub struct TonalSequencer {
    freq1_base: f32,
    freq2_base: f32,
    freq1: f32,
    freq2: f32,
    feedback: f32,
    history: TagHistory,
    cont: u64,
}

impl TonalSequencer {
    pub fn new() -> Self {
        let freq2_base = INITIAL_BASE * FIFTH;
        Self {
            freq1_base: INITIAL_BASE,
            freq2_base,
            freq1: INITIAL_BASE,
            freq2: freq2_base,
            feedback: INITIAL_FEEDBACK,
            history: TagHistory::new(),
            cont: 0,
        }
    }

    /// Advance the state machine by one event and return the note to play.
    pub fn step(&mut self, event: &TagEvent, change_key: bool) -> NoteRequest {
        let tag = event.tag();
        let class = tag.class();

        if change_key {
            if let Some(ratio) = class.key_ratio() {
                self.change_key(ratio);
            }
        }

        self.apply_repetition(tag);
        self.history.push(tag);
        self.feedback = self.feedback.min(MAX_FEEDBACK);

        NoteRequest {
            voices: class.voices(),
            pitch: self.freq1 * harmonic(event.width()),
            volume: NOTE_VOLUME,
            length: NOTE_LENGTH,
        }
    }

    fn change_key(&mut self, ratio: f32) {
        self.freq1_base *= ratio;
        self.freq2_base = self.freq1_base * FIFTH;
        if self.freq1_base > KEY_CEILING {
            self.freq1_base /= 2.0;
        }
        if self.freq2_base > KEY_CEILING {
            self.freq2_base /= 2.0;
        }
    }

    fn apply_repetition(&mut self, tag: Tag) {
        match RULES.iter().find(|rule| self.history.repeats(tag, rule.lags)) {
            Some(rule) => {
                self.cont += 1;
                rule.freq1.apply(self.cont, &mut self.freq1, self.freq1_base);
                rule.freq2.apply(self.cont, &mut self.freq2, self.freq2_base);
                self.feedback *= rule.feedback;
            }
            None => {
                self.cont = 0;
                self.freq1 = self.freq1_base;
                self.freq2 = self.freq2_base;
                self.feedback = RESET_FEEDBACK;
            }
        }
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn freq1(&self) -> f32 {
        self.freq1
    }

    pub fn freq2(&self) -> f32 {
        self.freq2
    }

    pub fn bases(&self) -> (f32, f32) {
        (self.freq1_base, self.freq2_base)
    }

    /// Repetition counter.
    pub fn repeats(&self) -> u64 {
        self.cont
    }

    pub fn history(&self) -> &TagHistory {
        &self.history
    }
}

impl Default for TonalSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// `floor(width / 90) + 1`: wider elements play higher harmonics.
#[inline]
fn harmonic(width: f32) -> f32 {
    (width / WIDTH_STEP).floor() + 1.0
}
