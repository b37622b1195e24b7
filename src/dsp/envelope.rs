/*
Sample-Counted ADSR Envelope
============================

A linear ADSR envelope whose segment lengths are given in SAMPLES, not
seconds. Every segment moves the amplitude by a constant per-sample step;
there are no exponential curves anywhere.

Vocabulary
----------

  amplitude   The envelope's current output value. It multiplies the
              oscillator mix.

  noting      The gate: true from note_on until note_off (or auto-off).

  sounding    True while audio is still emitted, including the release tail.
              A voice that is not sounding outputs exactly 0.0 and does not
              advance its oscillators.

  duration    Samples elapsed since note_on. Selects the segment.

  length      Auto-off point: once duration reaches it, note_off fires.


The Shape
---------

  Amplitude
   vol ┐     ╱╲
       │    ╱  ╲
       │   ╱    ╲____________ <- frozen, wherever decay left it
       │  ╱                  ╲
   0.0 └─╱────────────────────╲──→ samples
         attack decay  sustain  release
                              ^
                              note_off / auto-off at `length`

  attack_step  = (volume - amplitude) / attack    computed at note_on
  decay_step   = (1 - sustain) / decay            computed at note_on
  release_step = amplitude / release              computed at note_off

The attack starts from the CURRENT amplitude, so retriggering a sounding
voice ramps smoothly from where it was instead of clicking to zero. Decay
always drops by (1 - sustain) in total; for a full-volume note that lands
exactly on the sustain level.


The Sustain Segment
-------------------

There is no explicit "hold at sustain level" branch. Once attack + decay
samples have elapsed the amplitude is simply not touched any more, so it
freezes at whatever value decay produced. This is the sustain behaviour.


The State Machine
-----------------

  Idle ──note_on──→ Attack ──(attack samples)──→ Decay ──(decay samples)──→ Sustain
    ↑                  │                           │                          │
    │                  └────────note_off / auto-off┴──────────────────────────┘
    │                                       ↓
    └────────(amplitude < 0)─────────── Release

Stages are derived from (sounding, noting, duration); nothing stores them.
*/

/// Envelope stage, derived from the gate flags and elapsed samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    // Shape (samples / level), fixed per voice
    attack: u32,
    decay: u32,
    sustain: f32,
    release: u32,

    // Runtime state
    amplitude: f32,
    noting: bool,
    sounding: bool,
    duration: u32,
    length: u32,

    // Per-sample increments, refreshed at note_on / note_off
    attack_step: f32,
    decay_step: f32,
    release_step: f32,
}

impl Envelope {
    pub const DEFAULT_ATTACK: u32 = 200;
    pub const DEFAULT_DECAY: u32 = 500;
    pub const DEFAULT_SUSTAIN: f32 = 0.2;
    pub const DEFAULT_RELEASE: u32 = 2000;

    pub fn new() -> Self {
        Self::adsr(
            Self::DEFAULT_ATTACK,
            Self::DEFAULT_DECAY,
            Self::DEFAULT_SUSTAIN,
            Self::DEFAULT_RELEASE,
        )
    }

    /// Segment lengths in samples; zero lengths are raised to one sample.
    pub fn adsr(attack: u32, decay: u32, sustain: f32, release: u32) -> Self {
        Self {
            attack: attack.max(1),
            decay: decay.max(1),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(1),

            amplitude: 0.0,
            noting: false,
            sounding: false,
            duration: 0,
            length: 0,

            attack_step: 0.0,
            decay_step: 0.0,
            release_step: 0.0,
        }
    }

    /// Gate high: (re)start the attack from the current amplitude.
    pub fn note_on(&mut self, volume: f32, length: u32) {
        self.noting = true;
        self.sounding = true;
        self.duration = 0;
        self.attack_step = (volume - self.amplitude) / self.attack as f32;
        self.decay_step = (1.0 - self.sustain) / self.decay as f32;
        self.length = length;
    }

    /// Gate low: ramp from the current amplitude to zero over `release`.
    pub fn note_off(&mut self) {
        self.noting = false;
        self.release_step = self.amplitude / self.release as f32;
    }

    /// Advance one sample and return the new amplitude.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if !self.sounding {
            return 0.0;
        }

        if !self.noting {
            self.amplitude -= self.release_step;
            if self.amplitude < 0.0 {
                self.amplitude = 0.0;
                self.sounding = false;
            }
        } else if self.duration < self.attack {
            self.amplitude += self.attack_step;
        } else if self.duration < self.attack + self.decay {
            self.amplitude -= self.decay_step;
        }
        // else: sustain, amplitude left untouched

        self.duration = self.duration.saturating_add(1);
        if self.noting && self.duration >= self.length {
            self.note_off();
        }

        self.amplitude
    }

    /// Render a block of amplitude values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn stage(&self) -> EnvelopeStage {
        if !self.sounding {
            EnvelopeStage::Idle
        } else if !self.noting {
            EnvelopeStage::Release
        } else if self.duration < self.attack {
            EnvelopeStage::Attack
        } else if self.duration < self.attack + self.decay {
            EnvelopeStage::Decay
        } else {
            EnvelopeStage::Sustain
        }
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn is_noting(&self) -> bool {
        self.noting
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    /// Samples since the last note_on.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn decay(&self) -> u32 {
        self.decay
    }

    pub fn sustain(&self) -> f32 {
        self.sustain
    }

    pub fn release(&self) -> u32 {
        self.release
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
