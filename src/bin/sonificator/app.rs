//! Sonificator - application builder, live playback and keyboard transport

use std::{
    fmt::Display,
    io::Write,
    path::Path,
    time::Duration,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};

use sonificator::{
    config::clamp_bpm,
    io::FramePump,
    sequencing::{ScheduledTriggers, Slot, TagCursor},
    synth::{control_channel, message::CONTROL_QUEUE_SIZE, ControlMessage, Controller},
    Engine, EngineConfig,
};

use super::bounce;

/// Elements skipped by the arrow keys (shift: `LARGE_SEEK`).
const SMALL_SEEK: usize = 8;
const LARGE_SEEK: usize = 64;

/// Main application builder
pub struct Sonificator {
    config: EngineConfig,
    events: Vec<Slot>,
}

impl Sonificator {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            events: Vec::new(),
        }
    }

    /// Set the tempo in beats per minute
    pub fn bpm(mut self, bpm: f32) -> Self {
        self.config.bpm = bpm;
        self
    }

    pub fn block_length(mut self, block_length: usize) -> Self {
        self.config.block_length = block_length;
        self
    }

    pub fn key_change(mut self, change_key: bool) -> Self {
        self.config.change_key = change_key;
        self
    }

    pub fn table_length(mut self, table_length: usize) -> Self {
        self.config.table_length = table_length;
        self
    }

    /// Elements to play, in order; playback loops at the end
    pub fn document(mut self, events: Vec<Slot>) -> Self {
        self.events = events;
        self
    }

    /// Render offline to a WAV file instead of playing
    pub fn bounce(self, path: &Path, seconds: f32) -> EyreResult<()> {
        bounce::render_wav(self.config, self.events, path, seconds)
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels() as usize;
        let config = self
            .config
            .with_sample_rate(sample_rate)
            .with_channels(channels);

        let mut engine = Engine::new(config.clone()).wrap_err("invalid engine configuration")?;
        let mut source = ScheduledTriggers::new(TagCursor::with_rests(self.events));
        let (elements, visible) = (source.source().len(), source.source().visible());
        let (controller, mut control_rx) = control_channel(CONTROL_QUEUE_SIZE);
        let mut pump = FramePump::new(channels, config.block_length);

        println!("=== Sonificator ===");
        println!("BPM: {}", config.bpm);
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);
        println!("Block: {} frames", config.block_length);
        println!("Elements: {} ({} hidden)", elements, elements - visible);
        println!();
        println!("[Space] play/pause  [Up/Down] tempo  [Left/Right] skip 8 (shift: 64)");
        println!("[A] back to top  [C] key change on headings  [Q/Esc] quit");
        println!();

        let stream = device.build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _| {
                engine.apply_controls(&mut control_rx, &mut source);
                // A failed block is already silent; the audio thread has nowhere to report it
                let _ = pump.fill(data, |output| engine.process_block(&mut source, output));
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;
        stream.play()?;

        terminal::enable_raw_mode().wrap_err("failed to enable raw terminal mode")?;
        let mut transport = Transport {
            controller,
            playing: true,
            bpm: config.bpm,
            change_key: config.change_key,
        };
        let result = transport.run();
        terminal::disable_raw_mode()?;
        result
    }
}

impl Default for Sonificator {
    fn default() -> Self {
        Self::new()
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Control(ControlMessage),
    Quit,
}

fn key_action(key: KeyEvent) -> Option<Action> {
    let seek = if key.modifiers.contains(KeyModifiers::SHIFT) {
        LARGE_SEEK
    } else {
        SMALL_SEEK
    };

    let message = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Action::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char(' ') => ControlMessage::TogglePlayback,
        KeyCode::Up => ControlMessage::AdjustTempo(1.0),
        KeyCode::Down => ControlMessage::AdjustTempo(-1.0),
        KeyCode::Left => ControlMessage::Rewind(seek),
        KeyCode::Right => ControlMessage::Forward(seek),
        KeyCode::Char('a') | KeyCode::Char('A') => ControlMessage::RewindToStart,
        KeyCode::Char('c') | KeyCode::Char('C') => ControlMessage::ToggleKeyChange,
        _ => return None,
    };
    Some(Action::Control(message))
}

/// Keyboard side of the transport; mirrors the engine state for display.
struct Transport {
    controller: Controller,
    playing: bool,
    bpm: f32,
    change_key: bool,
}

impl Transport {
    fn run(&mut self) -> EyreResult<()> {
        loop {
            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key_action(key) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::Control(message)) => {
                    if self.controller.send(message) {
                        self.report(message)?;
                    }
                }
                None => {}
            }
        }
    }

    fn report(&mut self, message: ControlMessage) -> EyreResult<()> {
        match message {
            ControlMessage::TogglePlayback => {
                self.playing = !self.playing;
                say(if self.playing { "Playing" } else { "Paused" })
            }
            ControlMessage::Play => {
                self.playing = true;
                say("Playing")
            }
            ControlMessage::Pause => {
                self.playing = false;
                say("Paused")
            }
            ControlMessage::AdjustTempo(delta) => {
                self.bpm = clamp_bpm(self.bpm + delta);
                say(format!("BPM: {}", self.bpm))
            }
            ControlMessage::ToggleKeyChange => {
                self.change_key = !self.change_key;
                say(format!("Change key on headings: {}", self.change_key))
            }
            ControlMessage::Rewind(count) => say(format!("Rewound {} elements", count)),
            ControlMessage::Forward(count) => say(format!("Forwarded {} elements", count)),
            ControlMessage::RewindToStart => say("Rewound to top"),
        }
    }
}

/// Print one status line; raw mode needs an explicit carriage return.
fn say(message: impl Display) -> EyreResult<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}\r\n", message)?;
    stdout.flush()?;
    Ok(())
}
