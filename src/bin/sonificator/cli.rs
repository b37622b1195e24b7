//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "sonificator")]
#[command(about = "Turns a document of tagged elements into music", long_about = None)]
pub struct Args {
    /// Element list, one `TAG [WIDTH]` per line (built-in demo if omitted)
    #[arg(value_name = "DOCUMENT")]
    pub document: Option<PathBuf>,

    /// Tempo in beats per minute (four elements per beat)
    #[arg(long, value_name = "BPM", default_value_t = 140.0)]
    pub bpm: f32,

    /// Samples rendered per engine block
    #[arg(long, value_name = "FRAMES", default_value_t = 4096)]
    pub block: usize,

    /// Keep headings from changing key
    #[arg(long)]
    pub no_key_change: bool,

    /// Wavetable resolution (samples per period)
    #[arg(long, value_name = "SAMPLES", default_value_t = sonificator::DEFAULT_TABLE_LENGTH)]
    pub table_length: usize,

    /// Render to a 16-bit WAV file instead of playing
    #[arg(long, value_name = "WAV")]
    pub render: Option<PathBuf>,

    /// Length of the rendered file
    #[arg(long, value_name = "SECONDS", default_value_t = 30.0)]
    pub seconds: f32,
}
