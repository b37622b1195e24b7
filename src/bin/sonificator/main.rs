//! sonificator - play a document of tagged elements as music
//!
//! Run with: cargo run -- page.txt
//! Bounce:   cargo run -- page.txt --render page.wav --seconds 30

mod app;
mod bounce;
mod cli;
mod document;

use clap::Parser;

use app::Sonificator;
use cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Args::parse();
    let events = match &args.document {
        Some(path) => document::load(path)?,
        None => document::demo(),
    };

    let app = Sonificator::new()
        .bpm(args.bpm)
        .block_length(args.block)
        .key_change(!args.no_key_change)
        .table_length(args.table_length)
        .document(events);

    match &args.render {
        Some(path) => app.bounce(path, args.seconds),
        None => app.run(),
    }
}
