//! Element documents.
//!
//! One element per line: a tag name and an optional rendered width,
//!
//! ```text
//! # comment
//! h1 640
//! p
//! img 320
//! ```
//!
//! Width defaults to 90 (the first harmonic step). Elements with no visible
//! width stay in the document as rests: they take a tick and count when
//! seeking. Blank lines and comments are skipped.

use std::path::Path;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use sonificator::{
    sequencing::{Slot, TagEvent},
    SynthError,
};

pub const DEFAULT_WIDTH: f32 = 90.0;

pub fn load(path: &Path) -> EyreResult<Vec<Slot>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read document {}", path.display()))?;
    let slots = parse(&text).wrap_err_with(|| format!("in {}", path.display()))?;
    let visible = slots.iter().flatten().count();
    if visible == 0 {
        return Err(eyre!("{} has no visible elements", path.display()));
    }
    log::info!(
        "loaded {} elements ({} hidden) from {}",
        slots.len(),
        slots.len() - visible,
        path.display()
    );
    Ok(slots)
}

pub fn parse(text: &str) -> EyreResult<Vec<Slot>> {
    let mut slots = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(tag), width, None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(eyre!("line {}: expected `TAG [WIDTH]`, got {:?}", number + 1, line));
        };
        let width = match width {
            Some(width) => width
                .parse::<f32>()
                .wrap_err_with(|| format!("line {}: bad width {:?}", number + 1, width))?,
            None => DEFAULT_WIDTH,
        };

        match TagEvent::new(tag, width) {
            Ok(event) => slots.push(Some(event)),
            Err(SynthError::InvalidWidth(width)) => {
                log::debug!("line {}: {} is hidden (width {}), resting", number + 1, tag, width);
                slots.push(None);
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(slots)
}

/// A small page: heading, paragraphs, a list, a gallery and a footer.
pub fn demo() -> Vec<Slot> {
    const PAGE: &[(&str, f32)] = &[
        ("h1", 640.0),
        ("div", 960.0),
        ("p", 90.0),
        ("a", 60.0),
        ("p", 180.0),
        ("span", 40.0),
        ("script", 0.0),
        ("h2", 480.0),
        ("ul", 600.0),
        ("li", 200.0),
        ("li", 200.0),
        ("li", 200.0),
        ("li", 200.0),
        ("div", 960.0),
        ("img", 320.0),
        ("img", 320.0),
        ("div", 960.0),
        ("img", 320.0),
        ("a", 60.0),
        ("a", 60.0),
        ("a", 60.0),
        ("a", 60.0),
        ("h2", 480.0),
        ("p", 270.0),
        ("span", 40.0),
        ("p", 270.0),
        ("span", 40.0),
        ("p", 270.0),
        ("footer", 960.0),
    ];

    PAGE.iter()
        .map(|&(tag, width)| TagEvent::new(tag, width).ok())
        .collect()
}
