//! Offline rendering to WAV.

use std::path::Path;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use hound::{SampleFormat, WavSpec, WavWriter};

use sonificator::{
    sequencing::{ScheduledTriggers, Slot, TagCursor},
    Engine, EngineConfig,
};

/// Render `seconds` of the document to a 16-bit WAV at `path`.
pub fn render_wav(
    config: EngineConfig,
    events: Vec<Slot>,
    path: &Path,
    seconds: f32,
) -> EyreResult<()> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(eyre!("render length must be positive, got {} s", seconds));
    }

    let mut engine = Engine::new(config.clone()).wrap_err("invalid engine configuration")?;
    let mut source = ScheduledTriggers::new(TagCursor::with_rests(events));
    let mut output = engine.new_output();

    let spec = WavSpec {
        channels: config.channels as u16,
        sample_rate: config.sample_rate as u32,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)
        .wrap_err_with(|| format!("failed to create {}", path.display()))?;

    let target_frames = (seconds * config.sample_rate) as usize;
    let mut interleaved = vec![0.0f32; config.block_length * config.channels];
    let mut remaining = target_frames;
    let start_time = std::time::Instant::now();

    while remaining > 0 {
        engine.process_block(&mut source, &mut output)?;
        let frames = output.write_interleaved(0, &mut interleaved).min(remaining);
        for sample in &interleaved[..frames * config.channels] {
            let s = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(s)?;
        }
        remaining -= frames;
    }

    writer.finalize()?;
    println!(
        "Rendered {:.1} s ({} frames) to {} in {:.2?}",
        seconds,
        target_frames,
        path.display(),
        start_time.elapsed()
    );
    Ok(())
}
