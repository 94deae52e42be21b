use std::path::PathBuf;

use clap::Parser;
use renderer::WaveMode;

#[derive(Parser, Debug)]
#[command(
    name = "videoripple",
    author,
    version,
    about = "Pointer-driven ripple shader over a looping video surface"
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Video source to display (animated GIF, PNG, or JPEG).
    #[arg(value_name = "VIDEO")]
    pub video: PathBuf,

    /// Window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_surface_size, default_value = "1280x720")]
    pub size: (u32, u32),

    /// Optional FPS cap (0=uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Let the ripple fade out after this many seconds without pointer
    /// contact; omitted, it stays active once touched.
    #[arg(long, value_name = "SECONDS")]
    pub idle_timeout: Option<f32>,

    /// Displacement oscillator: `bounded` (default) or `tan` for the
    /// original tangent waveform.
    #[arg(long, value_name = "MODE", default_value_t = WaveMode::default())]
    pub wave: WaveMode,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid width".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid height".to_string())?;
    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".into());
    }
    Ok((width, height))
}
