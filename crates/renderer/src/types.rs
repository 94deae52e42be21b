use std::path::PathBuf;
use std::time::Duration;

use ripple::WaveMode;

/// Runtime configuration handed to [`crate::Renderer`] by the CLI.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Initial window size in physical pixels (width, height).
    pub surface_size: (u32, u32),
    /// Still image or animated GIF sampled by the ripple surface.
    pub video_source: PathBuf,
    /// Optional FPS cap; `None` renders as fast as the compositor allows.
    pub target_fps: Option<f32>,
    /// Deactivates the ripple after this long without a pointer hit.
    pub idle_timeout: Option<Duration>,
    /// Oscillator used for the displacement term.
    pub wave: WaveMode,
}
