//! Renderer crate for videoripple.
//!
//! The module glues the winit preview window, the `wgpu` pipeline, and the
//! interaction core in the `ripple` crate together. The overall flow is:
//!
//! ```text
//!   CLI / videoripple
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop ──▶ render_frame()
//!          ▲                │                     │
//!          │      CursorMoved ─▶ RenderState      └─▶ RippleUniforms ─▶ GPU UBO
//! ```
//!
//! `WindowState` owns all GPU resources (surface, device, pipeline, video
//! texture) plus the eased interaction state, while `Renderer` is the thin
//! entry point the binary calls. The video source is decoded to CPU frames
//! up front and streamed to a single texture as playback loops.

mod gpu;
mod types;
mod video;
mod window;

use anyhow::Result;

pub use ripple::WaveMode;
pub use types::RendererConfig;
pub use video::VideoSource;

/// Entry point owning the renderer configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the preview window and runs the event loop until it closes.
    pub fn run(&mut self) -> Result<()> {
        window::run(&self.config)
    }
}
