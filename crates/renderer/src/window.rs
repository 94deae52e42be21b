//! Interactive preview window: winit event loop, pointer routing, and
//! frame pacing.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use ripple::{FrameClock, FramePacer, RenderState, SystemClock};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::gpu::GpuState;
use crate::types::RendererConfig;
use crate::video::VideoSource;

struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    scene: RenderState,
    clock: SystemClock,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig, source: VideoSource) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(window.as_ref(), size, source, config.wave)?;
        let scene = RenderState::new(size.width, size.height, config.idle_timeout);
        Ok(Self {
            window,
            gpu,
            scene,
            clock: SystemClock::new(),
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.scene.resize(new_size.width, new_size.height);
        self.gpu.resize(new_size);
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = self.clock.tick();
        let inputs = self.scene.advance(now);
        let mvp = self.scene.model_view_projection();
        self.gpu.render_frame(mvp, &inputs, now)
    }
}

/// Opens the preview window and pumps the event loop until it closes.
pub(crate) fn run(config: &RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let (width, height) = config.surface_size;
    let window = WindowBuilder::new()
        .with_title("videoripple")
        .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)))
        .build(&event_loop)
        .context("failed to create preview window")?;
    let window = Arc::new(window);

    let source = match VideoSource::load(&config.video_source) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(
                path = %config.video_source.display(),
                error = %err,
                "failed to load video source; rendering with a placeholder texture"
            );
            VideoSource::placeholder()
        }
    };

    let mut state = WindowState::new(window.clone(), config, source)?;
    let mut pacer = FramePacer::new(config.target_fps);

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        elwt.exit();
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        state.scene.events().pointer_moved(
                            Vec2::new(position.x as f32, position.y as f32),
                            Instant::now(),
                        );
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(new_size);
                    }
                    WindowEvent::ScaleFactorChanged {
                        mut inner_size_writer,
                        ..
                    } => {
                        let _ = inner_size_writer.request_inner_size(state.gpu.size());
                    }
                    WindowEvent::RedrawRequested => match state.render_frame() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            state.gpu.resize(state.gpu.size());
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            tracing::error!("surface out of memory; exiting");
                            elwt.exit();
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            tracing::warn!("surface timeout; retrying next frame");
                        }
                        Err(other) => {
                            tracing::warn!(error = ?other, "surface error; retrying next frame");
                        }
                    },
                    _ => {}
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                if pacer.ready_for_frame(now) {
                    state.window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if let Some(deadline) = pacer.next_deadline() {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}
