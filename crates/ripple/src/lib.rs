//! Interaction core for the video ripple surface.
//!
//! Everything in this crate is pure math and plain state: the eased render
//! state, the camera and ray/quad picking, the frame clock and pacing
//! helpers, and a CPU mirror of the fragment shader's displacement math.
//! The renderer crate reads from here and owns the GPU side; nothing in
//! this crate touches windowing or `wgpu`, which keeps the easing laws and
//! the pointer interaction deterministic under test.
//!
//! The flow per frame:
//!
//! ```text
//!   pointer events ──▶ InputEvents (targets only)
//!                             │
//!   FrameClock::tick ──▶ RenderState::advance ──▶ FrameInputs ──▶ uniforms
//! ```

pub mod camera;
pub mod clock;
pub mod state;
pub mod wave;

pub use camera::{intersect_quad, quad_model, Ray, SurfaceCamera, QUAD_HEIGHT, QUAD_WIDTH};
pub use clock::{BoxedFrameClock, FrameClock, FramePacer, ManualClock, SystemClock};
pub use state::{FrameInputs, InputEvents, RenderState, Viewport};
pub use wave::{displaced_uv, fade_out, ripple_displacement, WaveMode, RIPPLE_RADIUS};
