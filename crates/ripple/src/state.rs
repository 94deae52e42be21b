use std::time::{Duration, Instant};

use glam::{Mat4, Vec2};

use crate::camera::{intersect_quad, quad_model, SurfaceCamera};

/// Fixed time increment per tick; the animation is frame-rate-dependent by
/// design (a faster display plays the ripple faster).
pub const TIME_STEP: f32 = 0.01;
/// Fraction of the remaining pointer distance closed per tick.
pub const POINTER_EASING: f32 = 0.1;
/// Fraction of the remaining ripple-strength distance closed per tick.
pub const STRENGTH_EASING: f32 = 0.015;
/// Fraction of the remaining rotation distance closed per tick.
pub const ROTATION_EASING: f32 = 0.05;
/// Scale from normalized pointer offset to rotation target in radians.
pub const ROTATION_SCALE: f32 = 0.2;

/// Live viewport dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Snapshot of the eased values a frame pushes into the shader uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Current (eased) pointer position in quad UV coordinates.
    pub pointer: Vec2,
    /// Elapsed animation time.
    pub time: f32,
    /// Current ripple strength in [0,1].
    pub ripple_strength: f32,
    /// Current quad rotation (pitch, yaw) in radians.
    pub rotation: Vec2,
}

/// All mutable session state for the ripple surface.
///
/// Input handlers go through [`RenderState::events`], which exposes writes
/// to target values only; [`RenderState::advance`] owns the eased values
/// and is the single place they change. Within the single-threaded frame
/// loop that split keeps event handling and easing from stepping on each
/// other by construction.
#[derive(Debug, Clone)]
pub struct RenderState {
    viewport: Viewport,
    camera: SurfaceCamera,
    pointer_target: Vec2,
    pointer_current: Vec2,
    active: bool,
    last_hit: Option<Instant>,
    idle_timeout: Option<Duration>,
    ripple_strength: f32,
    rotation_target: Vec2,
    rotation_current: Vec2,
    /// Normalized pointer offset from the viewport center, updated on every
    /// pointer move whether or not the pick ray hits the quad.
    pointer_offset: Vec2,
    time: f32,
}

impl RenderState {
    /// Creates the session state for a viewport. `idle_timeout` of `None`
    /// keeps the ripple active forever once triggered.
    pub fn new(width: u32, height: u32, idle_timeout: Option<Duration>) -> Self {
        let viewport = Viewport::new(width, height);
        Self {
            viewport,
            camera: SurfaceCamera::new(viewport.aspect()),
            pointer_target: Vec2::splat(0.5),
            pointer_current: Vec2::splat(0.5),
            active: false,
            last_hit: None,
            idle_timeout,
            ripple_strength: 0.0,
            rotation_target: Vec2::ZERO,
            rotation_current: Vec2::ZERO,
            pointer_offset: Vec2::ZERO,
            time: 0.0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &SurfaceCamera {
        &self.camera
    }

    pub fn pointer_target(&self) -> Vec2 {
        self.pointer_target
    }

    pub fn pointer_current(&self) -> Vec2 {
        self.pointer_current
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn ripple_strength(&self) -> f32 {
        self.ripple_strength
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation_current
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Applies new viewport dimensions. Safe to call repeatedly with the
    /// same dimensions; zero dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect(self.viewport.aspect());
    }

    /// Write surface for input handlers; mutates target values only.
    pub fn events(&mut self) -> InputEvents<'_> {
        InputEvents { state: self }
    }

    /// Runs one tick: idle check, easing, time advance. Returns the uniform
    /// snapshot for the frame about to be drawn.
    pub fn advance(&mut self, now: Instant) -> FrameInputs {
        if let (Some(timeout), Some(last_hit)) = (self.idle_timeout, self.last_hit) {
            if self.active && now.saturating_duration_since(last_hit) >= timeout {
                self.active = false;
            }
        }

        self.time += TIME_STEP;

        self.pointer_current += (self.pointer_target - self.pointer_current) * POINTER_EASING;

        let strength_target = if self.active { 1.0 } else { 0.0 };
        self.ripple_strength += (strength_target - self.ripple_strength) * STRENGTH_EASING;

        // Pitch tips away from a pointer below center, yaw follows it sideways.
        self.rotation_target = Vec2::new(-self.pointer_offset.y, self.pointer_offset.x) * ROTATION_SCALE;
        self.rotation_current += (self.rotation_target - self.rotation_current) * ROTATION_EASING;

        self.frame_inputs()
    }

    /// The current uniform snapshot without advancing.
    pub fn frame_inputs(&self) -> FrameInputs {
        FrameInputs {
            pointer: self.pointer_current,
            time: self.time,
            ripple_strength: self.ripple_strength,
            rotation: self.rotation_current,
        }
    }

    /// Model-view-projection matrix for the quad at its current rotation.
    pub fn model_view_projection(&self) -> Mat4 {
        self.camera.view_projection() * quad_model(self.rotation_current)
    }
}

/// Narrowed write surface handed to input handlers.
///
/// Only target values (pointer target, activity, rotation offset) are
/// reachable from here; eased values stay owned by the update step.
pub struct InputEvents<'a> {
    state: &'a mut RenderState,
}

impl InputEvents<'_> {
    /// Handles a pointer move at `client` coordinates (pixels, origin
    /// top-left).
    ///
    /// The rotation offset updates unconditionally; the pointer target and
    /// activity flag update only when the pick ray hits the quad. A miss
    /// leaves them untouched.
    pub fn pointer_moved(&mut self, client: Vec2, now: Instant) {
        let state = &mut *self.state;
        let width = state.viewport.width as f32;
        let height = state.viewport.height as f32;

        state.pointer_offset = Vec2::new(
            (client.x - width / 2.0) / width,
            (client.y - height / 2.0) / height,
        );

        let ndc = Vec2::new(
            client.x / width * 2.0 - 1.0,
            -(client.y / height * 2.0 - 1.0),
        );
        let ray = state.camera.ray_from_ndc(ndc);
        if let Some(uv) = intersect_quad(&ray, state.rotation_current) {
            state.pointer_target = uv;
            state.active = true;
            state.last_hit = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FrameClock, ManualClock};

    const WIDTH: u32 = 1920;
    const HEIGHT: u32 = 1080;

    fn state() -> RenderState {
        RenderState::new(WIDTH, HEIGHT, None)
    }

    fn clock() -> ManualClock {
        ManualClock::new(Duration::from_millis(16))
    }

    #[test]
    fn resize_is_idempotent() {
        let mut a = state();
        let mut b = state();
        a.resize(1280, 720);
        b.resize(1280, 720);
        b.resize(1280, 720);
        assert_eq!(a.viewport(), b.viewport());
        assert_eq!(a.camera().aspect(), b.camera().aspect());
    }

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut s = state();
        s.resize(0, 720);
        assert_eq!(s.viewport(), Viewport::new(WIDTH, HEIGHT));
    }

    #[test]
    fn time_advances_by_exactly_one_step_per_tick() {
        let mut s = state();
        let mut clock = clock();
        s.advance(clock.tick());
        assert_eq!(s.time(), TIME_STEP);
        s.advance(clock.tick());
        assert_eq!(s.time(), TIME_STEP + TIME_STEP);
    }

    #[test]
    fn pointer_easing_follows_the_decay_law() {
        let mut s = state();
        let mut clock = clock();
        s.events()
            .pointer_moved(Vec2::new(WIDTH as f32 * 0.7, HEIGHT as f32 * 0.3), clock.peek());
        let target = s.pointer_target();
        let initial_error = (target - s.pointer_current()).abs();

        let ticks = 20;
        for _ in 0..ticks {
            s.advance(clock.tick());
        }

        let expected = initial_error * (1.0 - POINTER_EASING).powi(ticks);
        let observed = (target - s.pointer_current()).abs();
        assert!((observed.x - expected.x).abs() < 1e-4);
        assert!((observed.y - expected.y).abs() < 1e-4);
    }

    #[test]
    fn strength_easing_follows_the_decay_law_both_directions() {
        // Toward 1.0 while active.
        let mut s = state();
        let mut clock = clock();
        s.events()
            .pointer_moved(Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0), clock.peek());
        assert!(s.is_active());
        let ticks = 40;
        for _ in 0..ticks {
            s.advance(clock.tick());
        }
        let expected_error = (1.0 - STRENGTH_EASING).powi(ticks);
        assert!(((1.0 - s.ripple_strength()) - expected_error).abs() < 1e-4);

        // Toward 0.0 once deactivated.
        s.active = false;
        let initial = s.ripple_strength();
        for _ in 0..ticks {
            s.advance(clock.tick());
        }
        let expected = initial * (1.0 - STRENGTH_EASING).powi(ticks);
        assert!((s.ripple_strength() - expected).abs() < 1e-4);
    }

    #[test]
    fn rotation_easing_follows_the_decay_law() {
        let mut s = state();
        let mut clock = clock();
        // Pointer at the right edge, vertically centered.
        s.events()
            .pointer_moved(Vec2::new(WIDTH as f32, HEIGHT as f32 / 2.0), clock.peek());
        let target = Vec2::new(0.0, 0.5 * ROTATION_SCALE);

        let ticks = 30;
        for _ in 0..ticks {
            s.advance(clock.tick());
        }

        let expected_error = target * (1.0 - ROTATION_EASING).powi(ticks);
        let observed_error = target - s.rotation();
        assert!((observed_error.x - expected_error.x).abs() < 1e-4);
        assert!((observed_error.y - expected_error.y).abs() < 1e-4);
    }

    #[test]
    fn hit_updates_target_and_activates() {
        let mut s = state();
        let before = s.pointer_target();
        s.events().pointer_moved(
            Vec2::new(WIDTH as f32 * 0.6, HEIGHT as f32 * 0.4),
            Instant::now(),
        );
        assert!(s.is_active());
        assert_ne!(s.pointer_target(), before);
        // Pointer right of and above center lands right of and above the quad center.
        assert!(s.pointer_target().x > 0.5);
        assert!(s.pointer_target().y > 0.5);
    }

    #[test]
    fn miss_leaves_pointer_state_unchanged() {
        let mut s = state();
        let target_before = s.pointer_target();
        // Pointer dragged far off the window; the pick ray lands beyond the
        // quad's edge.
        s.events().pointer_moved(
            Vec2::new(WIDTH as f32 * 3.0, HEIGHT as f32 / 2.0),
            Instant::now(),
        );
        assert_eq!(s.pointer_target(), target_before);
        assert!(!s.is_active());
        // The rotation offset still tracked the move.
        assert!((s.pointer_offset.x - 2.5).abs() < 1e-6);
        assert_eq!(s.pointer_offset.y, 0.0);
    }

    #[test]
    fn idle_timeout_deactivates_after_quiet_period() {
        let mut s = RenderState::new(WIDTH, HEIGHT, Some(Duration::from_secs(1)));
        let mut clock = clock();
        s.events()
            .pointer_moved(Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0), clock.peek());
        assert!(s.is_active());

        s.advance(clock.tick());
        assert!(s.is_active());

        clock.skip(Duration::from_secs(2));
        s.advance(clock.tick());
        assert!(!s.is_active());
    }

    #[test]
    fn without_idle_timeout_the_ripple_stays_active() {
        let mut s = state();
        let mut clock = clock();
        s.events()
            .pointer_moved(Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0), clock.peek());
        clock.skip(Duration::from_secs(3600));
        s.advance(clock.tick());
        assert!(s.is_active());
    }
}
