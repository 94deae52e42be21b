//! End-to-end interaction scenario: a pointer hit activates the ripple and
//! every eased value converges on its target under repeated ticks.

use std::time::Duration;

use glam::{Vec2, Vec3};
use ripple::{
    state::{POINTER_EASING, ROTATION_EASING, STRENGTH_EASING, TIME_STEP},
    FrameClock, ManualClock, RenderState, QUAD_HEIGHT, QUAD_WIDTH,
};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

/// Projects a quad UV back to window client coordinates through the camera,
/// the forward path of the pick ray the state casts on pointer moves.
fn client_for_uv(state: &RenderState, uv: Vec2) -> Vec2 {
    let world = Vec3::new(
        (uv.x - 0.5) * QUAD_WIDTH,
        (uv.y - 0.5) * QUAD_HEIGHT,
        0.0,
    );
    let clip = state.camera().view_projection().project_point3(world);
    let width = state.viewport().width as f32;
    let height = state.viewport().height as f32;
    Vec2::new(
        (clip.x + 1.0) / 2.0 * width,
        (1.0 - clip.y) / 2.0 * height,
    )
}

#[test]
fn pointer_hit_drives_full_convergence() {
    let mut state = RenderState::new(WIDTH, HEIGHT, None);
    let mut clock = ManualClock::new(Duration::from_millis(16));

    assert_eq!(state.pointer_current(), Vec2::splat(0.5));
    assert_eq!(state.pointer_target(), Vec2::splat(0.5));
    assert_eq!(state.ripple_strength(), 0.0);
    assert!(!state.is_active());

    let goal = Vec2::new(0.8, 0.2);
    let client = client_for_uv(&state, goal);
    state.events().pointer_moved(client, clock.peek());

    assert!(state.is_active());
    assert!((state.pointer_target() - goal).length() < 1e-3);

    for _ in 0..50 {
        state.advance(clock.tick());
    }

    // Position error after 50 ticks: 0.3 * 0.9^50, comfortably below 0.01.
    assert!((state.pointer_current() - goal).length() < 0.01);

    // Strength obeys the 1.5%-per-tick law; 50 ticks put it just past half.
    let expected = 1.0 - (1.0 - STRENGTH_EASING).powi(50);
    assert!((state.ripple_strength() - expected).abs() < 1e-3);

    for _ in 0..200 {
        state.advance(clock.tick());
    }

    let inputs = state.frame_inputs();
    assert!(inputs.ripple_strength > 0.95);
    assert!((inputs.time - 250.0 * TIME_STEP).abs() < 1e-3);
    assert!((inputs.pointer - goal).length() < 1e-4);

    // Rotation settled on the offset-derived target.
    let offset = (client - Vec2::new(WIDTH as f32, HEIGHT as f32) / 2.0)
        / Vec2::new(WIDTH as f32, HEIGHT as f32);
    let rotation_target = Vec2::new(-offset.y, offset.x) * 0.2;
    assert!((inputs.rotation - rotation_target).length() < 1e-3);
}

#[test]
fn easing_constants_match_the_documented_laws() {
    assert_eq!(POINTER_EASING, 0.1);
    assert_eq!(STRENGTH_EASING, 0.015);
    assert_eq!(ROTATION_EASING, 0.05);
    assert_eq!(TIME_STEP, 0.01);
}
