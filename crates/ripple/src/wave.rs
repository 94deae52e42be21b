use std::fmt;
use std::str::FromStr;

use glam::Vec2;

/// Normalized distance beyond which the ripple fully attenuates.
pub const RIPPLE_RADIUS: f32 = 0.4;
/// Spatial frequency of the ripple rings.
const RIPPLE_FREQUENCY: f32 = 12.0;
/// Multiplier applied to elapsed time inside the oscillator phase.
const TIME_SCALE: f32 = 2.0;
/// Peak displacement amplitude in UV units before attenuation.
const AMPLITUDE: f32 = 0.05;

/// Oscillator used for the displacement term.
///
/// `Tan` reproduces the original `tan * cos` waveform, which diverges near
/// the tangent's asymptotes and produces visible tearing at certain
/// distance/time combinations. `Bounded` swaps the tangent for a sine,
/// keeping the same ring structure with displacement bounded by the
/// amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveMode {
    #[default]
    Bounded,
    Tan,
}

impl fmt::Display for WaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveMode::Bounded => f.write_str("bounded"),
            WaveMode::Tan => f.write_str("tan"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown wave mode '{0}'; expected 'bounded' or 'tan'")]
pub struct ParseWaveModeError(String);

impl FromStr for WaveMode {
    type Err = ParseWaveModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bounded" | "sin" => Ok(WaveMode::Bounded),
            "tan" | "faithful" => Ok(WaveMode::Tan),
            other => Err(ParseWaveModeError(other.to_string())),
        }
    }
}

/// Hermite interpolation between two edges, clamped; mirrors GLSL/WGSL.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Radial attenuation factor for a fragment at `dist` from the pointer.
///
/// A reversed smoothstep over [0, RIPPLE_RADIUS] followed by a second
/// smoothstep pass, so the ripple reaches exactly zero at the radius with
/// no hard edge.
pub fn fade_out(dist: f32) -> f32 {
    let fade = 1.0 - smoothstep(0.0, RIPPLE_RADIUS, dist);
    smoothstep(0.0, 1.0, fade)
}

/// Scalar displacement for a fragment at `dist` from the pointer at `time`.
///
/// CPU mirror of the fragment shader; the shader must stay in sync with
/// this function.
pub fn ripple_displacement(mode: WaveMode, dist: f32, time: f32) -> f32 {
    let phase = dist * RIPPLE_FREQUENCY - time * TIME_SCALE;
    let oscillator = match mode {
        WaveMode::Bounded => phase.sin(),
        WaveMode::Tan => phase.tan(),
    };
    oscillator * phase.cos() * AMPLITUDE * fade_out(dist)
}

/// The texture coordinate actually sampled for a fragment at `uv`.
pub fn displaced_uv(mode: WaveMode, uv: Vec2, mouse: Vec2, time: f32, strength: f32) -> Vec2 {
    let dist = mouse.distance(uv);
    let ripple = ripple_displacement(mode, dist, time);
    uv + Vec2::splat(ripple) * strength
}
