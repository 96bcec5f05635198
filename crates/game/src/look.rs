//! Smoothed mouse look.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strider_physics::error::{positive, ConfigResult};
use strider_physics::wrap_angle;

/// Mouse look tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees per second per unit of look input.
    pub sensitivity: f32,

    /// Smoothing time for look deltas (seconds).
    pub rotation_smooth_time: f32,

    /// Pitch limit either side of level (degrees).
    pub pitch_limit_degrees: f32,

    pub invert_y: bool,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 100.0,
            rotation_smooth_time: 0.05,
            pitch_limit_degrees: 90.0,
            invert_y: false,
        }
    }
}

impl LookConfig {
    pub fn validate(&self) -> ConfigResult {
        positive("sensitivity", self.sensitivity)?;
        positive("rotation_smooth_time", self.rotation_smooth_time)?;
        positive("pitch_limit_degrees", self.pitch_limit_degrees)
    }
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries state between calls.
pub fn smooth_damp(current: Vec2, target: Vec2, velocity: &mut Vec2, smooth_time: f32, dt: f32) -> Vec2 {
    let omega = 2.0 / smooth_time.max(1.0e-4);
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + change * omega) * dt;
    *velocity = (*velocity - temp * omega) * decay;
    let mut output = target + (change + temp) * decay;

    // Never overshoot the target
    let toward_target = target - current;
    if toward_target.dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec2::ZERO;
    }
    output
}

/// Accumulates yaw and pitch from look input.
///
/// Pitch is positive looking down, matching the camera's forward vector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookController {
    config: LookConfig,
    /// Yaw in radians, wrapped to (-PI, PI].
    yaw: f32,
    /// Pitch in radians.
    pitch: f32,
    smoothed: Vec2,
    velocity: Vec2,
}

impl LookController {
    pub fn new(config: LookConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    /// Apply one frame of look input and return `(yaw, pitch)` in radians.
    pub fn update(&mut self, look: Vec2, dt: f32) -> (f32, f32) {
        if !dt.is_finite() || dt <= 0.0 || !look.is_finite() {
            return (self.yaw, self.pitch);
        }

        let target = look * self.config.sensitivity * dt;
        self.smoothed = smooth_damp(
            self.smoothed,
            target,
            &mut self.velocity,
            self.config.rotation_smooth_time,
            dt,
        );

        let pitch_delta = if self.config.invert_y {
            self.smoothed.y
        } else {
            -self.smoothed.y
        };
        let limit = self.config.pitch_limit_degrees.to_radians();
        self.pitch = (self.pitch + pitch_delta.to_radians()).clamp(-limit, limit);
        self.yaw = wrap_angle(self.yaw + self.smoothed.x.to_radians());

        (self.yaw, self.pitch)
    }

    /// Face `yaw` (radians) with level pitch, dropping any smoothing.
    pub fn reset(&mut self, yaw: f32) {
        self.yaw = wrap_angle(yaw);
        self.pitch = 0.0;
        self.smoothed = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}
