//! Horizontal momentum, jump and gravity integration.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::config::LocomotionConfig;
use super::ground::GroundState;
use super::input::InputSnapshot;
use super::stamina::StaminaPool;

/// Horizontal speed below which a character without input counts as at rest.
const REST_SPEED: f32 = 0.05;

/// Character velocity, persisted across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityState {
    /// Velocity in the XZ plane (y is always zero).
    pub horizontal: Vec3,
    pub vertical: f32,
}

impl VelocityState {
    pub fn velocity(&self) -> Vec3 {
        self.horizontal + Vec3::Y * self.vertical
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.horizontal.length()
    }
}

/// Which speed tier drove this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedMode {
    #[default]
    Walk,
    Sprint,
    Crouch,
}

/// Wrap an angle in radians to (-PI, PI].
pub fn wrap_angle(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Forward and right vectors on the ground plane for `heading` (radians).
pub fn planar_basis(heading: f32) -> (Vec3, Vec3) {
    let (sin, cos) = heading.sin_cos();
    let forward = Vec3::new(cos, 0.0, sin);
    let right = Vec3::new(-sin, 0.0, cos);
    (forward, right)
}

/// Normalized world direction for `move_axis` under `heading`.
pub fn desired_direction(move_axis: Vec2, heading: f32) -> Vec3 {
    let (forward, right) = planar_basis(heading);
    (right * move_axis.x + forward * move_axis.y).normalize_or_zero()
}

/// Turns intent into velocity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityIntegrator {
    walk_speed: f32,
    sprint_speed: f32,
    crouch_speed: f32,
    ground_smoothing: f32,
    air_smoothing: f32,
    air_control: f32,
    movement_smoothing: f32,
    gravity: f32,
    jump_velocity: f32,
    ground_stick_velocity: f32,
    sprint_stamina_cost: f32,
    jump_stamina_cost: f32,

    /// Displacement ramp for movement starting from rest, in [0, 1].
    initiation: f32,
}

impl VelocityIntegrator {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            sprint_speed: config.sprint_speed,
            crouch_speed: config.crouch_speed,
            ground_smoothing: config.ground_smoothing,
            air_smoothing: config.air_smoothing,
            air_control: config.air_control,
            movement_smoothing: config.movement_smoothing,
            gravity: config.gravity,
            jump_velocity: config.jump_velocity(),
            ground_stick_velocity: config.ground_stick_velocity,
            sprint_stamina_cost: config.sprint_stamina_cost,
            jump_stamina_cost: config.jump_stamina_cost,
            initiation: 0.0,
        }
    }

    /// Pick the speed tier, draining sprint stamina when sprinting.
    ///
    /// Sprint needs the sprint button, no crouch and stamina left. Crouch
    /// speed needs a crouch and stamina left; an exhausted crouch walks.
    pub fn resolve_speed(
        &self,
        input: &InputSnapshot,
        crouching: bool,
        stamina: &mut StaminaPool,
        dt: f32,
    ) -> (SpeedMode, f32) {
        let has_stamina = !stamina.is_empty();

        if input.sprint && !crouching && has_stamina {
            stamina.drain(self.sprint_stamina_cost * dt);
            (SpeedMode::Sprint, self.sprint_speed)
        } else if crouching && has_stamina {
            (SpeedMode::Crouch, self.crouch_speed)
        } else {
            (SpeedMode::Walk, self.walk_speed)
        }
    }

    /// Smooth horizontal velocity toward the input and return this tick's
    /// horizontal displacement, including any forced slope slide.
    #[allow(clippy::too_many_arguments)]
    pub fn step_horizontal(
        &mut self,
        velocity: &mut VelocityState,
        input: &InputSnapshot,
        ground: &GroundState,
        stamina: &mut StaminaPool,
        heading: f32,
        crouching: bool,
        dt: f32,
    ) -> (SpeedMode, Vec3) {
        let direction = desired_direction(input.move_axis, heading);
        let (mode, speed) = self.resolve_speed(input, crouching, stamina, dt);

        let (target, smoothing) = if ground.is_grounded {
            (direction * speed, self.ground_smoothing)
        } else {
            (direction * speed * self.air_control, self.air_smoothing)
        };
        let t = (dt / smoothing).clamp(0.0, 1.0);
        velocity.horizontal = velocity.horizontal.lerp(target, t);

        self.update_initiation(input.has_move_intent(), velocity.horizontal_speed(), dt);

        let mut displacement = velocity.horizontal * dt * self.initiation;
        if ground.is_grounded {
            if let Some(slope) = ground.slope {
                displacement += slope.slide * dt;
            }
        }

        (mode, displacement)
    }

    fn update_initiation(&mut self, has_intent: bool, speed: f32, dt: f32) {
        if !has_intent && speed < REST_SPEED {
            self.initiation = 0.0;
        } else if self.movement_smoothing <= 0.0 {
            self.initiation = 1.0;
        } else {
            self.initiation = (self.initiation + dt / self.movement_smoothing).min(1.0);
        }
    }

    /// Launch if grounded, requested and affordable. Returns whether it did.
    pub fn try_jump(
        &self,
        velocity: &mut VelocityState,
        requested: bool,
        grounded: bool,
        stamina: &mut StaminaPool,
    ) -> bool {
        if !requested || !grounded {
            return false;
        }
        if !stamina.consume(self.jump_stamina_cost) {
            log::debug!("Jump denied: stamina {:.1}", stamina.current());
            return false;
        }
        velocity.vertical = self.jump_velocity;
        true
    }

    /// Apply gravity while airborne and return the vertical displacement.
    pub fn integrate_gravity(&self, velocity: &mut VelocityState, grounded: bool, dt: f32) -> f32 {
        if !grounded {
            velocity.vertical += self.gravity * dt;
        }
        velocity.vertical * dt
    }

    /// Pin a grounded, falling character to the stick velocity.
    pub fn settle_on_ground(&self, velocity: &mut VelocityState, grounded: bool) {
        if grounded && velocity.vertical < 0.0 {
            velocity.vertical = self.ground_stick_velocity;
        }
    }

    /// Current displacement ramp.
    pub fn initiation(&self) -> f32 {
        self.initiation
    }
}
