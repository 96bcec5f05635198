//! Locomotion configuration.
//!
//! Every tunable lives here. Values are metric (meters, seconds) and are
//! validated once when the core is built; nothing is clamped silently.

use serde::{Deserialize, Serialize};

use crate::error::{finite, in_range, non_negative, positive, ConfigError, ConfigResult};

use super::transition::Pose;

/// How the jump's initial vertical velocity is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JumpProfile {
    /// Reach `height` meters at the apex: `sqrt(2 * height * |gravity|)`.
    Apex { height: f32 },
    /// Fixed launch velocity (meters/second).
    Fixed { velocity: f32 },
}

impl Default for JumpProfile {
    fn default() -> Self {
        JumpProfile::Apex { height: 2.0 }
    }
}

impl JumpProfile {
    /// Launch velocity under the given gravity.
    pub fn launch_velocity(self, gravity: f32) -> f32 {
        match self {
            JumpProfile::Apex { height } => (2.0 * height * gravity.abs()).sqrt(),
            JumpProfile::Fixed { velocity } => velocity,
        }
    }
}

/// Configuration for the locomotion core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    // ========================================================================
    // Capsule and Camera
    // ========================================================================
    /// Capsule radius (meters).
    pub radius: f32,

    /// Standing capsule height (meters).
    pub standing_height: f32,

    /// Crouching capsule height (meters).
    pub crouching_height: f32,

    /// Camera offset above the capsule center when standing.
    pub standing_camera_offset: f32,

    /// Camera offset above the capsule center when crouching.
    pub crouching_camera_offset: f32,

    // ========================================================================
    // Speeds
    // ========================================================================
    /// Walking speed (meters/second).
    pub walk_speed: f32,

    /// Sprinting speed (meters/second).
    pub sprint_speed: f32,

    /// Crouched speed (meters/second).
    pub crouch_speed: f32,

    // ========================================================================
    // Momentum
    // ========================================================================
    /// Time constant for horizontal smoothing on the ground (seconds).
    pub ground_smoothing: f32,

    /// Time constant for horizontal smoothing in the air (seconds).
    pub air_smoothing: f32,

    /// Multiplier on the airborne target velocity (0 = none, 1 = full).
    pub air_control: f32,

    /// Ramp-up time for the displacement of a new movement (seconds).
    /// Zero disables the ramp.
    pub movement_smoothing: f32,

    // ========================================================================
    // Vertical
    // ========================================================================
    /// Gravity acceleration along Y (meters/second², negative).
    pub gravity: f32,

    /// Jump launch velocity rule.
    pub jump: JumpProfile,

    /// Vertical velocity held while grounded (meters/second, non-positive).
    pub ground_stick_velocity: f32,

    // ========================================================================
    // Stamina
    // ========================================================================
    pub max_stamina: f32,

    /// Stamina drained per second of sprinting.
    pub sprint_stamina_cost: f32,

    /// Stamina consumed per jump.
    pub jump_stamina_cost: f32,

    /// Stamina regained per second while not sprinting.
    pub stamina_regen_rate: f32,

    // ========================================================================
    // Ground
    // ========================================================================
    /// Slopes steeper than this force a slide (degrees).
    pub slope_limit_degrees: f32,

    /// Extra reach of the slope ray past the capsule base (meters).
    pub ground_probe_epsilon: f32,

    // ========================================================================
    // Transitions (seconds)
    // ========================================================================
    /// Crouch/stand interpolation time.
    pub crouch_transition_time: f32,

    /// Minimum air time for a landing to count as hard.
    pub air_time_threshold: f32,

    /// Height lost at the bottom of a full landing dip (meters).
    pub landing_height_reduction: f32,

    pub landing_dip_time: f32,
    pub landing_hold_time: f32,
    pub landing_recover_time: f32,

    /// Horizontal velocity multiplier applied on a hard landing.
    pub landing_velocity_penalty: f32,

    // ========================================================================
    // Tick
    // ========================================================================
    /// Largest step integrated in one tick (seconds).
    pub max_delta_time: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            // Capsule and camera
            radius: 0.5,
            standing_height: 2.0,
            crouching_height: 1.0,
            standing_camera_offset: 1.0,
            crouching_camera_offset: 0.5,

            // Speeds
            walk_speed: 5.0,
            sprint_speed: 10.0,
            crouch_speed: 2.0,

            // Momentum
            ground_smoothing: 0.1,
            air_smoothing: 0.2,
            air_control: 0.2,
            movement_smoothing: 0.1,

            // Vertical
            gravity: -9.81,
            jump: JumpProfile::Apex { height: 2.0 },
            ground_stick_velocity: -2.0,

            // Stamina
            max_stamina: 100.0,
            sprint_stamina_cost: 10.0,
            jump_stamina_cost: 10.0,
            stamina_regen_rate: 5.0,

            // Ground
            slope_limit_degrees: 45.0,
            ground_probe_epsilon: 0.6,

            // Transitions
            crouch_transition_time: 0.25,
            air_time_threshold: 0.1,
            landing_height_reduction: 0.1,
            landing_dip_time: 0.1,
            landing_hold_time: 0.1,
            landing_recover_time: 0.1,
            landing_velocity_penalty: 0.5,

            max_delta_time: 0.066,
        }
    }
}

impl LocomotionConfig {
    /// Fast, floaty movement with generous air control.
    pub fn arcade() -> Self {
        Self {
            walk_speed: 7.0,
            sprint_speed: 12.0,
            crouch_speed: 3.5,
            ground_smoothing: 0.05,
            air_control: 0.6,
            movement_smoothing: 0.0,
            gravity: -20.0,
            jump: JumpProfile::Fixed { velocity: 8.0 },
            sprint_stamina_cost: 5.0,
            jump_stamina_cost: 5.0,
            stamina_regen_rate: 15.0,
            crouch_transition_time: 0.12,
            landing_velocity_penalty: 0.85,
            ..Default::default()
        }
    }

    /// Slow, weighty movement with punishing landings.
    pub fn heavy() -> Self {
        Self {
            walk_speed: 3.5,
            sprint_speed: 6.5,
            crouch_speed: 1.5,
            ground_smoothing: 0.2,
            air_smoothing: 0.4,
            air_control: 0.05,
            movement_smoothing: 0.25,
            jump: JumpProfile::Apex { height: 0.9 },
            sprint_stamina_cost: 15.0,
            jump_stamina_cost: 20.0,
            stamina_regen_rate: 4.0,
            crouch_transition_time: 0.4,
            landing_height_reduction: 0.25,
            landing_dip_time: 0.08,
            landing_hold_time: 0.2,
            landing_recover_time: 0.3,
            landing_velocity_penalty: 0.3,
            ..Default::default()
        }
    }

    /// Check every tunable, failing on the first out-of-range value.
    pub fn validate(&self) -> ConfigResult {
        positive("radius", self.radius)?;
        positive("standing_height", self.standing_height)?;
        positive("crouching_height", self.crouching_height)?;
        if self.crouching_height > self.standing_height {
            return Err(ConfigError::CrouchAboveStanding {
                crouching: self.crouching_height,
                standing: self.standing_height,
            });
        }
        finite("standing_camera_offset", self.standing_camera_offset)?;
        finite("crouching_camera_offset", self.crouching_camera_offset)?;

        positive("walk_speed", self.walk_speed)?;
        positive("sprint_speed", self.sprint_speed)?;
        positive("crouch_speed", self.crouch_speed)?;

        positive("ground_smoothing", self.ground_smoothing)?;
        positive("air_smoothing", self.air_smoothing)?;
        in_range("air_control", self.air_control, 0.0, 1.0)?;
        non_negative("movement_smoothing", self.movement_smoothing)?;

        finite("gravity", self.gravity)?;
        if self.gravity >= 0.0 {
            return Err(ConfigError::GravityNotDownward(self.gravity));
        }
        match self.jump {
            JumpProfile::Apex { height } => positive("jump.height", height)?,
            JumpProfile::Fixed { velocity } => positive("jump.velocity", velocity)?,
        }
        finite("ground_stick_velocity", self.ground_stick_velocity)?;
        if self.ground_stick_velocity > 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "ground_stick_velocity",
                value: self.ground_stick_velocity,
                min: f32::NEG_INFINITY,
                max: 0.0,
            });
        }

        positive("max_stamina", self.max_stamina)?;
        non_negative("sprint_stamina_cost", self.sprint_stamina_cost)?;
        non_negative("jump_stamina_cost", self.jump_stamina_cost)?;
        non_negative("stamina_regen_rate", self.stamina_regen_rate)?;

        in_range("slope_limit_degrees", self.slope_limit_degrees, 0.0, 90.0)?;
        non_negative("ground_probe_epsilon", self.ground_probe_epsilon)?;

        non_negative("crouch_transition_time", self.crouch_transition_time)?;
        positive("air_time_threshold", self.air_time_threshold)?;
        non_negative("landing_height_reduction", self.landing_height_reduction)?;
        if self.landing_height_reduction >= self.crouching_height {
            return Err(ConfigError::ReductionTooLarge {
                reduction: self.landing_height_reduction,
                crouching: self.crouching_height,
            });
        }
        non_negative("landing_dip_time", self.landing_dip_time)?;
        non_negative("landing_hold_time", self.landing_hold_time)?;
        non_negative("landing_recover_time", self.landing_recover_time)?;
        in_range("landing_velocity_penalty", self.landing_velocity_penalty, 0.0, 1.0)?;

        positive("max_delta_time", self.max_delta_time)?;
        Ok(())
    }

    /// Initial vertical velocity of a jump.
    pub fn jump_velocity(&self) -> f32 {
        self.jump.launch_velocity(self.gravity)
    }

    /// Resting pose when standing.
    pub fn standing_pose(&self) -> Pose {
        Pose::for_capsule(self.standing_height, self.standing_camera_offset)
    }

    /// Resting pose when crouched.
    pub fn crouching_pose(&self) -> Pose {
        Pose::for_capsule(self.crouching_height, self.crouching_camera_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(LocomotionConfig::default().validate().is_ok());
        assert!(LocomotionConfig::arcade().validate().is_ok());
        assert!(LocomotionConfig::heavy().validate().is_ok());
    }

    #[test]
    fn test_default_jump_reaches_two_meters() {
        let config = LocomotionConfig::default();
        let expected = (2.0_f32 * 2.0 * 9.81).sqrt();
        assert!((config.jump_velocity() - expected).abs() < 1e-5);
        assert!((config.jump_velocity() - 6.26).abs() < 0.01);
    }

    #[test]
    fn test_fixed_jump_ignores_gravity() {
        assert_eq!(JumpProfile::Fixed { velocity: 8.0 }.launch_velocity(-30.0), 8.0);
    }

    #[test]
    fn test_rejects_crouch_above_standing() {
        let config = LocomotionConfig {
            crouching_height: 2.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CrouchAboveStanding { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let negative_cost = LocomotionConfig {
            jump_stamina_cost: -1.0,
            ..Default::default()
        };
        assert_eq!(
            negative_cost.validate(),
            Err(ConfigError::Negative {
                field: "jump_stamina_cost",
                value: -1.0
            })
        );

        let upward_gravity = LocomotionConfig {
            gravity: 9.81,
            ..Default::default()
        };
        assert_eq!(upward_gravity.validate(), Err(ConfigError::GravityNotDownward(9.81)));

        let zero_speed = LocomotionConfig {
            walk_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(zero_speed.validate(), Err(ConfigError::NotPositive { .. })));

        let nan_control = LocomotionConfig {
            air_control: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(nan_control.validate(), Err(ConfigError::NotFinite { .. })));
    }

    #[test]
    fn test_resting_poses() {
        let config = LocomotionConfig::default();
        assert_eq!(config.standing_pose(), Pose::new(2.0, 2.0));
        assert_eq!(config.crouching_pose(), Pose::new(1.0, 1.0));
    }
}
