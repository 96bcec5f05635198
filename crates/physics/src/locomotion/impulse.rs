//! Impulse jump for rigid-body driven characters.
//!
//! Some characters are moved by a physics engine instead of the kinematic
//! core. They only need the jump: a sphere overlap under the feet decides
//! support, and a grounded jump zeroes vertical velocity before adding an
//! upward impulse.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::ContentFlags;
use crate::error::{non_negative, positive, ConfigResult};

use super::input::InputSource;
use super::query::WorldQuery;
use super::stamina::StaminaPool;

/// Tuning for [`ImpulseJumper`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpulseJumpConfig {
    /// Upward impulse (newton-seconds).
    pub jump_force: f32,

    /// Body mass (kilograms).
    pub mass: f32,

    /// Radius of the ground check sphere.
    pub ground_check_radius: f32,

    /// What counts as ground.
    pub ground_mask: ContentFlags,

    /// Stamina consumed per jump.
    pub stamina_cost: f32,
}

impl Default for ImpulseJumpConfig {
    fn default() -> Self {
        Self {
            jump_force: 10.0,
            mass: 1.0,
            ground_check_radius: 0.2,
            ground_mask: ContentFlags::MASK_WALKABLE,
            stamina_cost: 10.0,
        }
    }
}

impl ImpulseJumpConfig {
    pub fn validate(&self) -> ConfigResult {
        positive("jump_force", self.jump_force)?;
        positive("mass", self.mass)?;
        positive("ground_check_radius", self.ground_check_radius)?;
        non_negative("stamina_cost", self.stamina_cost)
    }

    /// Velocity change produced by one jump impulse.
    pub fn delta_velocity(&self) -> f32 {
        self.jump_force / self.mass
    }
}

/// Jump backend for rigid bodies.
#[derive(Debug, Clone)]
pub struct ImpulseJumper {
    config: ImpulseJumpConfig,
    grounded: bool,
}

impl ImpulseJumper {
    pub fn new(config: ImpulseJumpConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grounded: false,
        })
    }

    /// Refresh support and jump if requested. Returns whether it jumped.
    pub fn update<W, I>(
        &mut self,
        world: &W,
        ground_check_point: Vec3,
        linear_velocity: &mut Vec3,
        input: &mut I,
        stamina: &mut StaminaPool,
    ) -> bool
    where
        W: WorldQuery + ?Sized,
        I: InputSource + ?Sized,
    {
        self.grounded = world.sphere_overlap(
            ground_check_point,
            self.config.ground_check_radius,
            self.config.ground_mask,
        );

        if !input.snapshot().jump || !self.grounded {
            return false;
        }
        if !stamina.consume(self.config.stamina_cost) {
            return false;
        }

        linear_velocity.y = 0.0;
        linear_velocity.y += self.config.delta_velocity();
        input.acknowledge_jump();
        log::debug!("Impulse jump: vy={:.2}", linear_velocity.y);
        true
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn config(&self) -> &ImpulseJumpConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotion::capsule::Capsule;
    use crate::locomotion::input::InputSnapshot;
    use crate::locomotion::query::RayHit;

    struct Floor;

    impl WorldQuery for Floor {
        fn is_grounded(&self, position: Vec3, _capsule: &Capsule) -> bool {
            position.y <= 0.0
        }

        fn raycast_down(&self, _origin: Vec3, _max_distance: f32) -> Option<RayHit> {
            None
        }

        fn sphere_overlap(&self, point: Vec3, radius: f32, mask: ContentFlags) -> bool {
            mask.intersects(ContentFlags::SOLID) && point.y <= radius
        }
    }

    fn jump_input() -> InputSnapshot {
        InputSnapshot {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_jump_resets_fall_then_adds_impulse() {
        let mut jumper = ImpulseJumper::new(ImpulseJumpConfig::default()).unwrap();
        let mut velocity = Vec3::new(3.0, -4.0, 0.0);
        let mut input = jump_input();
        let mut stamina = StaminaPool::new(100.0);

        assert!(jumper.update(&Floor, Vec3::new(0.0, 0.1, 0.0), &mut velocity, &mut input, &mut stamina));
        assert_eq!(velocity, Vec3::new(3.0, 10.0, 0.0));
        assert!(!input.jump, "jump must be acknowledged");
        assert_eq!(stamina.current(), 90.0);
    }

    #[test]
    fn test_no_jump_in_air_or_when_exhausted() {
        let mut jumper = ImpulseJumper::new(ImpulseJumpConfig::default()).unwrap();
        let mut velocity = Vec3::ZERO;
        let mut input = jump_input();
        let mut stamina = StaminaPool::new(100.0);

        assert!(!jumper.update(&Floor, Vec3::new(0.0, 2.0, 0.0), &mut velocity, &mut input, &mut stamina));
        assert!(!jumper.is_grounded());
        assert!(input.jump, "unconsumed jump stays pending");

        let mut tired = StaminaPool::new(5.0);
        assert!(!jumper.update(&Floor, Vec3::ZERO, &mut velocity, &mut input, &mut tired));
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn test_heavier_body_jumps_lower() {
        let config = ImpulseJumpConfig {
            mass: 2.0,
            ..Default::default()
        };
        assert_eq!(config.delta_velocity(), 5.0);
        assert!(ImpulseJumpConfig { mass: 0.0, ..config }.validate().is_err());
    }
}
