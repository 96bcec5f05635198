//! The locomotion core.
//!
//! [`LocomotionCore`] owns the character's capsule, velocity, stamina,
//! ground and posture state, and steps them once per tick in a fixed order:
//!
//! 1. Refresh ground state
//! 2. Horizontal movement and jump
//! 3. Gravity, vertical move, landing detection
//! 4. Posture and landing transitions
//! 5. Stamina regeneration
//! 6. Air time bookkeeping

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;

use super::capsule::Capsule;
use super::config::LocomotionConfig;
use super::ground::{GroundSensor, GroundState};
use super::input::InputSource;
use super::landing::LandingImpactController;
use super::posture::PostureController;
use super::query::WorldMover;
use super::stamina::StaminaPool;
use super::transition::Pose;
use super::velocity::{wrap_angle, SpeedMode, VelocityIntegrator, VelocityState};

/// A hard landing detected this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingEvent {
    /// Seconds spent airborne before touchdown.
    pub air_time: f32,
    /// Height lost at the bottom of the dip.
    pub reduction: f32,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Net displacement applied by the world this tick.
    pub displacement: Vec3,
    /// Grounded at the start of the tick.
    pub grounded: bool,
    pub jumped: bool,
    pub mode: SpeedMode,
    pub landing: Option<LandingEvent>,
    pub posture_toggled: bool,
    pub pose: Pose,
    pub stamina: f32,
}

/// First-person capsule locomotion over a world body `W`.
#[derive(Debug)]
pub struct LocomotionCore<W: WorldMover> {
    config: LocomotionConfig,
    world: W,
    capsule: Capsule,
    velocity: VelocityState,
    ground: GroundState,
    stamina: StaminaPool,
    sensor: GroundSensor,
    integrator: VelocityIntegrator,
    posture: PostureController,
    landing: LandingImpactController,
    /// Yaw in radians, within (-PI, PI].
    heading: f32,
    ticks: u64,
}

impl<W: WorldMover> LocomotionCore<W> {
    /// Validate `config` and build a standing, full-stamina character.
    pub fn new(config: LocomotionConfig, world: W) -> ConfigResult<Self> {
        config.validate()?;

        Ok(Self {
            capsule: Capsule::new(config.standing_height, config.radius),
            velocity: VelocityState::default(),
            ground: GroundState::default(),
            stamina: StaminaPool::new(config.max_stamina),
            sensor: GroundSensor::new(config.slope_limit_degrees, config.ground_probe_epsilon),
            integrator: VelocityIntegrator::new(&config),
            posture: PostureController::new(&config),
            landing: LandingImpactController::new(&config),
            heading: 0.0,
            ticks: 0,
            world,
            config,
        })
    }

    /// Advance the character by `dt` seconds.
    ///
    /// Non-finite or non-positive `dt` skips the tick. Long frames are capped
    /// at `max_delta_time`.
    pub fn tick<I: InputSource + ?Sized>(&mut self, input: &mut I, dt: f32) -> TickReport {
        if !dt.is_finite() || dt <= 0.0 {
            log::warn!("Skipping locomotion tick with invalid dt {dt}");
            return self.idle_report();
        }
        let dt = dt.min(self.config.max_delta_time);
        self.ticks += 1;

        let snapshot = input.snapshot().sanitized();
        let start = self.world.position();

        // Ground
        let mut ground = self.sensor.probe(&self.world, start, &self.capsule, &self.ground);

        // Movement and jump
        let crouching = snapshot.crouch || self.posture.is_crouched();
        let (mode, horizontal) = self.integrator.step_horizontal(
            &mut self.velocity,
            &snapshot,
            &ground,
            &mut self.stamina,
            self.heading,
            crouching,
            dt,
        );
        if horizontal != Vec3::ZERO {
            self.world.move_by(horizontal, &self.capsule);
        }

        let jumped = self.integrator.try_jump(
            &mut self.velocity,
            snapshot.jump,
            ground.is_grounded,
            &mut self.stamina,
        );
        if jumped {
            input.acknowledge_jump();
            log::debug!(
                "Jump at {:?}: vy={:.3} stamina={:.1}",
                self.world.position(),
                self.velocity.vertical,
                self.stamina.current()
            );
        }

        // Gravity and landing
        let vertical = self.integrator.integrate_gravity(&mut self.velocity, ground.is_grounded, dt);
        if vertical != 0.0 {
            self.world.move_by(Vec3::Y * vertical, &self.capsule);
        }
        self.integrator.settle_on_ground(&mut self.velocity, ground.is_grounded);

        let mut landing = None;
        if let Some(air_time) = self.landing.check(&ground) {
            let impact = self.landing.begin(self.posture.pose(), self.posture.rest_pose(), air_time);
            let reduction = impact.reduction();
            self.posture.begin_landing_impact(impact);
            self.velocity.horizontal *= self.landing.velocity_penalty();
            log::debug!("Hard landing after {air_time:.3}s: dip {reduction:.3}");
            landing = Some(LandingEvent { air_time, reduction });
        }

        // Posture
        let posture_toggled = self.posture.update_input(snapshot.crouch);
        let pose = self.posture.advance(dt);
        self.capsule.set_height(pose.height);

        // Stamina
        if !snapshot.sprint {
            self.stamina.regenerate(self.config.stamina_regen_rate, dt);
        }

        ground.advance_air_time(dt);
        self.ground = ground;

        let report = TickReport {
            tick: self.ticks,
            displacement: self.world.position() - start,
            grounded: ground.is_grounded,
            jumped,
            mode,
            landing,
            posture_toggled,
            pose,
            stamina: self.stamina.current(),
        };
        log::trace!("{report:?}");
        report
    }

    fn idle_report(&self) -> TickReport {
        TickReport {
            tick: self.ticks,
            grounded: self.ground.is_grounded,
            pose: self.posture.pose(),
            stamina: self.stamina.current(),
            ..Default::default()
        }
    }

    // ========================================================================
    // Heading
    // ========================================================================

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Set the yaw defining forward, wrapped to (-PI, PI].
    pub fn set_heading(&mut self, yaw: f32) {
        if !yaw.is_finite() {
            return;
        }
        self.heading = wrap_angle(yaw);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn position(&self) -> Vec3 {
        self.world.position()
    }

    /// Camera height above the feet.
    pub fn camera_height(&self) -> f32 {
        self.posture.pose().camera_y
    }

    pub fn pose(&self) -> Pose {
        self.posture.pose()
    }

    pub fn posture(&self) -> &PostureController {
        &self.posture
    }

    pub fn capsule(&self) -> &Capsule {
        &self.capsule
    }

    pub fn velocity(&self) -> &VelocityState {
        &self.velocity
    }

    /// Overwrite velocity, e.g. for knockback.
    pub fn set_velocity(&mut self, velocity: VelocityState) {
        self.velocity = velocity;
    }

    pub fn ground(&self) -> &GroundState {
        &self.ground
    }

    pub fn stamina(&self) -> &StaminaPool {
        &self.stamina
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
