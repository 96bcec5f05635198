//! Ground sensing.
//!
//! Support contact comes from the world's ground test; slope geometry from
//! a ray cast down the capsule's axis.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::capsule::Capsule;
use super::query::WorldQuery;

/// A slope steep enough to force sliding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeContact {
    pub normal: Vec3,
    /// Angle between the normal and up (degrees).
    pub angle_degrees: f32,
    /// Downhill slide velocity, scaled by steepness.
    pub slide: Vec3,
}

/// Support state, refreshed every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundState {
    pub is_grounded: bool,
    pub was_grounded_last_frame: bool,
    /// Seconds since the character last touched ground.
    pub air_time: f32,
    /// Present only on steep ground this tick.
    pub slope: Option<SlopeContact>,
}

impl GroundState {
    /// Grounded this tick after being airborne.
    pub fn just_landed(&self) -> bool {
        self.is_grounded && !self.was_grounded_last_frame
    }

    pub fn just_left_ground(&self) -> bool {
        !self.is_grounded && self.was_grounded_last_frame
    }

    /// Accumulate air time, resetting once grounded.
    pub fn advance_air_time(&mut self, dt: f32) {
        if self.is_grounded {
            self.air_time = 0.0;
        } else {
            self.air_time += dt;
        }
    }
}

/// Probes the world under the capsule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSensor {
    pub slope_limit_degrees: f32,
    pub probe_epsilon: f32,
}

impl GroundSensor {
    pub fn new(slope_limit_degrees: f32, probe_epsilon: f32) -> Self {
        Self {
            slope_limit_degrees,
            probe_epsilon,
        }
    }

    /// Build the ground state for a capsule based at `position`.
    ///
    /// `was_grounded_last_frame` and `air_time` carry over from `previous`.
    pub fn probe<W: WorldQuery + ?Sized>(
        &self,
        world: &W,
        position: Vec3,
        capsule: &Capsule,
        previous: &GroundState,
    ) -> GroundState {
        let is_grounded = world.is_grounded(position, capsule);
        let slope = if is_grounded {
            self.steep_slope(world, position, capsule)
        } else {
            None
        };

        GroundState {
            is_grounded,
            was_grounded_last_frame: previous.is_grounded,
            air_time: previous.air_time,
            slope,
        }
    }

    /// Cast down from the capsule center and report steep ground.
    pub fn steep_slope<W: WorldQuery + ?Sized>(
        &self,
        world: &W,
        position: Vec3,
        capsule: &Capsule,
    ) -> Option<SlopeContact> {
        let origin = capsule.world_center(position);
        let hit = world.raycast_down(origin, capsule.half_height() + self.probe_epsilon)?;

        let normal = hit.normal.normalize_or_zero();
        if normal == Vec3::ZERO {
            return None;
        }

        let angle_degrees = normal.angle_between(Vec3::Y).to_degrees();
        if angle_degrees <= self.slope_limit_degrees {
            return None;
        }

        Some(SlopeContact {
            normal,
            angle_degrees,
            slide: slide_vector(normal, angle_degrees),
        })
    }
}

/// Gravity projected onto the slope plane, scaled by `angle / 90`.
pub fn slide_vector(normal: Vec3, angle_degrees: f32) -> Vec3 {
    let down = Vec3::NEG_Y;
    let along = down - normal * down.dot(normal);
    along.normalize_or_zero() * (angle_degrees / 90.0)
}
