//! Kinematic character body.
//!
//! A capsule base position inside a shared [`CollisionWorld`]. The body
//! answers the locomotion core's world queries and realises its move
//! requests with [`slide_move`].

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;
use super::slide::{slide_move, SlideOutcome, SlideParams};
use super::trace::TraceShape;
use super::world::CollisionWorld;
use crate::locomotion::{Capsule, RayHit, WorldMover, WorldQuery};

/// Tuning for a [`KinematicBody`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyParams {
    /// How far below the base the ground contact test reaches.
    pub ground_skin: f32,

    /// Slide move tuning.
    pub slide: SlideParams,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            ground_skin: 0.05,
            slide: SlideParams::default(),
        }
    }
}

/// A capsule moved through a static world.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    world: Arc<CollisionWorld>,
    position: Vec3,
    params: BodyParams,
    last_move: SlideOutcome,
}

impl KinematicBody {
    pub fn new(world: Arc<CollisionWorld>, position: Vec3) -> Self {
        Self::with_params(world, position, BodyParams::default())
    }

    pub fn with_params(world: Arc<CollisionWorld>, position: Vec3, params: BodyParams) -> Self {
        Self {
            world,
            position,
            params,
            last_move: SlideOutcome::default(),
        }
    }

    /// Seat the body on whatever lies below `spawn`.
    ///
    /// Traces the capsule from one unit above the spawn point to two below.
    /// Returns whether ground was found; without it the body is placed at
    /// `spawn` unchanged.
    pub fn spawn_at(&mut self, spawn: Vec3, capsule: &Capsule) -> bool {
        let start = spawn + Vec3::new(0.0, 1.0, 0.0);
        let end = spawn - Vec3::new(0.0, 2.0, 0.0);

        let trace = self.world.trace(start, end, capsule.shape(), self.params.slide.mask);
        self.last_move = SlideOutcome::default();

        if trace.hit_something() && !trace.all_solid {
            self.position = trace.end_position;
            log::debug!("Spawned on ground at {:?}", self.position);
            true
        } else {
            self.position = spawn;
            log::debug!("No ground below spawn {:?}", spawn);
            false
        }
    }

    /// Teleport without collision.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn world(&self) -> &Arc<CollisionWorld> {
        &self.world
    }

    pub fn params(&self) -> &BodyParams {
        &self.params
    }

    /// Result of the most recent `move_by`.
    pub fn last_move(&self) -> SlideOutcome {
        self.last_move
    }
}

impl WorldQuery for KinematicBody {
    fn is_grounded(&self, position: Vec3, capsule: &Capsule) -> bool {
        let end = position - Vec3::new(0.0, self.params.ground_skin, 0.0);
        let trace = self.world.trace(position, end, capsule.shape(), self.params.slide.mask);

        if trace.all_solid {
            return true;
        }
        trace.hit_something() && trace.normal_or_up().y > 0.0
    }

    fn raycast_down(&self, origin: Vec3, max_distance: f32) -> Option<RayHit> {
        let trace = self
            .world
            .raycast(origin, Vec3::NEG_Y, max_distance, self.params.slide.mask);

        trace.hit_something().then(|| RayHit {
            distance: trace.fraction * max_distance,
            normal: trace.normal_or_up(),
        })
    }

    fn sphere_overlap(&self, point: Vec3, radius: f32, mask: ContentFlags) -> bool {
        self.world.sphere_overlap(point, radius, mask)
    }
}

impl WorldMover for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, displacement: Vec3, capsule: &Capsule) {
        let shape: TraceShape = capsule.shape();
        self.last_move = slide_move(&self.world, &mut self.position, displacement, shape, &self.params.slide);
    }
}
