//! World collaborator traits.
//!
//! The locomotion core never touches geometry directly. It asks a
//! [`WorldQuery`] about support and slopes, and asks a [`WorldMover`] to
//! translate the character. Queries are read-only; `move_by` is the only
//! operation that changes where the character is.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::ContentFlags;

use super::capsule::Capsule;

/// A ray hit returned by [`WorldQuery::raycast_down`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

/// Read-only world queries used for ground sensing.
pub trait WorldQuery {
    /// Whether a capsule with its base at `position` rests on geometry.
    fn is_grounded(&self, position: Vec3, capsule: &Capsule) -> bool;

    /// Cast a ray straight down from `origin`.
    fn raycast_down(&self, origin: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Whether a sphere touches anything matching `mask`.
    fn sphere_overlap(&self, point: Vec3, radius: f32, mask: ContentFlags) -> bool;
}

/// Collision-aware translation of a character.
///
/// After `move_by` returns, the next [`WorldQuery`] call must observe the
/// new position.
pub trait WorldMover: WorldQuery {
    /// Current position of the capsule base.
    fn position(&self) -> Vec3;

    /// Translate the capsule by `displacement`, resolving collisions.
    fn move_by(&mut self, displacement: Vec3, capsule: &Capsule);
}
