//! Analytic ground plane at y=0 for unit tests.

use glam::Vec3;

use crate::collision::ContentFlags;

use super::capsule::Capsule;
use super::query::{RayHit, WorldMover, WorldQuery};

/// Infinite ground at y=0 with a configurable surface normal.
#[derive(Debug, Clone)]
pub(crate) struct FlatGround {
    pub position: Vec3,
    pub normal: Vec3,
    pub moves: usize,
}

impl FlatGround {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::Y,
            moves: 0,
        }
    }

    /// Ground reporting a slope of `degrees` leaning toward +X.
    pub fn tilted(position: Vec3, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Self {
            normal: Vec3::new(radians.sin(), radians.cos(), 0.0),
            ..Self::at(position)
        }
    }
}

impl WorldQuery for FlatGround {
    fn is_grounded(&self, position: Vec3, _capsule: &Capsule) -> bool {
        position.y <= 1.0e-4
    }

    fn raycast_down(&self, origin: Vec3, max_distance: f32) -> Option<RayHit> {
        (origin.y >= 0.0 && origin.y <= max_distance).then_some(RayHit {
            distance: origin.y,
            normal: self.normal,
        })
    }

    fn sphere_overlap(&self, point: Vec3, radius: f32, _mask: ContentFlags) -> bool {
        point.y <= radius
    }
}

impl WorldMover for FlatGround {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, displacement: Vec3, _capsule: &Capsule) {
        self.moves += 1;
        self.position += displacement;
        self.position.y = self.position.y.max(0.0);
    }
}
