//! Character collision capsule.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::TraceShape;

/// The character's collision volume.
///
/// Positions are measured at the capsule base; the center sits half the
/// height above it. Resizing keeps that relation, so the base stays planted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    height: f32,
    radius: f32,
    center: Vec3,
}

impl Capsule {
    pub fn new(height: f32, radius: f32) -> Self {
        Self {
            height,
            radius,
            center: Vec3::new(0.0, height / 2.0, 0.0),
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Offset from the base to the capsule center.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Resize the capsule, re-centering it over the base.
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        self.center.y = height / 2.0;
    }

    /// World-space center for a base at `position`.
    pub fn world_center(&self, position: Vec3) -> Vec3 {
        position + self.center
    }

    /// Shape for collision traces.
    pub fn shape(&self) -> TraceShape {
        TraceShape::Capsule {
            radius: self.radius,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_tracks_height() {
        let mut capsule = Capsule::new(2.0, 0.5);
        assert_eq!(capsule.center().y, 1.0);

        capsule.set_height(1.3);
        assert_eq!(capsule.center().y, capsule.height() / 2.0);
        assert_eq!(capsule.half_height(), 0.65);
        assert_eq!(capsule.world_center(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.65, 3.0));
    }
}
