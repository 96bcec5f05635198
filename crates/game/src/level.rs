//! Test levels.

use std::sync::Arc;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use strider_physics::{CollisionWorld, ContentFlags};

/// A level: collision geometry plus spawn points.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Collision world shared by every body in the level.
    pub collision: Arc<CollisionWorld>,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// Where a character enters the level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Position in world space.
    pub position: Vec3,

    /// Initial facing direction (yaw in radians).
    pub facing: f32,
}

impl Level {
    /// Create a level from finished geometry.
    pub fn new(id: &str, collision: CollisionWorld) -> Self {
        Self {
            id: id.to_string(),
            collision: Arc::new(collision),
            spawn_points: Vec::new(),
        }
    }

    /// A movement test course along +X.
    ///
    /// Flat floor, a walkable 20 degree ramp, a 60 degree slide ramp, and a
    /// 1.5m ledge to drop off.
    pub fn test_course() -> Self {
        let mut world = CollisionWorld::new();

        // Floor
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(60.0, 0.5, 60.0),
            ContentFlags::SOLID,
        );

        // Boundary walls
        let wall_height = 5.0;
        for (center, half_extents) in [
            (Vec3::new(0.0, wall_height / 2.0, -60.0), Vec3::new(60.0, wall_height / 2.0, 0.5)),
            (Vec3::new(0.0, wall_height / 2.0, 60.0), Vec3::new(60.0, wall_height / 2.0, 0.5)),
            (Vec3::new(60.0, wall_height / 2.0, 0.0), Vec3::new(0.5, wall_height / 2.0, 60.0)),
            (Vec3::new(-60.0, wall_height / 2.0, 0.0), Vec3::new(0.5, wall_height / 2.0, 60.0)),
        ] {
            world.add_box(center, half_extents, ContentFlags::SOLID);
        }

        // Walkable ramp rising toward +X
        world.add_oriented_box(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(4.0, 0.5, 3.0),
            Quat::from_rotation_z(20.0_f32.to_radians()),
            ContentFlags::SOLID,
        );

        // Slide ramp, well off the walking line
        world.add_oriented_box(
            Vec3::new(10.0, 0.0, 20.0),
            Vec3::new(3.0, 0.5, 3.0),
            Quat::from_rotation_z(60.0_f32.to_radians()),
            ContentFlags::SOLID,
        );

        // Ledge platform with its top at 1.5m
        world.add_box(
            Vec3::new(-20.0, 0.75, 0.0),
            Vec3::new(4.0, 0.75, 4.0),
            ContentFlags::SOLID,
        );

        let mut level = Self::new("test_course", world);
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(0.0, 0.0, 0.0),
            facing: 0.0,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(-20.0, 1.5, 0.0),
            facing: std::f32::consts::PI,
        });
        level
    }

    /// Get a spawn point, wrapping around.
    pub fn spawn_point(&self, index: usize) -> Option<&SpawnPoint> {
        if self.spawn_points.is_empty() {
            return None;
        }
        self.spawn_points.get(index % self.spawn_points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_physics::{Capsule, InputSnapshot, KinematicBody, LocomotionConfig, LocomotionCore};

    const DT: f32 = 1.0 / 60.0;

    fn core_on_course(level: &Level, spawn: Vec3) -> LocomotionCore<KinematicBody> {
        let config = LocomotionConfig::default();
        let mut body = KinematicBody::new(Arc::clone(&level.collision), spawn);
        assert!(body.spawn_at(spawn, &Capsule::new(config.standing_height, config.radius)));
        LocomotionCore::new(config, body).unwrap()
    }

    #[test]
    fn test_test_course() {
        let level = Level::test_course();
        assert!(level.collision.brush_count() >= 8);
        assert_eq!(level.spawn_points.len(), 2);
    }

    #[test]
    fn test_spawn_point_wraps() {
        let level = Level::test_course();
        assert_eq!(level.spawn_point(2).map(|s| s.position), Some(Vec3::ZERO));
        assert!(Level::new("empty", CollisionWorld::new()).spawn_point(0).is_none());
    }

    #[test]
    fn test_ledge_is_walkable_ground() {
        let level = Level::test_course();
        let hit = level
            .collision
            .raycast(Vec3::new(-20.0, 5.0, 0.0), Vec3::NEG_Y, 10.0, ContentFlags::SOLID);

        assert!(hit.hit_something());
        assert!((hit.end_position.y - 1.5).abs() < 0.01);
    }

    #[test]
    fn test_walks_over_walkable_ramp() {
        let level = Level::test_course();
        let mut core = core_on_course(&level, Vec3::new(2.0, 0.5, 0.0));
        let mut forward = InputSnapshot::moving(0.0, 1.0);

        let mut highest = core.position().y;
        for _ in 0..240 {
            core.tick(&mut forward, DT);
            highest = highest.max(core.position().y);
        }

        // Crest of the ramp sits near x=13.6, y=1.8
        let position = core.position();
        assert!(highest > 1.2, "never climbed, highest y={highest}");
        assert!(position.x > 14.0, "stalled at {position:?}");
    }

    #[test]
    fn test_slides_down_steep_ramp() {
        let level = Level::test_course();
        let mut core = core_on_course(&level, Vec3::new(10.0, 2.0, 20.0));
        let start = core.position();
        let mut idle = InputSnapshot::default();

        let mut on_slope = 0;
        for _ in 0..60 {
            core.tick(&mut idle, DT);
            if core.ground().slope.is_some() {
                on_slope += 1;
            }
        }

        let end = core.position();
        assert!(on_slope >= 30, "slope seen on {on_slope} ticks");
        // Downhill is -X on this ramp
        assert!(end.x < start.x - 0.1, "x {} -> {}", start.x, end.x);
        assert!(end.y < start.y - 0.1, "y {} -> {}", start.y, end.y);
    }
}
