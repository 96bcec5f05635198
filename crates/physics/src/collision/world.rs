//! Collision world containing static brush geometry.
//!
//! The world is built once and then only queried; it can be shared between
//! any number of bodies.

use glam::{Quat, Vec3};
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{contact, intersection_test, Ray};
use parry3d::shape::SharedShape;

use super::flags::ContentFlags;
use super::trace::{TraceResult, TraceShape};

/// Penetration depth below which two shapes are considered touching rather
/// than overlapping.
const TOUCH_TOLERANCE: f32 = 1.0e-4;

/// Gap a trace leaves between the shape and the surface it stopped on.
const SURFACE_SKIN: f32 = 0.01;

/// Binary search iterations for shape traces.
const TRACE_ITERATIONS: usize = 14;

/// A piece of collision geometry.
#[derive(Debug, Clone)]
pub struct CollisionBrush {
    pub id: u32,
    pub shape: SharedShape,
    pub transform: Isometry<Real>,
    pub contents: ContentFlags,
}

/// Static collision geometry with trace, raycast and overlap queries.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: u32,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-aligned box.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, contents: ContentFlags) -> u32 {
        self.add_oriented_box(center, half_extents, Quat::IDENTITY, contents)
    }

    /// Add a rotated box. Ramps are oriented boxes tilted about a horizontal axis.
    pub fn add_oriented_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        rotation: Quat,
        contents: ContentFlags,
    ) -> u32 {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let (axis, angle) = rotation.to_axis_angle();
        let scaled_axis = axis * angle;
        let transform = Isometry::new(
            Vector::new(center.x, center.y, center.z),
            Vector::new(scaled_axis.x, scaled_axis.y, scaled_axis.z),
        );
        self.push(shape, transform, contents)
    }

    /// Add a convex hull. Returns `None` if the points are degenerate.
    pub fn add_convex_hull(&mut self, points: &[Vec3], contents: ContentFlags) -> Option<u32> {
        let shape = SharedShape::convex_hull(&to_points(points))?;
        Some(self.push(shape, Isometry::identity(), contents))
    }

    /// Add a triangle mesh. Returns `None` if the mesh is invalid.
    pub fn add_triangle_mesh(
        &mut self,
        vertices: &[Vec3],
        indices: &[[u32; 3]],
        contents: ContentFlags,
    ) -> Option<u32> {
        let shape = SharedShape::trimesh(to_points(vertices), indices.to_vec()).ok()?;
        Some(self.push(shape, Isometry::identity(), contents))
    }

    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Sweep `shape` from `start` to `end`.
    pub fn trace(&self, start: Vec3, end: Vec3, shape: TraceShape, mask: ContentFlags) -> TraceResult {
        let delta = end - start;
        if delta.length_squared() < 1.0e-8 {
            return if self.point_in_solid(start, shape, mask) {
                TraceResult {
                    fraction: 0.0,
                    end_position: start,
                    hit_normal: Some(Vec3::Y),
                    hit_contents: ContentFlags::SOLID,
                    started_in_solid: true,
                    all_solid: true,
                }
            } else {
                TraceResult::no_hit(start)
            };
        }

        let started_in_solid = self.point_in_solid(start, shape, mask);
        if !self.point_in_solid(end, shape, mask) {
            let mut result = TraceResult::no_hit(end);
            result.started_in_solid = started_in_solid;
            return result;
        }

        // Bisect for the last clear fraction.
        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;
        for _ in 0..TRACE_ITERATIONS {
            let mid = (lo + hi) * 0.5;
            if self.point_in_solid(start + delta * mid, shape, mask) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let blocked = start + delta * hi;
        let push = self.resolve_penetration(blocked, shape, mask) - blocked;
        let hit_normal = if push.length_squared() > 1.0e-10 {
            push.normalize()
        } else {
            let back = -delta.normalize();
            let horizontal = Vec3::new(back.x, 0.0, back.z);
            if horizontal.length_squared() > 0.1 {
                horizontal.normalize()
            } else {
                Vec3::Y
            }
        };

        let contact_position = start + delta * lo;
        let backed_off = back_off(contact_position, delta, hit_normal, lo);
        let end_position = if self.point_in_solid(backed_off, shape, mask) {
            contact_position
        } else {
            backed_off
        };

        TraceResult {
            fraction: lo,
            end_position,
            hit_normal: Some(hit_normal),
            hit_contents: ContentFlags::SOLID,
            started_in_solid,
            all_solid: started_in_solid && lo < 0.001,
        }
    }

    /// Cast a ray and return the closest hit within `max_distance`.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: ContentFlags,
    ) -> TraceResult {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || max_distance <= 0.0 {
            return TraceResult::no_hit(origin);
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let closest = self
            .brushes
            .iter()
            .filter(|brush| mask.intersects(brush.contents))
            .filter_map(|brush| {
                brush
                    .shape
                    .cast_ray_and_get_normal(&brush.transform, &ray, max_distance, true)
                    .map(|hit| (hit, brush.contents))
            })
            .min_by(|(a, _), (b, _)| a.time_of_impact.total_cmp(&b.time_of_impact));

        match closest {
            Some((hit, contents)) => {
                let normal = Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z);
                // A ray starting inside a solid reports a zero normal.
                let normal = if normal.length_squared() > 1.0e-6 {
                    normal.normalize()
                } else {
                    -dir
                };
                TraceResult {
                    fraction: hit.time_of_impact / max_distance,
                    end_position: origin + dir * hit.time_of_impact,
                    hit_normal: Some(normal),
                    hit_contents: contents,
                    started_in_solid: hit.time_of_impact == 0.0,
                    all_solid: false,
                }
            }
            None => TraceResult::no_hit(origin + dir * max_distance),
        }
    }

    /// Whether `shape` placed at `position` penetrates any masked brush.
    ///
    /// Shapes that merely touch a surface are not in solid.
    pub fn point_in_solid(&self, position: Vec3, shape: TraceShape, mask: ContentFlags) -> bool {
        let test_shape = parry_shape(shape);
        let test_transform = shape_transform(position, shape);

        self.brushes
            .iter()
            .filter(|brush| mask.intersects(brush.contents))
            .any(|brush| {
                matches!(
                    contact(
                        &test_transform,
                        test_shape.as_ref(),
                        &brush.transform,
                        brush.shape.as_ref(),
                        0.0,
                    ),
                    Ok(Some(c)) if c.dist < -TOUCH_TOLERANCE
                )
            })
    }

    /// Whether a sphere at `center` touches or overlaps any masked brush.
    pub fn sphere_overlap(&self, center: Vec3, radius: f32, mask: ContentFlags) -> bool {
        let ball = SharedShape::ball(radius.max(0.0));
        let transform = Isometry::translation(center.x, center.y, center.z);

        self.brushes
            .iter()
            .filter(|brush| mask.intersects(brush.contents))
            .any(|brush| {
                intersection_test(&transform, ball.as_ref(), &brush.transform, brush.shape.as_ref())
                    .unwrap_or(false)
            })
    }

    /// Push `shape` out of any masked brush it penetrates.
    ///
    /// Returns the corrected position.
    pub fn resolve_penetration(&self, position: Vec3, shape: TraceShape, mask: ContentFlags) -> Vec3 {
        let test_shape = parry_shape(shape);
        let test_transform = shape_transform(position, shape);

        let correction: Vec3 = self
            .brushes
            .iter()
            .filter(|brush| mask.intersects(brush.contents))
            .filter_map(|brush| {
                contact(
                    &test_transform,
                    test_shape.as_ref(),
                    &brush.transform,
                    brush.shape.as_ref(),
                    0.0,
                )
                .ok()
                .flatten()
            })
            .filter(|c| c.dist < -TOUCH_TOLERANCE)
            .map(|c| {
                // normal1 points from our shape toward the brush.
                let normal = Vec3::new(c.normal1.x, c.normal1.y, c.normal1.z);
                -normal * (-c.dist + 0.001)
            })
            .sum();

        position + correction
    }

    fn push(&mut self, shape: SharedShape, transform: Isometry<Real>, contents: ContentFlags) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            contents,
        });
        id
    }
}

/// Step back from a contact so the shape ends [`SURFACE_SKIN`] clear of the
/// surface along `normal`.
///
/// Backs up along the travelled path first, never past the trace start, and
/// makes up any shortfall along the normal.
fn back_off(contact_position: Vec3, delta: Vec3, normal: Vec3, fraction: f32) -> Vec3 {
    let length = delta.length();
    let direction = delta / length;
    let facing = -direction.dot(normal);

    if facing <= 0.1 {
        return contact_position + normal * SURFACE_SKIN;
    }

    let along = (SURFACE_SKIN / facing).min(length * fraction);
    let gap = along * facing;
    contact_position - direction * along + normal * (SURFACE_SKIN - gap).max(0.0)
}

fn to_points(points: &[Vec3]) -> Vec<Point<Real>> {
    points.iter().map(|p| Point::new(p.x, p.y, p.z)).collect()
}

fn parry_shape(shape: TraceShape) -> SharedShape {
    match shape {
        TraceShape::Capsule { radius, height } => {
            let cylinder_half_height = (height - 2.0 * radius).max(0.0) / 2.0;
            SharedShape::capsule_y(cylinder_half_height, radius)
        }
        TraceShape::Sphere { radius } => SharedShape::ball(radius),
        TraceShape::Point => SharedShape::ball(0.001),
    }
}

fn shape_transform(position: Vec3, shape: TraceShape) -> Isometry<Real> {
    let center = position + shape.center_offset();
    Isometry::translation(center.x, center.y, center.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPSULE: TraceShape = TraceShape::Capsule {
        radius: 0.4,
        height: 1.8,
    };

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor with its top at y=0
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            ContentFlags::SOLID,
        );

        // Wall at x=10
        world.add_box(
            Vec3::new(10.0, 2.5, 0.0),
            Vec3::new(0.5, 2.5, 10.0),
            ContentFlags::SOLID,
        );

        world
    }

    #[test]
    fn test_raycast_hit() {
        let world = create_test_world();
        let result = world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 100.0, ContentFlags::SOLID);

        assert!(result.hit_something());
        assert!((result.end_position.x - 9.5).abs() < 0.01);
        let normal = result.hit_normal.unwrap();
        assert!((normal - Vec3::NEG_X).length() < 0.01, "normal={normal:?}");
    }

    #[test]
    fn test_raycast_miss() {
        let world = create_test_world();
        let result = world.raycast(Vec3::new(0.0, 1.0, 0.0), -Vec3::X, 100.0, ContentFlags::SOLID);
        assert!(!result.hit_something());
    }

    #[test]
    fn test_raycast_down_reports_floor_normal() {
        let world = create_test_world();
        let result = world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 1.1, ContentFlags::SOLID);

        assert!(result.hit_something());
        assert!((result.fraction * 1.1 - 1.0).abs() < 0.001);
        assert!((result.normal_or_up() - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_raycast_reports_ramp_normal() {
        let mut world = CollisionWorld::new();
        let tilt = Quat::from_rotation_z(50f32.to_radians());
        world.add_oriented_box(Vec3::ZERO, Vec3::new(5.0, 0.5, 5.0), tilt, ContentFlags::SOLID);

        let result = world.raycast(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, 10.0, ContentFlags::SOLID);
        let normal = result.normal_or_up();
        let angle = normal.angle_between(Vec3::Y).to_degrees();
        assert!((angle - 50.0).abs() < 0.1, "angle={angle}");
    }

    #[test]
    fn test_trace_capsule_stops_before_wall() {
        let world = create_test_world();
        let result = world.trace(
            Vec3::new(0.0, 0.1, 0.0),
            Vec3::new(15.0, 0.1, 0.0),
            CAPSULE,
            ContentFlags::SOLID,
        );

        assert!(result.hit_something());
        // Wall face at 9.5, capsule radius 0.4, minus the skin
        assert!((result.end_position.x - 9.09).abs() < 0.005, "x={}", result.end_position.x);
        assert!(result.normal_or_up().x < -0.9);
    }

    #[test]
    fn test_capsule_resting_on_floor_is_not_in_solid() {
        let world = create_test_world();
        assert!(!world.point_in_solid(Vec3::ZERO, CAPSULE, ContentFlags::SOLID));
        assert!(world.point_in_solid(Vec3::new(0.0, -0.1, 0.0), CAPSULE, ContentFlags::SOLID));
    }

    #[test]
    fn test_trace_down_lands_on_floor() {
        let world = create_test_world();
        let result = world.trace(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            CAPSULE,
            ContentFlags::SOLID,
        );

        assert!(result.hit_something());
        assert!((result.end_position.y - SURFACE_SKIN).abs() < 0.005, "y={}", result.end_position.y);
        assert!(result.normal_or_up().y > 0.99);
    }

    #[test]
    fn test_trace_leaves_room_to_move_along_surface() {
        let mut world = CollisionWorld::new();
        world.add_oriented_box(
            Vec3::ZERO,
            Vec3::new(10.0, 0.5, 5.0),
            Quat::from_rotation_z(20f32.to_radians()),
            ContentFlags::SOLID,
        );

        let drop = world.trace(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -1.0, 0.0), CAPSULE, ContentFlags::SOLID);
        assert!(drop.hit_something());
        let resting = drop.end_position;
        assert!(!world.point_in_solid(resting, CAPSULE, ContentFlags::SOLID));

        // Uphill moves still make headway from the resting spot
        let uphill = world.trace(resting, resting + Vec3::new(0.08, 0.0, 0.0), CAPSULE, ContentFlags::SOLID);
        assert!(uphill.fraction > 0.1, "fraction={}", uphill.fraction);

        let normal = uphill.normal_or_up();
        let tangent = Vec3::new(normal.y, -normal.x, 0.0) * 0.08;
        let along = world.trace(uphill.end_position, uphill.end_position + tangent, CAPSULE, ContentFlags::SOLID);
        assert!(!along.hit_something(), "blocked along the surface: {along:?}");
    }

    #[test]
    fn test_sphere_overlap() {
        let world = create_test_world();
        assert!(world.sphere_overlap(Vec3::new(0.0, 0.1, 0.0), 0.2, ContentFlags::SOLID));
        assert!(!world.sphere_overlap(Vec3::new(0.0, 0.5, 0.0), 0.2, ContentFlags::SOLID));
    }

    #[test]
    fn test_content_mask_filtering() {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(5.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 5.0), ContentFlags::SOLID);
        world.add_box(Vec3::new(3.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 5.0), ContentFlags::TRIGGER);

        let result = world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 100.0, ContentFlags::SOLID);

        // Should hit the wall at x=4.5, not the trigger at x=2.5
        assert!((result.end_position.x - 4.5).abs() < 0.01);
        assert!(!world.sphere_overlap(Vec3::new(3.0, 1.0, 0.0), 0.1, ContentFlags::SOLID));
        assert!(world.sphere_overlap(Vec3::new(3.0, 1.0, 0.0), 0.1, ContentFlags::TRIGGER));
    }

    #[test]
    fn test_convex_hull_blocks_rays() {
        let mut world = CollisionWorld::new();
        let hull = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        assert!(world.add_convex_hull(&hull, ContentFlags::SOLID).is_some());
        assert_eq!(world.brush_count(), 1);

        let result = world.raycast(Vec3::new(0.1, 5.0, 0.1), Vec3::NEG_Y, 10.0, ContentFlags::SOLID);
        assert!(result.hit_something());
        assert!(result.end_position.y < 1.0 && result.end_position.y > 0.5);
    }
}
