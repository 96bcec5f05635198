//! Slide move for collision response.
//!
//! Moves a shape along a displacement, clipping the remaining motion against
//! every surface it touches so the shape glides along walls and floors
//! instead of stopping dead.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;
use super::trace::TraceShape;
use super::world::CollisionWorld;

/// Upper bound on the number of planes tracked during one slide.
const MAX_CLIP_PLANES: usize = 5;

/// Tuning for [`slide_move`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlideParams {
    /// Maximum trace iterations per move.
    pub max_iterations: usize,

    /// Overbounce factor for clipping (slightly above 1 prevents sticking).
    pub overbounce: f32,

    /// Content mask the shape collides with.
    pub mask: ContentFlags,
}

impl Default for SlideParams {
    fn default() -> Self {
        Self {
            max_iterations: 4,
            overbounce: 1.001,
            mask: ContentFlags::MASK_CHARACTER_SOLID,
        }
    }
}

/// Outcome of a slide move.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlideOutcome {
    /// Whether any surface was touched.
    pub collided: bool,

    /// Whether a touched surface faced upward (normal.y > 0.7).
    pub touched_floor: bool,

    /// Displacement actually applied.
    pub applied: Vec3,
}

/// Remove the component of `motion` going into the surface with `normal`.
pub fn clip_velocity(motion: Vec3, normal: Vec3, overbounce: f32) -> Vec3 {
    let backoff = motion.dot(normal);
    let adjusted = if backoff < 0.0 {
        backoff * overbounce
    } else {
        backoff / overbounce
    };
    motion - normal * adjusted
}

/// Move `shape` from `position` by `displacement`, sliding along surfaces.
pub fn slide_move(
    world: &CollisionWorld,
    position: &mut Vec3,
    displacement: Vec3,
    shape: TraceShape,
    params: &SlideParams,
) -> SlideOutcome {
    let start = *position;
    let mut outcome = SlideOutcome::default();
    let mut remaining = displacement;
    let mut planes = [Vec3::ZERO; MAX_CLIP_PLANES];
    let mut num_planes = 0;

    for _ in 0..params.max_iterations.min(MAX_CLIP_PLANES) {
        if remaining.length_squared() < 1.0e-10 {
            break;
        }

        let target = *position + remaining;
        let trace = world.trace(*position, target, shape, params.mask);
        *position = trace.end_position;

        if !trace.hit_something() {
            break;
        }

        outcome.collided = true;
        if trace.all_solid {
            break;
        }

        let normal = trace.normal_or_up();
        if normal.y > 0.7 {
            outcome.touched_floor = true;

            // A straight drop rests on floors instead of sliding down them.
            if remaining.x.abs() < 1.0e-6 && remaining.z.abs() < 1.0e-6 {
                break;
            }
        }

        // Unmet displacement, including what the skin gave back.
        remaining = target - *position;
        if num_planes < MAX_CLIP_PLANES {
            planes[num_planes] = normal;
            num_planes += 1;
        }

        // Find a clipped motion that does not push into any touched plane.
        let candidate = planes[..num_planes].iter().find_map(|&plane| {
            let clipped = clip_velocity(remaining, plane, params.overbounce);
            let valid = planes[..num_planes]
                .iter()
                .all(|&other| other == plane || clipped.dot(other) >= -0.001);
            valid.then_some(clipped)
        });

        remaining = match candidate {
            Some(clipped) => clipped,
            None if num_planes >= 2 => {
                // Slide along the crease between the first two planes.
                let crease = planes[0].cross(planes[1]).normalize_or_zero();
                crease * remaining.dot(crease)
            }
            None => Vec3::ZERO,
        };
    }

    outcome.applied = *position - start;
    outcome
}
