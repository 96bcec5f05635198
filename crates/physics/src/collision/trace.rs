//! Trace results and shapes for collision queries.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;

/// Result of sweeping a shape or ray through the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    /// How far along the path the shape got before hitting something.
    ///
    /// - `1.0` = traveled the full distance (no collision)
    /// - `0.0` = blocked immediately at start
    pub fraction: f32,

    /// Final position after the trace.
    pub end_position: Vec3,

    /// Surface normal at the impact point, pointing away from the surface.
    /// `None` if nothing was hit.
    pub hit_normal: Option<Vec3>,

    /// Content flags of what was hit.
    pub hit_contents: ContentFlags,

    /// Whether the trace started inside solid geometry.
    pub started_in_solid: bool,

    /// Whether the shape could not move at all.
    pub all_solid: bool,
}

impl Default for TraceResult {
    fn default() -> Self {
        Self::no_hit(Vec3::ZERO)
    }
}

impl TraceResult {
    /// A trace that traveled its full length.
    pub fn no_hit(end_position: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            hit_normal: None,
            hit_contents: ContentFlags::EMPTY,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// A trace that stopped at `fraction` against a surface with `normal`.
    pub fn hit(fraction: f32, end_position: Vec3, normal: Vec3) -> Self {
        Self {
            fraction,
            end_position,
            hit_normal: Some(normal),
            hit_contents: ContentFlags::SOLID,
            started_in_solid: false,
            all_solid: false,
        }
    }

    #[inline]
    pub fn hit_something(&self) -> bool {
        self.fraction < 1.0
    }

    /// The hit normal, defaulting to up if none.
    #[inline]
    pub fn normal_or_up(&self) -> Vec3 {
        self.hit_normal.unwrap_or(Vec3::Y)
    }
}

/// Shape swept by a trace.
///
/// Trace origins are the bottom-center of the shape (a character's feet),
/// except for [`TraceShape::Sphere`] and [`TraceShape::Point`] which are
/// centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TraceShape {
    /// A vertical capsule.
    Capsule {
        /// Radius of the cylinder and end caps.
        radius: f32,
        /// Total height from bottom cap to top cap.
        height: f32,
    },

    /// A sphere centered on the origin.
    Sphere { radius: f32 },

    /// A single point.
    Point,
}

impl TraceShape {
    /// Radius used for collision purposes.
    pub fn radius(&self) -> f32 {
        match self {
            Self::Capsule { radius, .. } | Self::Sphere { radius } => *radius,
            Self::Point => 0.0,
        }
    }

    /// Total height of the shape.
    pub fn height(&self) -> f32 {
        match self {
            Self::Capsule { height, .. } => *height,
            Self::Sphere { radius } => radius * 2.0,
            Self::Point => 0.0,
        }
    }

    /// Offset from the trace origin to the shape's center.
    pub fn center_offset(&self) -> Vec3 {
        match self {
            Self::Capsule { height, .. } => Vec3::new(0.0, height / 2.0, 0.0),
            Self::Sphere { .. } | Self::Point => Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_result_no_hit() {
        let result = TraceResult::no_hit(Vec3::new(10.0, 0.0, 0.0));
        assert!(!result.hit_something());
        assert_eq!(result.normal_or_up(), Vec3::Y);
    }

    #[test]
    fn test_trace_result_hit() {
        let result = TraceResult::hit(0.5, Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        assert!(result.hit_something());
        assert_eq!(result.hit_normal, Some(Vec3::X));
    }

    #[test]
    fn test_capsule_is_anchored_at_feet() {
        let capsule = TraceShape::Capsule { radius: 0.5, height: 2.0 };
        assert_eq!(capsule.center_offset(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(TraceShape::Sphere { radius: 0.2 }.center_offset(), Vec3::ZERO);
        assert_eq!(capsule.height(), 2.0);
    }
}
