//! Per-tick input intent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Immutable intent for one tick.
///
/// Axes follow the usual stick convention: `move_axis.x` strafes right,
/// `move_axis.y` moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Movement axes, each in [-1, 1].
    pub move_axis: Vec2,

    /// Look delta for this tick.
    pub look_axis: Vec2,

    /// A jump has been requested and not yet acknowledged.
    pub jump: bool,

    /// Crouch button held.
    pub crouch: bool,

    /// Sprint button held.
    pub sprint: bool,
}

impl InputSnapshot {
    /// Snapshot that only moves.
    pub fn moving(x: f32, y: f32) -> Self {
        Self {
            move_axis: Vec2::new(x, y),
            ..Default::default()
        }
    }

    /// Copy with movement axes clamped to [-1, 1] and non-finite values zeroed.
    pub fn sanitized(self) -> Self {
        let axis = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        let look = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            move_axis: Vec2::new(axis(self.move_axis.x), axis(self.move_axis.y)),
            look_axis: Vec2::new(look(self.look_axis.x), look(self.look_axis.y)),
            ..self
        }
    }

    /// Check if any movement input is active.
    #[inline]
    pub fn has_move_intent(&self) -> bool {
        self.move_axis.length_squared() > 1.0e-6
    }
}

/// A pull-based input provider, polled once per tick.
///
/// Jump is edge-triggered: the provider keeps reporting a requested jump
/// until the core calls [`InputSource::acknowledge_jump`], so one press
/// yields exactly one jump.
pub trait InputSource {
    fn snapshot(&self) -> InputSnapshot;

    /// Mark the pending jump as consumed.
    fn acknowledge_jump(&mut self);
}

/// A bare snapshot is a source whose jump clears once consumed.
impl InputSource for InputSnapshot {
    fn snapshot(&self) -> InputSnapshot {
        *self
    }

    fn acknowledge_jump(&mut self) {
        self.jump = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_clamps_axes() {
        let snapshot = InputSnapshot {
            move_axis: Vec2::new(3.0, f32::NAN),
            look_axis: Vec2::new(f32::INFINITY, 4.0),
            ..Default::default()
        }
        .sanitized();

        assert_eq!(snapshot.move_axis, Vec2::new(1.0, 0.0));
        assert_eq!(snapshot.look_axis, Vec2::new(0.0, 4.0));
    }

    #[test]
    fn test_snapshot_source_clears_jump_on_acknowledge() {
        let mut source = InputSnapshot {
            jump: true,
            ..InputSnapshot::moving(0.0, 1.0)
        };
        assert!(source.snapshot().jump);

        source.acknowledge_jump();
        assert!(!source.snapshot().jump);
        assert!(source.snapshot().has_move_intent());
    }
}
