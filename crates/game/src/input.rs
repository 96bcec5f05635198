//! Player input handling.
//!
//! Converts raw device state (keyboard, mouse, gamepad) into the
//! [`InputSnapshot`]s the locomotion core pulls each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strider_physics::{InputSnapshot, InputSource};

/// Raw device state for a single frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawInput {
    /// Movement keys pressed.
    pub movement: MovementKeys,

    /// Analog stick (x = right, y = forward).
    pub stick: Vec2,

    /// Mouse delta this frame.
    pub mouse_delta: Vec2,

    /// Action buttons held.
    pub buttons: ButtonState,
}

/// Movement key states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Action button states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ButtonState {
    pub jump: bool,
    pub crouch: bool,
    pub sprint: bool,
}

impl RawInput {
    /// Combined movement axes: keys plus stick, at most unit length.
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.movement.forward {
            axis.y += 1.0;
        }
        if self.movement.backward {
            axis.y -= 1.0;
        }
        if self.movement.right {
            axis.x += 1.0;
        }
        if self.movement.left {
            axis.x -= 1.0;
        }

        let stick = if self.stick.is_finite() {
            self.stick.clamp(Vec2::NEG_ONE, Vec2::ONE)
        } else {
            Vec2::ZERO
        };
        axis += stick;

        // Normalize diagonal movement
        let magnitude = axis.length();
        if magnitude > 1.0 {
            axis /= magnitude;
        }
        axis
    }

    /// Check if any movement input is active.
    pub fn has_movement(&self) -> bool {
        self.move_axis() != Vec2::ZERO
    }
}

/// Pull-based input provider with a latched jump.
///
/// A jump press latches until the core acknowledges it or the button is
/// released, so holding jump produces one jump rather than one per tick.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    raw: RawInput,
    jump_latched: bool,
    /// Previous frame's jump button (for edge detection).
    prev_jump_held: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's device state.
    pub fn update(&mut self, raw: RawInput) {
        let jump_held = raw.buttons.jump;
        if jump_held && !self.prev_jump_held {
            self.jump_latched = true;
        } else if !jump_held {
            self.jump_latched = false;
        }
        self.prev_jump_held = jump_held;
        self.raw = raw;
    }

    /// Last raw state fed in.
    pub fn raw(&self) -> &RawInput {
        &self.raw
    }

    pub fn jump_pending(&self) -> bool {
        self.jump_latched
    }
}

impl InputSource for InputHandler {
    fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            move_axis: self.raw.move_axis(),
            look_axis: self.raw.mouse_delta,
            jump: self.jump_latched,
            crouch: self.raw.buttons.crouch,
            sprint: self.raw.buttons.sprint,
        }
    }

    fn acknowledge_jump(&mut self) {
        self.jump_latched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(forward: bool, right: bool) -> RawInput {
        RawInput {
            movement: MovementKeys {
                forward,
                right,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_diagonal_keys_are_normalized() {
        let axis = keys(true, true).move_axis();

        assert!(axis.x > 0.0 && axis.x < 1.0);
        assert!(axis.y > 0.0 && axis.y < 1.0);
        assert!((axis.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_straight_movement_not_normalized() {
        assert_eq!(keys(true, false).move_axis(), Vec2::new(0.0, 1.0));
        assert!(!RawInput::default().has_movement());
    }

    #[test]
    fn test_stick_is_clamped() {
        let raw = RawInput {
            stick: Vec2::new(0.0, 4.0),
            ..Default::default()
        };
        assert_eq!(raw.move_axis(), Vec2::new(0.0, 1.0));

        let half = RawInput {
            stick: Vec2::new(0.5, 0.0),
            ..Default::default()
        };
        assert_eq!(half.move_axis(), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_jump_latches_until_acknowledged() {
        let mut handler = InputHandler::new();
        let mut pressed = RawInput::default();
        pressed.buttons.jump = true;

        handler.update(pressed);
        assert!(handler.snapshot().jump);

        handler.acknowledge_jump();
        assert!(!handler.snapshot().jump);

        // Still held: no new jump
        handler.update(pressed);
        assert!(!handler.snapshot().jump);

        // Release and press again
        handler.update(RawInput::default());
        handler.update(pressed);
        assert!(handler.snapshot().jump);
    }

    #[test]
    fn test_release_clears_unconsumed_jump() {
        let mut handler = InputHandler::new();
        let mut pressed = RawInput::default();
        pressed.buttons.jump = true;

        handler.update(pressed);
        handler.update(RawInput::default());

        assert!(!handler.jump_pending());
    }
}
