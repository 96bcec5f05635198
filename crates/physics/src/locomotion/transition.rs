//! Resumable timed transitions.
//!
//! A transition is a plain state object advanced by `advance(dt)`.
//! Cancelling one is just replacing it.

use serde::{Deserialize, Serialize};

/// Capsule height paired with the camera's local height above the feet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub height: f32,
    pub camera_y: f32,
}

impl Pose {
    pub const fn new(height: f32, camera_y: f32) -> Self {
        Self { height, camera_y }
    }

    /// Pose for a capsule of `height` with the camera `offset` above its center.
    pub fn for_capsule(height: f32, offset: f32) -> Self {
        Self::new(height, height / 2.0 + offset)
    }

    /// Same pose lowered by `amount` in both height and camera.
    pub fn lowered(self, amount: f32) -> Self {
        Self::new(self.height - amount, self.camera_y - amount)
    }

    pub fn lerp(self, other: Pose, t: f32) -> Pose {
        Pose::new(
            self.height + (other.height - self.height) * t,
            self.camera_y + (other.camera_y - self.camera_y) * t,
        )
    }
}

/// Outcome of advancing a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Running(Pose),
    /// Reached the target exactly.
    Finished(Pose),
}

impl Progress {
    pub fn pose(self) -> Pose {
        match self {
            Progress::Running(pose) | Progress::Finished(pose) => pose,
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Progress::Finished(_))
    }
}

/// Linear interpolation between two poses over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    start: Pose,
    target: Pose,
    elapsed: f32,
    duration: f32,
}

impl Tween {
    pub fn new(start: Pose, target: Pose, duration: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Step forward by `dt`. Completion snaps to the target.
    pub fn advance(&mut self, dt: f32) -> Progress {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            Progress::Finished(self.target)
        } else {
            Progress::Running(self.sample())
        }
    }

    /// Pose at the current elapsed time.
    pub fn sample(&self) -> Pose {
        if self.elapsed >= self.duration {
            self.target
        } else {
            self.start.lerp(self.target, self.elapsed / self.duration)
        }
    }

    /// Fraction of the duration elapsed, in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn start(&self) -> Pose {
        self.start
    }

    pub fn target(&self) -> Pose {
        self.target
    }
}
