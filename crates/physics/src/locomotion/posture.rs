//! Crouch/stand posture and the shared transition slot.
//!
//! Crouch is a toggle: each press of the crouch button flips the posture.
//! Posture changes and landing impacts share one slot, so starting either
//! cancels whatever was running. Every new transition starts from the pose
//! the character is actually in, never from a nominal one.

use serde::{Deserialize, Serialize};

use super::config::LocomotionConfig;
use super::landing::LandingImpact;
use super::transition::{Pose, Tween};

/// Settled posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Posture {
    #[default]
    Standing,
    Crouching,
}

impl Posture {
    pub fn toggled(self) -> Self {
        match self {
            Posture::Standing => Posture::Crouching,
            Posture::Crouching => Posture::Standing,
        }
    }
}

/// The single running transition, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ActiveTransition {
    #[default]
    Idle,
    Posture(Tween),
    LandingImpact(LandingImpact),
}

/// Owns the character pose and drives its transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostureController {
    posture: Posture,
    pose: Pose,
    active: ActiveTransition,
    standing: Pose,
    crouching: Pose,
    transition_time: f32,
    /// Previous tick's crouch button (for edge detection).
    prev_crouch_pressed: bool,
}

impl PostureController {
    /// A standing controller at rest.
    pub fn new(config: &LocomotionConfig) -> Self {
        let standing = config.standing_pose();
        Self {
            posture: Posture::Standing,
            pose: standing,
            active: ActiveTransition::Idle,
            standing,
            crouching: config.crouching_pose(),
            transition_time: config.crouch_transition_time,
            prev_crouch_pressed: false,
        }
    }

    /// Feed the crouch button. A press edge toggles posture; returns whether
    /// it did.
    pub fn update_input(&mut self, crouch_pressed: bool) -> bool {
        let just_pressed = crouch_pressed && !self.prev_crouch_pressed;
        self.prev_crouch_pressed = crouch_pressed;

        if just_pressed {
            self.toggle();
        }
        just_pressed
    }

    /// Flip posture, replacing any running transition.
    pub fn toggle(&mut self) {
        self.set_posture(self.posture.toggled());
    }

    /// Transition toward `posture` from the current pose.
    pub fn set_posture(&mut self, posture: Posture) {
        self.posture = posture;
        let target = self.rest_pose();
        self.active = ActiveTransition::Posture(Tween::new(self.pose, target, self.transition_time));
        log::debug!("Posture -> {:?} (from height {:.3})", posture, self.pose.height);
    }

    /// Replace any running transition with a landing impact.
    pub fn begin_landing_impact(&mut self, impact: LandingImpact) {
        self.active = ActiveTransition::LandingImpact(impact);
    }

    /// Advance the running transition and return the resulting pose.
    pub fn advance(&mut self, dt: f32) -> Pose {
        let progress = match &mut self.active {
            ActiveTransition::Idle => return self.pose,
            ActiveTransition::Posture(tween) => tween.advance(dt),
            ActiveTransition::LandingImpact(impact) => impact.advance(dt),
        };

        self.pose = progress.pose();
        if progress.is_finished() {
            self.active = ActiveTransition::Idle;
        }
        self.pose
    }

    /// Current pose.
    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Settled pose for the current posture.
    pub fn rest_pose(&self) -> Pose {
        match self.posture {
            Posture::Standing => self.standing,
            Posture::Crouching => self.crouching,
        }
    }

    /// Posture being held or transitioned to.
    #[inline]
    pub fn posture(&self) -> Posture {
        self.posture
    }

    #[inline]
    pub fn is_crouched(&self) -> bool {
        self.posture == Posture::Crouching
    }

    pub fn active(&self) -> &ActiveTransition {
        &self.active
    }

    pub fn is_transitioning(&self) -> bool {
        !matches!(self.active, ActiveTransition::Idle)
    }
}
