//! First-person capsule locomotion.
//!
//! Input intent goes in, collision-aware moves come out. The core talks to
//! the world only through [`WorldQuery`] and [`WorldMover`], and to input
//! only through [`InputSource`].

mod capsule;
mod config;
mod controller;
mod ground;
mod impulse;
mod input;
mod landing;
mod posture;
mod query;
mod stamina;
mod transition;
mod velocity;

#[cfg(test)]
pub(crate) mod test_world;

pub use capsule::Capsule;
pub use config::{JumpProfile, LocomotionConfig};
pub use controller::{LandingEvent, LocomotionCore, TickReport};
pub use ground::{slide_vector, GroundSensor, GroundState, SlopeContact};
pub use impulse::{ImpulseJumpConfig, ImpulseJumper};
pub use input::{InputSnapshot, InputSource};
pub use landing::{ImpactPhase, LandingImpact, LandingImpactController};
pub use posture::{ActiveTransition, Posture, PostureController};
pub use query::{RayHit, WorldMover, WorldQuery};
pub use stamina::StaminaPool;
pub use transition::{Pose, Progress, Tween};
pub use velocity::{desired_direction, planar_basis, wrap_angle, SpeedMode, VelocityIntegrator, VelocityState};
