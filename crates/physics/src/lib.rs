//! Strider Physics
//!
//! Kinematic first-person locomotion for a capsule character, stepped once
//! per frame from pulled input.
//!
//! # Architecture
//!
//! - **Locomotion**: ground sensing, stamina, momentum and jump integration,
//!   crouch and landing transitions, orchestrated by [`LocomotionCore`]
//! - **Collision**: a static brush world with capsule traces and a
//!   [`KinematicBody`] that plugs it into the core
//!
//! The core never owns geometry. Anything implementing [`WorldMover`] can
//! carry a character, which keeps unit tests free of a collision world.

pub mod collision;
pub mod error;
pub mod locomotion;

// Re-export commonly used types
pub use collision::{BodyParams, CollisionWorld, ContentFlags, KinematicBody, TraceResult, TraceShape};
pub use error::{ConfigError, ConfigResult};
pub use locomotion::{
    Capsule, GroundState, ImpulseJumpConfig, ImpulseJumper, InputSnapshot, InputSource, JumpProfile,
    LandingEvent, LocomotionConfig, LocomotionCore, Pose, Posture, RayHit, SpeedMode, StaminaPool,
    TickReport, VelocityState, WorldMover, WorldQuery, wrap_angle,
};
