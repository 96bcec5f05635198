//! Strider Game Glue
//!
//! Everything the locomotion core leaves to its host:
//!
//! - Raw device input turned into pulled snapshots with a latched jump
//! - Smoothed mouse look and a first-person camera
//! - A [`Character`] assembled by a validating builder
//! - A fixed-timestep [`Simulation`] over a [`Level`]
//!
//! ```text
//! RawInput ─► InputHandler ─► LocomotionCore ─► KinematicBody
//!                  │                 │
//!                  └─► LookController└─► CameraRig
//! ```

pub mod camera;
pub mod character;
pub mod input;
pub mod level;
pub mod look;
pub mod simulation;

// Re-export main types
pub use camera::{CameraRig, FirstPersonCamera};
pub use character::{Character, CharacterBuilder};
pub use input::{InputHandler, RawInput};
pub use level::{Level, SpawnPoint};
pub use look::{LookConfig, LookController};
pub use simulation::{CharacterId, PlayerCharacter, Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use strider_physics::{
    CollisionWorld, ContentFlags, InputSnapshot, InputSource, KinematicBody, LocomotionConfig,
    LocomotionCore, TickReport,
};
