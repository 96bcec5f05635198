//! Reference collision world.
//!
//! Static brushes backed by `parry3d` shapes, capsule traces, and a
//! kinematic body that plugs the world into the locomotion core.

mod body;
mod flags;
mod slide;
mod trace;
mod world;

pub use body::{BodyParams, KinematicBody};
pub use flags::ContentFlags;
pub use slide::{clip_velocity, slide_move, SlideOutcome, SlideParams};
pub use trace::{TraceResult, TraceShape};
pub use world::{CollisionBrush, CollisionWorld};
