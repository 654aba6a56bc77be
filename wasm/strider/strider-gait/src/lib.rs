//! Procedural gait for multi-legged walkers.
//!
//! No walk animation is authored. Each tick the walker advances a gait phase,
//! decides which feet may move, places a downward ground probe ahead of every
//! foot and steps the moving feet toward the ground their probes found when
//! they lifted.
//!
//! Physics, ray casts, bone poses and drawing stay with the host and are
//! reached through the traits in [`host`].

pub mod actuator;
pub mod body;
pub mod config;
pub mod error;
pub mod gait;
pub mod host;
pub mod leg;
pub mod math;
pub mod probe;
pub mod walker;

#[cfg(test)]
mod mock;

pub use body::{DriveCommand, TurnState};
pub use config::{ActivePolicy, AnchorMode, FootMotion, GaitConfig, TurnDifferential};
pub use error::GaitError;
pub use gait::GaitClock;
pub use host::{BoneId, DebugDraw, GroundProbe, Marker, NoSkeleton, PhysicsBody, Skeleton};
pub use leg::{opposite, Leg, Side};
pub use math::Remap;
pub use walker::{TickReport, Walker};
