//! Rapier3D host for strider walkers: a kinematic body that slides along
//! static geometry, ray-cast ground probes, noise terrain and a URDF rig.

pub mod probe;
pub mod rig;
pub mod terrain;
pub mod world;

pub use probe::RayProbe;
pub use rig::{Bone, Rig, RigError};
pub use terrain::Terrain;
pub use world::PhysicsWorld;
