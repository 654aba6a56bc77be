//! Services the walker consumes from its host engine.
//!
//! The controller never owns a scene graph. It drives a body, places probes,
//! reads bone poses and optionally reports debug shapes, all through the
//! traits below.

use nalgebra::{Isometry3, Point3, Unit, Vector3};

pub type BoneId = usize;

/// The character body. Position integration and collision sliding belong to
/// the implementor.
pub trait PhysicsBody {
    fn set_velocity(&mut self, velocity: Vector3<f32>);

    /// Consume the current velocity for `dt` seconds, sliding along whatever
    /// the body hits.
    fn integrate_and_slide(&mut self, dt: f32);

    fn rotate(&mut self, axis: &Unit<Vector3<f32>>, angle: f32);

    /// Current world pose, including rotations applied this tick.
    fn pose(&self) -> Isometry3<f32>;
}

/// A downward ground sensor.
///
/// Contact results come from the most recent physics sweep, so a probe moved
/// this tick reports the ground under its previous origin until the host
/// sweeps again.
pub trait GroundProbe {
    fn set_world_position(&mut self, position: Point3<f32>);

    fn set_cast_vector(&mut self, cast: Vector3<f32>);

    fn is_colliding(&self) -> bool;

    /// `Some` only while colliding.
    fn contact_point(&self) -> Option<Point3<f32>>;
}

/// Bone pose queries, in body (model) space. The walker composes them with
/// the body pose to get world positions.
pub trait Skeleton {
    fn bone_position(&self, bone: BoneId) -> Option<Point3<f32>>;

    fn child_bones(&self, root: BoneId) -> Vec<BoneId>;
}

/// Skeleton for hosts that anchor probes to the rest pose.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSkeleton;

impl Skeleton for NoSkeleton {
    fn bone_position(&self, _bone: BoneId) -> Option<Point3<f32>> {
        None
    }

    fn child_bones(&self, _root: BoneId) -> Vec<BoneId> {
        Vec::new()
    }
}

/// What a debug shape stands for; the sink picks colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Probe,
    ProbeRay,
    Contact,
    Target,
    ActiveFoot,
    PlantedFoot,
    Reach,
}

/// Optional visualizer invoked after each tick.
pub trait DebugDraw {
    fn sphere(&mut self, center: Point3<f32>, radius: f32, marker: Marker);

    fn line(&mut self, from: Point3<f32>, to: Point3<f32>, marker: Marker);
}
