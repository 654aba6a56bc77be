//! Test doubles for the host traits.

use nalgebra::{Isometry3, Point3, Unit, UnitQuaternion, Vector3};

use crate::host::{BoneId, GroundProbe, PhysicsBody, Skeleton};

#[derive(Clone, Debug, Default)]
pub struct StubProbe {
    pub origin: Point3<f32>,
    pub cast: Vector3<f32>,
    pub contact: Option<Point3<f32>>,
}

impl StubProbe {
    pub fn hitting(contact: Point3<f32>) -> Self {
        Self { contact: Some(contact), ..Default::default() }
    }

    /// Flat ground at `height`, reached if the cast is long enough.
    pub fn sweep(&mut self, height: f32) {
        let bottom = self.origin.y + self.cast.y;
        self.contact = (self.origin.y >= height && bottom <= height)
            .then(|| Point3::new(self.origin.x, height, self.origin.z));
    }
}

impl GroundProbe for StubProbe {
    fn set_world_position(&mut self, position: Point3<f32>) {
        self.origin = position;
    }

    fn set_cast_vector(&mut self, cast: Vector3<f32>) {
        self.cast = cast;
    }

    fn is_colliding(&self) -> bool {
        self.contact.is_some()
    }

    fn contact_point(&self) -> Option<Point3<f32>> {
        self.contact
    }
}

/// Free-floating body: no collisions, integrates velocity directly.
#[derive(Clone, Debug)]
pub struct StubBody {
    pub pose: Isometry3<f32>,
    pub velocity: Vector3<f32>,
}

impl StubBody {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            pose: Isometry3::translation(x, y, z),
            velocity: Vector3::zeros(),
        }
    }
}

impl PhysicsBody for StubBody {
    fn set_velocity(&mut self, velocity: Vector3<f32>) {
        self.velocity = velocity;
    }

    fn integrate_and_slide(&mut self, dt: f32) {
        self.pose.translation.vector += self.velocity * dt;
    }

    fn rotate(&mut self, axis: &Unit<Vector3<f32>>, angle: f32) {
        self.pose.rotation = UnitQuaternion::from_axis_angle(axis, angle) * self.pose.rotation;
    }

    fn pose(&self) -> Isometry3<f32> {
        self.pose
    }
}

/// Bone 0 is the root; every other bone is a direct child of it.
#[derive(Clone, Debug, Default)]
pub struct StubSkeleton {
    pub bones: Vec<Point3<f32>>,
}

impl Skeleton for StubSkeleton {
    fn bone_position(&self, bone: BoneId) -> Option<Point3<f32>> {
        self.bones.get(bone).copied()
    }

    fn child_bones(&self, root: BoneId) -> Vec<BoneId> {
        if root == 0 {
            (1..self.bones.len()).collect()
        } else {
            Vec::new()
        }
    }
}

/// Like [`StubSkeleton`], but the listed bones have no pose.
#[derive(Clone, Debug, Default)]
pub struct PartialSkeleton {
    pub inner: StubSkeleton,
    pub unposed: Vec<BoneId>,
}

impl Skeleton for PartialSkeleton {
    fn bone_position(&self, bone: BoneId) -> Option<Point3<f32>> {
        if self.unposed.contains(&bone) {
            None
        } else {
            self.inner.bone_position(bone)
        }
    }

    fn child_bones(&self, root: BoneId) -> Vec<BoneId> {
        self.inner.child_bones(root)
    }
}
