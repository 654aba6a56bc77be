//! Flat-ground host for driving a walker end to end.

#![allow(dead_code)]

use nalgebra::{Isometry3, Point3, Unit, UnitQuaternion, Vector3};
use strider_gait::{GaitConfig, GroundProbe, NoSkeleton, PhysicsBody, TickReport, Walker};

pub const GROUND: f32 = 0.0;
pub const DT: f32 = 1.0 / 60.0;

#[derive(Clone, Debug, Default)]
pub struct FlatProbe {
    origin: Point3<f32>,
    cast: Vector3<f32>,
    contact: Option<Point3<f32>>,
}

impl FlatProbe {
    pub fn sweep(&mut self) {
        let reaches = self.origin.y >= GROUND && self.origin.y + self.cast.y <= GROUND;
        self.contact = reaches.then(|| Point3::new(self.origin.x, GROUND, self.origin.z));
    }
}

impl GroundProbe for FlatProbe {
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

pub struct FreeBody {
    pub pose: Isometry3<f32>,
    pub velocity: Vector3<f32>,
}

impl PhysicsBody for FreeBody {
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

pub struct Rig {
    pub walker: Walker<FlatProbe>,
    pub body: FreeBody,
}

impl Rig {
    /// Feet spread on the ground around a body hovering at y = 0.6.
    pub fn new(config: GaitConfig, leg_count: usize) -> Rig {
        let pose = Isometry3::translation(0.0, 0.6, 0.0);
        let half = leg_count / 2;
        let feet: Vec<Point3<f32>> = (0..leg_count)
            .map(|i| {
                let x = if i < half { -0.7 } else { 0.7 };
                let z = (i % half) as f32 * 0.5 - 0.25 * (half as f32 - 1.0);
                Point3::new(x, GROUND, z)
            })
            .collect();
        let walker = Walker::new(config, &pose, &feet, &NoSkeleton, |_| FlatProbe::default())
            .expect("valid walker");
        Rig {
            walker,
            body: FreeBody { pose, velocity: Vector3::zeros() },
        }
    }

    /// One host frame: controller tick, then the physics sweep.
    pub fn step(&mut self, dt: f32) -> TickReport {
        let report = self.walker.tick(dt, &mut self.body, &NoSkeleton, None);
        for probe in self.walker.probes_mut() {
            probe.sweep();
        }
        report
    }
}
