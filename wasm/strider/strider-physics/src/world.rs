use nalgebra::{Unit, UnitQuaternion};
use rapier3d::control::KinematicCharacterController;
use rapier3d::prelude::*;
use strider_gait::PhysicsBody;

use crate::probe::RayProbe;
use crate::terrain::Terrain;

const GROUND_GROUP: Group = Group::GROUP_1;
const BODY_GROUP: Group = Group::GROUP_2;

/// Rapier world holding the walker's kinematic body and the static ground.
///
/// The body is a kinematic, position-based rigid body. Motion requested by the
/// walker is resolved against the static colliders by a character controller,
/// so the body slides along walls instead of passing through them.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub gravity: Vector<f32>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,

    body: RigidBodyHandle,
    body_collider: ColliderHandle,
    pose: Isometry<f32>,
    velocity: Vector<f32>,
    character: KinematicCharacterController,
}

impl PhysicsWorld {
    pub fn new(spawn: Isometry<f32>, body_radius: f32) -> Self {
        let mut rigid_body_set = RigidBodySet::new();
        let mut collider_set = ColliderSet::new();

        let body = rigid_body_set.insert(RigidBodyBuilder::kinematic_position_based().position(spawn).build());
        let collider = ColliderBuilder::ball(body_radius.max(0.01))
            .collision_groups(InteractionGroups::new(BODY_GROUP, GROUND_GROUP))
            .build();
        let body_collider = collider_set.insert_with_parent(collider, body, &mut rigid_body_set);

        let character = KinematicCharacterController {
            snap_to_ground: None,
            autostep: None,
            ..KinematicCharacterController::default()
        };

        let mut world = Self {
            rigid_body_set,
            collider_set,
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            body,
            body_collider,
            pose: spawn,
            velocity: Vector::zeros(),
            character,
        };
        world.query_pipeline.update(&world.collider_set);
        world
    }

    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add the terrain as a static collider and return its handle.
    pub fn add_terrain(&mut self, terrain: &Terrain) -> ColliderHandle {
        self.add_static(terrain.collider())
    }

    /// Add any static obstacle the body should collide with.
    pub fn add_static(&mut self, collider: ColliderBuilder) -> ColliderHandle {
        let collider = collider
            .collision_groups(InteractionGroups::new(GROUND_GROUP, Group::ALL))
            .build();
        let handle = self.collider_set.insert(collider);
        self.query_pipeline.update(&self.collider_set);
        handle
    }

    /// Refresh every probe's hit against the current ground. The walker's own
    /// body is never reported as ground.
    pub fn sweep_probes<'a>(&self, probes: impl IntoIterator<Item = &'a mut RayProbe>) {
        let filter = QueryFilter::default()
            .exclude_rigid_body(self.body)
            .groups(InteractionGroups::new(Group::ALL, GROUND_GROUP));
        for probe in probes {
            probe.sweep(&self.query_pipeline, &self.rigid_body_set, &self.collider_set, filter);
        }
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn velocity(&self) -> Vector<f32> {
        self.velocity
    }

    /// Teleport the body, dropping any pending velocity.
    pub fn reset(&mut self, pose: Isometry<f32>) {
        self.pose = pose;
        self.velocity = Vector::zeros();
        if let Some(body) = self.rigid_body_set.get_mut(self.body) {
            body.set_position(pose, true);
        }
        self.query_pipeline.update(&self.collider_set);
    }
}

impl PhysicsBody for PhysicsWorld {
    fn set_velocity(&mut self, velocity: Vector<f32>) {
        self.velocity = velocity;
    }

    fn integrate_and_slide(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let Some(collider) = self.collider_set.get(self.body_collider) else {
            log::warn!("walker body collider is missing");
            return;
        };
        let movement = self.character.move_shape(
            dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            collider.shape(),
            &self.pose,
            self.velocity * dt,
            QueryFilter::default()
                .exclude_rigid_body(self.body)
                .groups(InteractionGroups::new(Group::ALL, GROUND_GROUP)),
            |_| {},
        );

        self.pose.translation.vector += movement.translation;
        if let Some(body) = self.rigid_body_set.get_mut(self.body) {
            body.set_next_kinematic_position(self.pose);
        }

        self.integration_parameters.dt = dt;
        self.step();
    }

    fn rotate(&mut self, axis: &Unit<Vector<f32>>, angle: f32) {
        self.pose.rotation = UnitQuaternion::from_axis_angle(axis, angle) * self.pose.rotation;
    }

    fn pose(&self) -> Isometry<f32> {
        self.pose
    }
}
