//! Scene setup: camera, light and the walker's body mesh.
//!
//! Legs, probes and the ground are gizmos (see `render`); only the body is a
//! real mesh so it reads as solid.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use strider_gait::PhysicsBody;

use crate::camera::{CameraOrbit, MainCamera};
use crate::web_bevy::{StriderState, BODY_RADIUS};

/// Marker for the walker body mesh.
#[derive(Component)]
pub struct BodyVisual;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orbit: Res<CameraOrbit>,
) {
    // TonyMcMapFace needs tonemapping LUTs, which WebGL2 builds leave out.
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(orbit.eye()).looking_at(orbit.target, Vec3::Y),
        Tonemapping::None,
        bevy::render::view::Msaa::Off,
        MainCamera,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 600.0,
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: false,
            ..Default::default()
        },
        Transform::from_xyz(3.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(BODY_RADIUS).mesh().uv(24, 12))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.75, 0.55, 0.25),
            perceptual_roughness: 0.8,
            ..Default::default()
        })),
        Transform::default(),
        BodyVisual,
    ));
}

/// Copy the physics body pose onto the body mesh.
pub fn sync_body(state: Res<StriderState>, mut query: Query<&mut Transform, With<BodyVisual>>) {
    let pose = state.physics.pose();
    let t = pose.translation.vector;
    let r = pose.rotation;
    for mut transform in query.iter_mut() {
        transform.translation = Vec3::new(t.x, t.y, t.z);
        transform.rotation = Quat::from_xyzw(r.i, r.j, r.k, r.w);
    }
}
