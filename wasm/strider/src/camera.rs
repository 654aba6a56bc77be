//! Orbit camera that trails the walker.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use strider_gait::PhysicsBody;

use crate::web_bevy::StriderState;

/// Main camera marker.
#[derive(Component)]
pub struct MainCamera;

#[derive(Resource)]
pub struct CameraOrbit {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub following: bool,
    /// Fraction of the gap to the walker closed each frame.
    pub follow_rate: f32,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 5.0,
            yaw: 35.0_f32.to_radians(),
            pitch: 35.0_f32.to_radians(),
            following: true,
            follow_rate: 0.15,
        }
    }
}

impl CameraOrbit {
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }
}

/// Drag to orbit, shift+drag or middle drag to pan, scroll to zoom.
pub fn camera_input(
    mut orbit: ResMut<CameraOrbit>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    const SENSITIVITY: f32 = 0.005;

    let dragging = mouse_button.pressed(MouseButton::Left) || mouse_button.pressed(MouseButton::Middle);
    if !dragging {
        mouse_motion.clear();
    }
    let panning = keyboard.pressed(KeyCode::ShiftLeft)
        || keyboard.pressed(KeyCode::ShiftRight)
        || mouse_button.pressed(MouseButton::Middle);

    for ev in mouse_motion.read() {
        if panning {
            let right = Vec3::new(orbit.yaw.cos(), 0.0, -orbit.yaw.sin());
            let scale = SENSITIVITY * orbit.distance;
            orbit.target -= right * ev.delta.x * scale;
            orbit.target += Vec3::Y * ev.delta.y * scale;
            // Panning detaches the camera from the walker.
            orbit.following = false;
        } else {
            orbit.yaw -= ev.delta.x * SENSITIVITY;
            orbit.pitch = (orbit.pitch + ev.delta.y * SENSITIVITY).clamp(0.05, 1.4);
        }
    }

    for ev in mouse_wheel.read() {
        orbit.distance = (orbit.distance - ev.y * 0.2).clamp(1.0, 30.0);
    }
}

/// Ease the orbit target toward the walker body.
pub fn follow_walker(state: Res<StriderState>, mut orbit: ResMut<CameraOrbit>) {
    if !orbit.following {
        return;
    }
    let t = state.physics.pose().translation.vector;
    let body = Vec3::new(t.x, t.y, t.z);
    let rate = orbit.follow_rate.clamp(0.0, 1.0);
    orbit.target = orbit.target.lerp(body, rate);
}

pub fn camera_apply(
    orbit: Res<CameraOrbit>,
    state: Res<StriderState>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let mut eye = orbit.eye();
    // Keep the eye above the ground under it.
    let floor = state.terrain.height_at(eye.x, eye.z) + 0.5;
    eye.y = eye.y.max(floor);

    if let Ok(mut transform) = camera_query.get_single_mut() {
        *transform = Transform::from_translation(eye).looking_at(orbit.target, Vec3::Y);
    }
}
