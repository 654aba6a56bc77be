//! Body locomotion: heading and forward velocity.

use nalgebra::Vector3;

use crate::config::GaitConfig;
use crate::host::PhysicsBody;

/// Forward axis in body space.
pub fn forward_axis() -> Vector3<f32> {
    -Vector3::z()
}

/// Speed and turn setpoint, eased toward the host's input each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveCommand {
    pub speed: f32,
    /// Heading rate per unit of speed (rad/s).
    pub turn: f32,
}

impl DriveCommand {
    pub fn new(speed: f32, turn: f32) -> Self {
        Self { speed, turn }
    }

    pub fn lerp(&mut self, target: &DriveCommand, alpha: f32) {
        self.speed += (target.speed - self.speed) * alpha;
        self.turn += (target.turn - self.turn) * alpha;
    }

    pub fn clamp(&mut self, max_speed: f32) {
        self.speed = self.speed.clamp(-max_speed, max_speed);
    }
}

/// Heading rate and the delta applied on the last tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TurnState {
    /// rad/s, positive turns left (counter-clockwise seen from above).
    pub rate: f32,
    /// rad applied on the last tick.
    pub delta: f32,
}

impl TurnState {
    pub fn resolve(config: &GaitConfig, command: &DriveCommand, dt: f32) -> Self {
        let mut rate = command.turn * command.speed;
        if let Some(max_rotation) = config.max_rotation {
            let bound = max_rotation * command.speed.abs();
            if bound.is_finite() {
                rate = rate.clamp(-bound, bound);
            }
        }
        Self { rate, delta: rate * dt }
    }

    pub fn is_turning(&self) -> bool {
        self.rate.abs() > f32::EPSILON
    }
}

/// Rotate the body by this tick's heading delta, then aim its velocity along
/// the new forward axis. Integration is left to the caller.
pub fn steer<B: PhysicsBody>(body: &mut B, turn: &TurnState, speed: f32) {
    if turn.delta != 0.0 {
        body.rotate(&Vector3::y_axis(), turn.delta);
    }
    let forward = body.pose().rotation * forward_axis();
    body.set_velocity(forward * speed);
}
