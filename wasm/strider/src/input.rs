//! Keyboard drive commands.

use bevy::prelude::*;
use strider_gait::{DriveCommand, GaitConfig};

use crate::web_bevy::StriderState;

/// Turn input while A or D is held, in rad/s per unit of speed.
const TURN_INPUT: f32 = 1.0;

/// W/S: faster/reverse, A/D: turn, Space: pause, R: reset, G: debug shapes.
pub fn keyboard_input(mut state: ResMut<StriderState>, keyboard: Res<ButtonInput<KeyCode>>) {
    if keyboard.just_pressed(KeyCode::Space) {
        state.paused = !state.paused;
    }
    if keyboard.just_pressed(KeyCode::KeyG) {
        state.show_debug = !state.show_debug;
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        if let Err(e) = state.reset() {
            log::error!("reset failed: {e}");
        }
        return;
    }

    let held = HeldKeys {
        forward: keyboard.pressed(KeyCode::KeyW),
        back: keyboard.pressed(KeyCode::KeyS),
        left: keyboard.pressed(KeyCode::KeyA),
        right: keyboard.pressed(KeyCode::KeyD),
    };
    let cmd = drive_command(state.walker.config(), held);
    state.target_command = cmd;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

/// With no keys held the walker cruises at the configured speed and turn.
pub fn drive_command(config: &GaitConfig, held: HeldKeys) -> DriveCommand {
    let cruise = config.speed;
    let mut cmd = DriveCommand::new(cruise, config.turn_rate);
    if held.forward { cmd.speed = cruise * 2.0; }
    if held.back { cmd.speed = -cruise; }
    if held.left { cmd.turn = TURN_INPUT; }
    if held.right { cmd.turn = -TURN_INPUT; }
    cmd
}
