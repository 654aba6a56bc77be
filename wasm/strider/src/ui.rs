//! egui tuning panel for the walker.
//!
//! Edits are made on a copy of the gait config and handed to the walker
//! whole, so an invalid value is reported instead of half-applied.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use egui_plot::{Line, Plot, PlotPoints};
use strider_gait::{ActivePolicy, AnchorMode, BoneId, FootMotion, GaitConfig, PhysicsBody, TurnDifferential};

use crate::camera::CameraOrbit;
use crate::web_bevy::StriderState;

pub fn ui_system(
    mut contexts: EguiContexts,
    mut state: ResMut<StriderState>,
    mut orbit: ResMut<CameraOrbit>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut status: Local<Option<String>>,
) {
    if keyboard.just_pressed(KeyCode::Tab) {
        state.ui_visible = !state.ui_visible;
    }
    if !state.ui_visible {
        return;
    }

    let ctx = contexts.ctx_mut();
    egui::Window::new("Strider")
        .default_width(280.0)
        .show(ctx, |ui| {
            egui::CollapsingHeader::new("Drive")
                .default_open(true)
                .show(ui, |ui| drive_section(ui, &mut state));

            egui::CollapsingHeader::new("Gait")
                .default_open(false)
                .show(ui, |ui| {
                    let mut config = state.walker.config().clone();
                    let root = state.rig.root();
                    if gait_section(ui, &mut config, root) {
                        *status = state.walker.set_config(config).err().map(|e| e.to_string());
                    }
                    if ui.button("Copy config as JSON").clicked() {
                        match serde_json::to_string_pretty(state.walker.config()) {
                            Ok(json) => ui.ctx().copy_text(json),
                            Err(e) => *status = Some(e.to_string()),
                        }
                    }
                    if let Some(message) = &*status {
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                });

            egui::CollapsingHeader::new("Phase")
                .default_open(true)
                .show(ui, |ui| phase_plot(ui, &state));

            egui::CollapsingHeader::new("Camera")
                .default_open(false)
                .show(ui, |ui| {
                    ui.checkbox(&mut orbit.following, "Follow walker");
                    ui.add(egui::Slider::new(&mut orbit.distance, 1.0..=30.0).text("Distance"));
                    ui.label("Drag to orbit, Shift+Drag to pan, scroll to zoom");
                });
        });
}

fn drive_section(ui: &mut egui::Ui, state: &mut StriderState) {
    ui.monospace("W/S: faster/reverse   A/D: turn");
    ui.monospace("Space: pause   R: reset   G: debug   Tab: panel");
    ui.separator();

    let cmd = state.walker.command();
    let turn = state.walker.turn();
    let t = state.physics.pose().translation.vector;
    ui.label(format!("Command: speed {:+.2}, turn {:+.2}", cmd.speed, cmd.turn));
    ui.label(format!("Turn rate: {:+.2} rad/s", turn.rate));
    ui.label(format!("Body: [{:+.2}, {:+.2}, {:+.2}]", t.x, t.y, t.z));
    ui.label(format!(
        "Moving feet: {}/{}   flips: {}",
        state.walker.active_count(),
        state.walker.leg_count(),
        state.walker.flips()
    ));

    ui.horizontal(|ui| {
        ui.checkbox(&mut state.paused, "Paused");
        ui.checkbox(&mut state.show_debug, "Debug shapes");
        if ui.button("Reset").clicked() {
            if let Err(e) = state.reset() {
                log::error!("reset failed: {e}");
            }
        }
    });
}

/// Returns true when anything changed.
fn gait_section(ui: &mut egui::Ui, config: &mut GaitConfig, root: BoneId) -> bool {
    let mut changed = false;
    changed |= ui.add(egui::Slider::new(&mut config.cycle_rate, 0.0..=3.0).text("Cycle rate")).changed();
    changed |= ui.add(egui::Slider::new(&mut config.speed, -2.0..=2.0).text("Cruise speed")).changed();
    changed |= ui.add(egui::Slider::new(&mut config.max_speed, 0.1..=5.0).text("Max speed")).changed();
    changed |= ui.add(egui::Slider::new(&mut config.foot_speed, 0.0..=0.3).text("Foot speed")).changed();
    changed |= ui.add(egui::Slider::new(&mut config.forward_offset, -1.0..=1.5).text("Forward offset")).changed();
    changed |= ui.add(egui::Slider::new(&mut config.radial_projection, -0.5..=1.0).text("Radial projection")).changed();
    changed |= ui.add(egui::Slider::new(&mut config.probe_height, 0.0..=2.0).text("Probe height")).changed();
    changed |= ui.add(egui::Slider::new(&mut config.command_smoothing, 0.0..=1.0).text("Smoothing")).changed();

    let mut clamp_rotation = config.max_rotation.is_some();
    if ui.checkbox(&mut clamp_rotation, "Clamp rotation").changed() {
        config.max_rotation = clamp_rotation.then_some(1.5);
        changed = true;
    }
    if let Some(max_rotation) = config.max_rotation.as_mut() {
        changed |= ui.add(egui::Slider::new(max_rotation, 0.0..=4.0).text("Max rotation")).changed();
    }

    let mut differential = config.turn_differential.is_some();
    if ui.checkbox(&mut differential, "Turn differential").changed() {
        config.turn_differential = differential.then(TurnDifferential::default);
        changed = true;
    }
    if let Some(diff) = config.turn_differential.as_mut() {
        changed |= ui.add(egui::Slider::new(&mut diff.forward, 0.0..=2.0).text("Inner forward")).changed();
        changed |= ui.add(egui::Slider::new(&mut diff.radial_inner, 0.0..=3.0).text("Inner radial")).changed();
        changed |= ui.add(egui::Slider::new(&mut diff.radial_outer, 0.0..=3.0).text("Outer radial")).changed();
    }

    ui.horizontal(|ui| {
        ui.label("Anchor:");
        changed |= ui.radio_value(&mut config.anchor, AnchorMode::RestPose, "Rest pose").changed();
        changed |= ui.radio_value(&mut config.anchor, AnchorMode::Skeletal { root }, "Leg roots").changed();
    });
    ui.horizontal(|ui| {
        ui.label("Feet:");
        changed |= ui.radio_value(&mut config.foot_motion, FootMotion::Step, "Step").changed();
        changed |= ui.radio_value(&mut config.foot_motion, FootMotion::Follow, "Follow").changed();
    });
    ui.horizontal(|ui| {
        // Only read at setup; takes effect on reset.
        ui.label("Start:");
        changed |= ui.radio_value(&mut config.initial_active, ActivePolicy::Alternating, "Alternating").changed();
        changed |= ui.radio_value(&mut config.initial_active, ActivePolicy::FrontBack, "Front/back").changed();
    });
    changed
}

fn phase_plot(ui: &mut egui::Ui, state: &StriderState) {
    if state.phase_history.is_empty() {
        ui.label("No data yet...");
        return;
    }
    let points: PlotPoints = state
        .phase_history
        .iter()
        .map(|&(t, phase)| [t as f64, phase as f64])
        .collect();
    Plot::new("phase_plot")
        .height(120.0)
        .include_y(0.0)
        .include_y(1.0)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(egui::Color32::from_rgb(100, 200, 255)).name("phase"));
        });
    ui.label(format!("Phase {:.2}", state.walker.phase()));
}
