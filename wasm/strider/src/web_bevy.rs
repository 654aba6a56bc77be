//! WASM entrypoint for the strider walker simulation.
//!
//! Bevy renders, Rapier hosts the body and the ground, and the gait core
//! moves the legs. Everything is drawn with gizmos, so no meshes or textures
//! are fetched at runtime.
//!
//! Module structure:
//! - camera: Orbit camera that follows the walker
//! - scene: Camera, light and body mesh
//! - input: Keyboard drive commands
//! - simulation: Walker tick and probe sweep
//! - render: Ground grid and gait debug shapes
//! - ui: egui tuning panel and phase plot

use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use nalgebra::{Isometry3, Translation3};
use strider_gait::{DriveCommand, GaitConfig, GaitError, TickReport, Walker};
use strider_physics::{PhysicsWorld, RayProbe, Rig, RigError, Terrain};
use thiserror::Error;
use wasm_bindgen::prelude::*;

use crate::{camera, input, render, scene, simulation, ui};

const WALKER_CONFIG: &str = include_str!("../assets/walker.json");
const WALKER_URDF: &str = include_str!("../assets/walker.urdf");

/// Body hover height above the terrain origin.
pub const SPAWN_HEIGHT: f32 = 0.55;
pub const BODY_RADIUS: f32 = 0.3;
/// Samples of gait phase kept for the plot.
const HISTORY_LEN: usize = 600;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("rig: {0}")]
    Rig(#[from] RigError),
    #[error("gait: {0}")]
    Gait(#[from] GaitError),
}

/// WebHandle for the Bevy strider app.
#[wasm_bindgen]
pub struct WebHandle {}

#[wasm_bindgen]
impl WebHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {}
    }

    #[wasm_bindgen]
    pub async fn start(&self, canvas: web_sys::HtmlCanvasElement) -> Result<(), JsValue> {
        let canvas_id = canvas.id();
        let selector = if canvas_id.is_empty() {
            "#bevy-canvas".to_string()
        } else {
            format!("#{}", canvas_id)
        };

        let state = StriderState::load().map_err(|e| JsValue::from_str(&e.to_string()))?;

        App::new()
            .add_plugins(DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Strider".into(),
                    canvas: Some(selector),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    ..Default::default()
                }),
                ..Default::default()
            }))
            .add_plugins(EguiPlugin)
            .insert_resource(state)
            .add_plugins(StriderPlugin)
            .run();

        Ok(())
    }

    #[wasm_bindgen]
    pub fn destroy(&self) {}
}

impl Default for WebHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Strider plugin for Bevy. Expects a [`StriderState`] resource.
pub struct StriderPlugin;

impl Plugin for StriderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)))
            .init_resource::<camera::CameraOrbit>()
            .add_systems(Startup, scene::setup_scene)
            .add_systems(Update, camera::camera_input)
            .add_systems(Update, input::keyboard_input.after(camera::camera_input))
            .add_systems(Update, simulation::walker_step.after(input::keyboard_input))
            .add_systems(Update, scene::sync_body.after(simulation::walker_step))
            .add_systems(Update, camera::follow_walker.after(simulation::walker_step))
            .add_systems(Update, camera::camera_apply.after(camera::follow_walker))
            .add_systems(Update, render::draw_ground_grid)
            .add_systems(Update, render::draw_walker.after(simulation::walker_step))
            .add_systems(Update, ui::ui_system.after(camera::camera_apply));
    }
}

/// Main simulation state.
#[derive(Resource)]
pub struct StriderState {
    pub physics: PhysicsWorld,
    pub rig: Rig,
    pub walker: Walker<RayProbe>,
    pub terrain: Terrain,
    pub target_command: DriveCommand,
    pub last_report: TickReport,
    /// `(elapsed seconds, phase)` samples, oldest first.
    pub phase_history: VecDeque<(f32, f32)>,
    pub elapsed: f32,
    pub paused: bool,
    pub show_debug: bool,
    pub ui_visible: bool,
}

impl StriderState {
    /// Build from the bundled walker config and rig on rolling ground.
    pub fn load() -> Result<Self, SetupError> {
        let config = GaitConfig::from_json(WALKER_CONFIG)?;
        Self::build(config, Terrain::rolling(40.0, 0.2, 7))
    }

    pub fn build(config: GaitConfig, terrain: Terrain) -> Result<Self, SetupError> {
        let rig = Rig::from_urdf(WALKER_URDF)?;

        let spawn_height = SPAWN_HEIGHT + terrain.height_at(0.0, 0.0);
        let spawn = Isometry3::from_parts(Translation3::new(0.0, spawn_height, 0.0), Default::default());
        let mut physics = PhysicsWorld::new(spawn, BODY_RADIUS);
        physics.add_terrain(&terrain);

        let feet: Vec<_> = rig.foot_positions().into_iter().map(|foot| spawn * foot).collect();
        let mut walker = Walker::new(config, &spawn, &feet, &rig, |_| RayProbe::new())?;
        physics.sweep_probes(walker.probes_mut());

        let target_command = walker.command();
        Ok(Self {
            physics,
            rig,
            walker,
            terrain,
            target_command,
            last_report: TickReport::default(),
            phase_history: VecDeque::with_capacity(HISTORY_LEN),
            elapsed: 0.0,
            paused: false,
            show_debug: true,
            ui_visible: true,
        })
    }

    /// Start over at the spawn point, keeping the current tuning.
    pub fn reset(&mut self) -> Result<(), SetupError> {
        let config = self.walker.config().clone();
        let ui_visible = self.ui_visible;
        let show_debug = self.show_debug;
        *self = Self::build(config, self.terrain.clone())?;
        self.ui_visible = ui_visible;
        self.show_debug = show_debug;
        Ok(())
    }

    /// One walker tick followed by the probe sweep the next tick reads.
    pub fn step(&mut self, dt: f32) {
        let Self { physics, rig, walker, target_command, .. } = self;
        walker.drive(*target_command);
        let report = walker.tick(dt, physics, &*rig, None);
        physics.sweep_probes(walker.probes_mut());

        self.last_report = report;
        self.elapsed += dt;
        if self.phase_history.len() == HISTORY_LEN {
            self.phase_history.pop_front();
        }
        self.phase_history.push_back((self.elapsed, self.walker.phase()));
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_gait::PhysicsBody;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_bundled_assets_load() {
        let state = StriderState::load().unwrap();
        assert_eq!(state.walker.leg_count(), 6);
        assert_eq!(state.walker.active_count(), 3);
        assert!(state.walker.legs().iter().all(|leg| leg.bone().is_some()));
    }

    #[test]
    fn test_walker_crosses_flat_ground() {
        let config = GaitConfig::from_json(WALKER_CONFIG).unwrap();
        let mut state = StriderState::build(config, Terrain::flat(40.0)).unwrap();
        for _ in 0..300 {
            state.step(DT);
        }
        let pose = state.physics.pose();
        assert!(pose.translation.vector.z < -3.0);
        assert!(state.walker.flips() > 0);
        for leg in state.walker.legs() {
            assert!(leg.foot().y.abs() < 1e-3, "foot {} off the ground", leg.index());
        }
        assert_eq!(state.phase_history.len(), 300);
    }

    #[test]
    fn test_walker_turns_left_on_command() {
        let mut state = StriderState::load().unwrap();
        state.target_command = DriveCommand::new(1.0, 1.0);
        for _ in 0..120 {
            state.step(DT);
        }
        let forward = state.physics.pose().rotation * -nalgebra::Vector3::z();
        assert!(forward.x < -0.1);
    }

    #[test]
    fn test_reset_keeps_tuning() {
        let mut state = StriderState::load().unwrap();
        let mut config = state.walker.config().clone();
        config.cycle_rate = 1.7;
        state.walker.set_config(config).unwrap();
        state.show_debug = false;
        for _ in 0..60 {
            state.step(DT);
        }

        state.reset().unwrap();
        assert_eq!(state.walker.config().cycle_rate, 1.7);
        assert!(!state.show_debug);
        assert_eq!(state.walker.flips(), 0);
        assert!(state.physics.pose().translation.vector.z.abs() < 1e-6);
    }
}
