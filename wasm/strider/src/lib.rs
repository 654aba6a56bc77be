//! Strider WASM simulation - Bevy 3D + Rapier physics + procedural gait.

// Bevy modules
pub mod camera;
pub mod input;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod ui;

mod web_bevy;
pub use web_bevy::{SetupError, StriderPlugin, StriderState, WebHandle};
