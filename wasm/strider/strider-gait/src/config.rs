//! Tuning parameters for the walker.
//!
//! Everything the host can tune lives in [`GaitConfig`]. Missing fields in a
//! JSON document fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::GaitError;
use crate::math::Remap;

/// Where each probe is anchored before the forward/radial offsets apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnchorMode {
    /// Foot position at setup, expressed in body space.
    #[default]
    RestPose,
    /// World position of the leg-root bones under `root`.
    Skeletal { root: usize },
}

/// Which legs start active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePolicy {
    /// Parity within each half, second half offset by one (diagonal gait).
    #[default]
    Alternating,
    /// First half active, second half planted.
    FrontBack,
}

/// How active feet chase the ground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootMotion {
    /// Bounded step toward the target captured at the last flip.
    #[default]
    Step,
    /// Lerp toward the live probe contact by the current phase.
    Follow,
}

/// Inner/outer asymmetry applied to probe offsets while turning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnDifferential {
    /// Turn rate (rad/s) to rotation factor.
    pub remap: Remap,
    /// Inner-leg forward offset is scaled by `1 - forward * |factor|`.
    pub forward: f32,
    /// Radial rotation gain for legs on the inside of the turn.
    pub radial_inner: f32,
    /// Radial rotation gain for legs on the outside of the turn.
    pub radial_outer: f32,
}

impl Default for TurnDifferential {
    fn default() -> Self {
        Self {
            remap: Remap::default(),
            forward: 0.5,
            radial_inner: 1.5,
            radial_outer: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitConfig {
    /// Phase advance per second per unit of speed.
    pub cycle_rate: f32,
    /// Forward speed the walker starts with.
    pub speed: f32,
    /// Drive commands are clamped to `±max_speed`.
    pub max_speed: f32,
    /// Heading rate per unit of speed (rad/s), the starting turn input.
    pub turn_rate: f32,
    /// Turn rate is clamped to `±max_rotation * |speed|` when set.
    pub max_rotation: Option<f32>,
    /// Foot travel per tick per unit of speed.
    pub foot_speed: f32,
    pub forward_offset: f32,
    pub radial_projection: f32,
    /// Probe origin height above its anchor.
    pub probe_height: f32,
    /// Downward cast length of every probe.
    pub probe_length: f32,
    pub anchor: AnchorMode,
    pub initial_active: ActivePolicy,
    pub foot_motion: FootMotion,
    /// `None` keeps straight-line probe placement while turning.
    pub turn_differential: Option<TurnDifferential>,
    /// Blend factor for drive command smoothing, in `[0, 1]`.
    pub command_smoothing: f32,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            cycle_rate: 0.75,
            speed: 1.0,
            max_speed: 3.0,
            turn_rate: 0.0,
            max_rotation: Some(1.5),
            foot_speed: 0.08,
            forward_offset: 0.4,
            radial_projection: 0.3,
            probe_height: 1.0,
            probe_length: 3.0,
            anchor: AnchorMode::RestPose,
            initial_active: ActivePolicy::Alternating,
            foot_motion: FootMotion::Step,
            turn_differential: Some(TurnDifferential::default()),
            command_smoothing: 0.1,
        }
    }
}

impl GaitConfig {
    pub fn from_json(json: &str) -> Result<Self, GaitError> {
        let config: GaitConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GaitError> {
        check("cycle_rate", self.cycle_rate, self.cycle_rate >= 0.0)?;
        check("speed", self.speed, true)?;
        check("max_speed", self.max_speed, self.max_speed > 0.0)?;
        check("turn_rate", self.turn_rate, true)?;
        if let Some(max_rotation) = self.max_rotation {
            check("max_rotation", max_rotation, max_rotation >= 0.0)?;
        }
        check("foot_speed", self.foot_speed, self.foot_speed >= 0.0)?;
        check("forward_offset", self.forward_offset, true)?;
        check("radial_projection", self.radial_projection, true)?;
        check("probe_height", self.probe_height, true)?;
        check("probe_length", self.probe_length, self.probe_length > 0.0)?;
        check(
            "command_smoothing",
            self.command_smoothing,
            (0.0..=1.0).contains(&self.command_smoothing),
        )?;

        if let Some(diff) = &self.turn_differential {
            check("turn_differential.forward", diff.forward, diff.forward >= 0.0)?;
            check("turn_differential.radial_inner", diff.radial_inner, true)?;
            check("turn_differential.radial_outer", diff.radial_outer, true)?;
            if !diff.remap.is_finite() {
                return Err(GaitError::InvalidParameter {
                    name: "turn_differential.remap",
                    value: f32::NAN,
                });
            }
        }
        Ok(())
    }
}

fn check(name: &'static str, value: f32, ok: bool) -> Result<(), GaitError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(GaitError::InvalidParameter { name, value })
    }
}
