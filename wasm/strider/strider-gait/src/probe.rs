//! Probe placement.
//!
//! Every tick each probe is moved to its anchor, pushed forward along the
//! body heading and outward from the body center. While turning, the outward
//! push swings around the vertical axis and the inner legs shorten their
//! forward reach.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::body::{forward_axis, TurnState};
use crate::config::{AnchorMode, GaitConfig};
use crate::host::{GroundProbe, Skeleton};
use crate::leg::{Leg, Side};
use crate::math::{horizontal_unit, yaw};

/// The side on the inside of the current turn, if any.
pub fn inner_side(turn: &TurnState) -> Option<Side> {
    if turn.rate > f32::EPSILON {
        Some(Side::Left)
    } else if turn.rate < -f32::EPSILON {
        Some(Side::Right)
    } else {
        None
    }
}

/// Forward-offset scale and radial swing angle for a leg on `side`.
pub fn differential(config: &GaitConfig, side: Side, turn: &TurnState) -> (f32, f32) {
    let (Some(diff), Some(inner)) = (&config.turn_differential, inner_side(turn)) else {
        return (1.0, 0.0);
    };

    let factor = diff.remap.apply(turn.rate);
    if side == inner {
        ((1.0 - diff.forward * factor.abs()).max(0.0), factor * diff.radial_inner)
    } else {
        (1.0, factor * diff.radial_outer)
    }
}

/// World anchor of a leg. Skeletal legs whose bone cannot be resolved fall
/// back to the rest anchor.
pub fn anchor<P, S: Skeleton>(
    leg: &Leg<P>,
    mode: AnchorMode,
    pose: &Isometry3<f32>,
    skeleton: &S,
) -> Point3<f32> {
    let local = match (mode, leg.bone) {
        (AnchorMode::Skeletal { .. }, Some(bone)) => {
            skeleton.bone_position(bone).unwrap_or(leg.rest)
        }
        _ => leg.rest,
    };
    pose * local
}

/// Probe origin for a leg anchored at `anchor`.
pub fn probe_origin(
    config: &GaitConfig,
    side: Side,
    anchor: Point3<f32>,
    pose: &Isometry3<f32>,
    turn: &TurnState,
) -> Point3<f32> {
    let center = Point3::from(pose.translation.vector);
    let forward = pose.rotation * forward_axis();
    let outward = horizontal_unit(&(anchor - center));
    let (forward_scale, swing) = differential(config, side, turn);

    let forward_offset = forward * (config.forward_offset * forward_scale);
    let radial_offset = yaw(swing) * outward * config.radial_projection;
    anchor + forward_offset + radial_offset + Vector3::y() * config.probe_height
}

/// Move every probe for this tick and aim it straight down.
pub(crate) fn place_probes<P: GroundProbe, S: Skeleton>(
    legs: &mut [Leg<P>],
    config: &GaitConfig,
    pose: &Isometry3<f32>,
    turn: &TurnState,
    skeleton: &S,
) {
    let cast = -Vector3::y() * config.probe_length;
    for leg in legs.iter_mut() {
        let world_anchor = anchor(leg, config.anchor, pose, skeleton);
        let origin = probe_origin(config, leg.side, world_anchor, pose, turn);
        leg.anchor = world_anchor;
        leg.probe_origin = origin;
        leg.probe.set_world_position(origin);
        leg.probe.set_cast_vector(cast);
    }
}
