//! The walker: one ordered pass per simulation tick.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::actuator::move_feet;
use crate::body::{steer, DriveCommand, TurnState};
use crate::config::{AnchorMode, GaitConfig};
use crate::error::GaitError;
use crate::gait::{flip, GaitClock};
use crate::host::{BoneId, DebugDraw, GroundProbe, Marker, PhysicsBody, Skeleton};
use crate::leg::{Leg, Side};
use crate::probe::place_probes;

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    pub flipped: bool,
    pub feet_moved: usize,
    pub heading_delta: f32,
}

pub struct Walker<P> {
    config: GaitConfig,
    clock: GaitClock,
    command: DriveCommand,
    target_command: DriveCommand,
    turn: TurnState,
    legs: Vec<Leg<P>>,
    /// Root whose children the legs were bound to at setup.
    bound_root: Option<BoneId>,
}

impl<P: GroundProbe> Walker<P> {
    /// Build one leg per foot position, spawning a probe for each.
    ///
    /// `feet` are world positions at setup; their body-space offsets become
    /// the rest anchors. In skeletal mode the children of the configured root
    /// bone are paired with the feet in order.
    pub fn new<S: Skeleton>(
        config: GaitConfig,
        body_pose: &Isometry3<f32>,
        feet: &[Point3<f32>],
        skeleton: &S,
        mut spawn_probe: impl FnMut(usize) -> P,
    ) -> Result<Self, GaitError> {
        config.validate()?;

        let leg_count = feet.len();
        if leg_count == 0 {
            return Err(GaitError::NoLegs);
        }
        if leg_count % 2 != 0 {
            return Err(GaitError::OddLegCount(leg_count));
        }

        let bones = resolve_bones(config.anchor, skeleton, leg_count)?;
        let to_body = body_pose.inverse();

        let legs: Vec<Leg<P>> = feet
            .iter()
            .zip(bones)
            .enumerate()
            .map(|(index, (&foot, bone))| Leg {
                index,
                side: Side::of(index, leg_count),
                foot,
                probe: spawn_probe(index),
                probe_origin: foot,
                anchor: foot,
                active: config.initial_active.starts_active(index, leg_count),
                target: foot,
                rest: to_body * foot,
                bone,
            })
            .collect();

        log::info!(
            "walker ready: {} legs, anchor {:?}, initial {:?}, {} active",
            leg_count,
            config.anchor,
            config.initial_active,
            legs.iter().filter(|leg| leg.active).count()
        );

        let bound_root = match config.anchor {
            AnchorMode::Skeletal { root } => Some(root),
            AnchorMode::RestPose => None,
        };
        let command = DriveCommand::new(config.speed, config.turn_rate);
        Ok(Self {
            bound_root,
            clock: GaitClock::new(config.cycle_rate),
            command,
            target_command: command,
            turn: TurnState::default(),
            legs,
            config,
        })
    }

    /// Advance the walker by `dt` seconds.
    ///
    /// Order: gait phase and flip, body heading and velocity, probe
    /// placement, body integration, feet, then the optional debug sink.
    /// A non-positive or non-finite `dt` leaves everything untouched.
    pub fn tick<B: PhysicsBody, S: Skeleton>(
        &mut self,
        dt: f32,
        body: &mut B,
        skeleton: &S,
        draw: Option<&mut dyn DebugDraw>,
    ) -> TickReport {
        if !(dt.is_finite() && dt > 0.0) {
            return TickReport::default();
        }

        self.command.lerp(&self.target_command, self.config.command_smoothing);
        self.command.clamp(self.config.max_speed);
        let speed = self.command.speed;

        let flipped = self.clock.advance(dt, speed);
        if flipped {
            flip(&mut self.legs);
            log::debug!("gait flip #{} at phase {:.3}", self.clock.wraps(), self.clock.phase());
        }

        self.turn = TurnState::resolve(&self.config, &self.command, dt);
        steer(body, &self.turn, speed);

        let pose = body.pose();
        place_probes(&mut self.legs, &self.config, &pose, &self.turn, skeleton);

        body.integrate_and_slide(dt);

        let max_step = speed.abs() * self.config.foot_speed;
        let feet_moved = move_feet(&mut self.legs, self.config.foot_motion, max_step, self.clock.phase());

        if let Some(draw) = draw {
            self.draw_debug(draw);
        }

        TickReport {
            flipped,
            feet_moved,
            heading_delta: self.turn.delta,
        }
    }

    /// Replace the tuning. The legs, their targets and the phase carry over.
    ///
    /// Leg bones are bound once at setup, so a skeletal anchor must name the
    /// same root the walker was built with.
    pub fn set_config(&mut self, config: GaitConfig) -> Result<(), GaitError> {
        config.validate()?;
        if let AnchorMode::Skeletal { root } = config.anchor {
            if let Some(bound) = self.bound_root.filter(|&bound| bound != root) {
                return Err(GaitError::RootChanged { bound, requested: root });
            }
            let resolved = self.legs.iter().filter(|leg| leg.bone.is_some()).count();
            if resolved != self.legs.len() {
                return Err(GaitError::BoneCountMismatch {
                    root,
                    bones: resolved,
                    legs: self.legs.len(),
                });
            }
        }
        self.clock.set_cycle_rate(config.cycle_rate);
        self.config = config;
        Ok(())
    }
}

impl<P> Walker<P> {
    /// Steer toward `command`; the walker eases into it.
    pub fn drive(&mut self, command: DriveCommand) {
        self.target_command = command;
    }

    /// Steer without easing.
    pub fn drive_now(&mut self, command: DriveCommand) {
        self.target_command = command;
        self.command = command;
    }

    pub fn draw_debug(&self, draw: &mut dyn DebugDraw)
    where
        P: GroundProbe,
    {
        let cast = -Vector3::y() * self.config.probe_length;
        for leg in &self.legs {
            draw.sphere(leg.probe_origin, 0.04, Marker::Probe);
            draw.line(leg.probe_origin, leg.probe_origin + cast, Marker::ProbeRay);
            if let Some(contact) = leg.probe.contact_point() {
                draw.sphere(contact, 0.03, Marker::Contact);
            }
            draw.sphere(leg.target, 0.05, Marker::Target);

            let foot = if leg.active { Marker::ActiveFoot } else { Marker::PlantedFoot };
            draw.sphere(leg.foot, 0.07, foot);
            draw.line(leg.anchor, leg.foot, Marker::Reach);
        }
    }

    pub fn legs(&self) -> &[Leg<P>] {
        &self.legs
    }

    /// Probes in leg order, for hosts that sweep them after the tick.
    pub fn probes_mut(&mut self) -> impl Iterator<Item = &mut P> + '_ {
        self.legs.iter_mut().map(|leg| &mut leg.probe)
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    pub fn active_count(&self) -> usize {
        self.legs.iter().filter(|leg| leg.active).count()
    }

    pub fn phase(&self) -> f32 {
        self.clock.phase()
    }

    pub fn flips(&self) -> u64 {
        self.clock.wraps()
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn command(&self) -> DriveCommand {
        self.command
    }

    pub fn config(&self) -> &GaitConfig {
        &self.config
    }
}

fn resolve_bones<S: Skeleton>(
    anchor: AnchorMode,
    skeleton: &S,
    leg_count: usize,
) -> Result<Vec<Option<BoneId>>, GaitError> {
    let AnchorMode::Skeletal { root } = anchor else {
        return Ok(vec![None; leg_count]);
    };

    let children = skeleton.child_bones(root);
    if children.len() != leg_count {
        return Err(GaitError::BoneCountMismatch {
            root,
            bones: children.len(),
            legs: leg_count,
        });
    }

    for &bone in &children {
        if skeleton.bone_position(bone).is_none() {
            log::warn!("leg bone {} has no pose; that leg will use its rest anchor", bone);
        }
    }
    Ok(children.into_iter().map(Some).collect())
}
