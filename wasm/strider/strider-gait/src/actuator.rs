//! Foot actuator.

use crate::config::FootMotion;
use crate::host::GroundProbe;
use crate::leg::Leg;
use crate::math::move_toward;

/// Move one foot for this tick. Inactive legs and legs whose probe sees no
/// ground stay put; returns whether the foot was driven.
pub fn move_foot<P: GroundProbe>(leg: &mut Leg<P>, motion: FootMotion, max_step: f32, phase: f32) -> bool {
    if !leg.active || !leg.probe.is_colliding() {
        return false;
    }

    match motion {
        FootMotion::Step => {
            leg.foot = move_toward(leg.foot, leg.target, max_step);
        }
        FootMotion::Follow => {
            let Some(contact) = leg.probe.contact_point() else {
                return false;
            };
            leg.foot += (contact - leg.foot) * phase.clamp(0.0, 1.0);
        }
    }
    true
}

pub(crate) fn move_feet<P: GroundProbe>(legs: &mut [Leg<P>], motion: FootMotion, max_step: f32, phase: f32) -> usize {
    legs.iter_mut()
        .map(|leg| move_foot(leg, motion, max_step, phase))
        .filter(|&moved| moved)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leg::Side;
    use crate::mock::StubProbe;
    use nalgebra::Point3;

    fn leg(foot: Point3<f32>, target: Point3<f32>, contact: Option<Point3<f32>>) -> Leg<StubProbe> {
        Leg {
            index: 0,
            side: Side::Left,
            foot,
            probe: StubProbe { contact, ..Default::default() },
            probe_origin: Point3::origin(),
            anchor: foot,
            active: true,
            target,
            rest: foot,
            bone: None,
        }
    }

    #[test]
    fn test_step_is_bounded_and_never_overshoots() {
        let targets = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.05, 0.0, 0.0),
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-4.0, 0.5, 0.25),
        ];
        for &(speed, foot_speed) in &[(1.0f32, 0.1f32), (2.0, 0.5), (0.5, 0.0), (3.0, 2.0)] {
            for target in targets {
                let start = Point3::new(0.0, 0.0, 0.0);
                let mut leg = leg(start, target, Some(target));
                move_foot(&mut leg, FootMotion::Step, speed * foot_speed, 0.0);
                let moved = (leg.foot() - start).norm();
                assert!(moved <= speed * foot_speed + 1e-6);
                assert!(moved <= (target - start).norm() + 1e-6);
            }
        }
    }

    #[test]
    fn test_no_contact_skips() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let mut leg = leg(start, Point3::new(1.0, 0.0, 0.0), None);
        assert!(!move_foot(&mut leg, FootMotion::Step, 1.0, 0.5));
        assert_eq!(leg.foot(), start);
    }

    #[test]
    fn test_inactive_leg_stays_planted() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let mut leg = leg(start, Point3::new(1.0, 0.0, 0.0), Some(Point3::new(1.0, 0.0, 0.0)));
        leg.active = false;
        assert!(!move_foot(&mut leg, FootMotion::Step, 1.0, 0.5));
        assert_eq!(leg.foot(), start);
    }

    #[test]
    fn test_follow_lerps_toward_live_contact() {
        let start = Point3::new(0.0, 0.0, 0.0);
        // Follow ignores the cached target.
        let mut leg = leg(start, Point3::new(-9.0, 0.0, 0.0), Some(Point3::new(2.0, 0.0, 0.0)));
        assert!(move_foot(&mut leg, FootMotion::Follow, 0.0, 0.25));
        assert!((leg.foot() - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_move_feet_counts_driven_legs() {
        let contact = Some(Point3::new(1.0, 0.0, 0.0));
        let mut legs = vec![
            leg(Point3::origin(), Point3::new(1.0, 0.0, 0.0), contact),
            leg(Point3::origin(), Point3::new(1.0, 0.0, 0.0), None),
        ];
        assert_eq!(move_feet(&mut legs, FootMotion::Step, 0.1, 0.0), 1);
    }
}
