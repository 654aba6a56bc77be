use nalgebra::Point3;

use crate::host::{BoneId, GroundProbe};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Legs `[0, leg_count / 2)` are on the left.
    pub fn of(index: usize, leg_count: usize) -> Side {
        if index < leg_count / 2 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// The leg across the body: `(index + leg_count / 2) mod leg_count`.
///
/// `leg_count` must be even and non-zero; the walker checks this at setup.
pub fn opposite(index: usize, leg_count: usize) -> usize {
    (index + leg_count / 2) % leg_count
}

/// One foot, its probe and its gait state.
#[derive(Debug)]
pub struct Leg<P> {
    pub(crate) index: usize,
    pub(crate) side: Side,
    pub(crate) foot: Point3<f32>,
    pub(crate) probe: P,
    pub(crate) probe_origin: Point3<f32>,
    /// World anchor used for the last probe placement.
    pub(crate) anchor: Point3<f32>,
    pub(crate) active: bool,
    pub(crate) target: Point3<f32>,
    /// Rest anchor in body space.
    pub(crate) rest: Point3<f32>,
    pub(crate) bone: Option<BoneId>,
}

impl<P: GroundProbe> Leg<P> {
    /// Take the probe's contact as the new target. Without a contact the old
    /// target stays.
    pub fn capture(&mut self) {
        if let Some(contact) = self.probe.contact_point() {
            self.target = contact;
        }
    }
}

impl<P> Leg<P> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn foot(&self) -> Point3<f32> {
        self.foot
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    /// Where the probe was placed on the last tick.
    pub fn probe_origin(&self) -> Point3<f32> {
        self.probe_origin
    }

    pub fn anchor(&self) -> Point3<f32> {
        self.anchor
    }

    pub fn rest_anchor(&self) -> Point3<f32> {
        self.rest
    }

    pub fn bone(&self) -> Option<BoneId> {
        self.bone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::StubProbe;

    fn leg(probe: StubProbe) -> Leg<StubProbe> {
        Leg {
            index: 0,
            side: Side::Left,
            foot: Point3::new(1.0, 0.0, 0.0),
            probe,
            probe_origin: Point3::origin(),
            anchor: Point3::origin(),
            active: false,
            target: Point3::new(1.0, 0.0, 0.0),
            rest: Point3::new(1.0, 0.0, 0.0),
            bone: None,
        }
    }

    #[test]
    fn test_opposite_is_an_involution() {
        for leg_count in [2usize, 4, 6, 8, 12] {
            for i in 0..leg_count {
                assert_eq!(opposite(opposite(i, leg_count), leg_count), i);
                assert_ne!(Side::of(i, leg_count), Side::of(opposite(i, leg_count), leg_count));
            }
        }
    }

    #[test]
    fn test_sides_split_at_half() {
        let sides: Vec<Side> = (0..6).map(|i| Side::of(i, 6)).collect();
        assert_eq!(
            sides,
            vec![Side::Left, Side::Left, Side::Left, Side::Right, Side::Right, Side::Right]
        );
    }

    #[test]
    fn test_capture_without_contact_keeps_target() {
        let mut leg = leg(StubProbe::default());
        leg.capture();
        assert_eq!(leg.target(), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_capture_is_idempotent() {
        let contact = Point3::new(2.0, -0.5, 3.0);
        let mut leg = leg(StubProbe::hitting(contact));
        leg.capture();
        let once = leg.target();
        leg.capture();
        assert_eq!(leg.target(), once);
        assert_eq!(once, contact);
    }
}
