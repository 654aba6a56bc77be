//! Gait scheduling: the phase accumulator and the active-set flip.

use crate::config::ActivePolicy;
use crate::host::GroundProbe;
use crate::leg::Leg;

impl ActivePolicy {
    /// Whether leg `index` is active before the first flip.
    ///
    /// Alternating gives `{0, 2, 5, 7}` for eight legs and the classic tripod
    /// `{0, 2, 4}` for six: neighbours in a row differ, and so do opposites.
    pub fn starts_active(self, index: usize, leg_count: usize) -> bool {
        let half = leg_count / 2;
        if half == 0 {
            return false;
        }
        match self {
            ActivePolicy::Alternating => (index % half + index / half) % 2 == 0,
            ActivePolicy::FrontBack => index < half,
        }
    }
}

/// Normalized gait phase in `[0, 1)`.
#[derive(Clone, Debug, Default)]
pub struct GaitClock {
    cycle_rate: f32,
    phase: f32,
    wraps: u64,
}

impl GaitClock {
    pub fn new(cycle_rate: f32) -> Self {
        Self { cycle_rate, phase: 0.0, wraps: 0 }
    }

    /// Accumulate `cycle_rate * |speed| * dt` and wrap by subtraction.
    ///
    /// Returns `true` when the active set has to be inverted. An increment
    /// large enough to wrap twice in one tick leaves the set as it was.
    pub fn advance(&mut self, dt: f32, speed: f32) -> bool {
        if !(dt.is_finite() && dt > 0.0) {
            return false;
        }
        let step = self.cycle_rate * speed.abs() * dt;
        if !step.is_finite() {
            return false;
        }

        self.phase += step;
        if self.phase < 1.0 {
            return false;
        }
        let wraps = self.phase.floor();
        self.phase -= wraps;
        let wraps = wraps as u64;
        self.wraps += wraps;
        wraps % 2 == 1
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Half-cycles completed so far.
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    pub fn cycle_rate(&self) -> f32 {
        self.cycle_rate
    }

    pub fn set_cycle_rate(&mut self, cycle_rate: f32) {
        if cycle_rate.is_finite() && cycle_rate >= 0.0 {
            self.cycle_rate = cycle_rate;
        }
    }
}

/// Invert every leg; newly active legs capture a fresh target.
pub(crate) fn flip<P: GroundProbe>(legs: &mut [Leg<P>]) {
    for leg in legs.iter_mut() {
        leg.active = !leg.active;
        if leg.active {
            leg.capture();
        }
    }
}
