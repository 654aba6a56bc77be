use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Bounded linear remap: clamp into `[in_min, in_max]`, then interpolate onto
/// `[out_min, out_max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Remap {
    pub in_min: f32,
    pub in_max: f32,
    pub out_min: f32,
    pub out_max: f32,
}

impl Remap {
    pub fn new(in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> Self {
        Self { in_min, in_max, out_min, out_max }
    }

    /// A collapsed input range saturates: inputs at or above it map to
    /// `out_max`, inputs below it to `out_min`.
    pub fn apply(&self, value: f32) -> f32 {
        let span = self.in_max - self.in_min;
        if span.abs() <= f32::EPSILON {
            return if value >= self.in_min { self.out_max } else { self.out_min };
        }

        let lo = self.in_min.min(self.in_max);
        let hi = self.in_min.max(self.in_max);
        let t = (value.clamp(lo, hi) - self.in_min) / span;
        self.out_min + (self.out_max - self.out_min) * t
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.in_min.is_finite()
            && self.in_max.is_finite()
            && self.out_min.is_finite()
            && self.out_max.is_finite()
    }
}

impl Default for Remap {
    fn default() -> Self {
        Self::new(-2.0, 2.0, -0.6, 0.6)
    }
}

/// Moves `from` toward `to` by at most `max_step`, landing exactly on `to`
/// when it is closer than that.
pub fn move_toward(from: Point3<f32>, to: Point3<f32>, max_step: f32) -> Point3<f32> {
    if max_step <= 0.0 {
        return from;
    }
    let delta = to - from;
    let distance = delta.norm();
    if distance <= max_step {
        return to;
    }
    from + delta * (max_step / distance)
}

/// Rotation about world up (+Y).
pub fn yaw(angle: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle)
}

/// Drops the vertical component and normalizes; zero when the vector is
/// (nearly) vertical.
pub fn horizontal_unit(v: &Vector3<f32>) -> Vector3<f32> {
    let flat = Vector3::new(v.x, 0.0, v.z);
    flat.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}
