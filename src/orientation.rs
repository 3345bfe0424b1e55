//! Orientation estimation from a single accelerometer sample
//!
//! # Limitations
//!
//! The three outputs are the angles between the measured acceleration
//! vector and each sensor axis (`acos(g_i / |g|)`). They are *not* roll,
//! pitch and yaw. They only describe orientation while the device is at
//! rest, when the accelerometer sees gravity alone. Any linear acceleration,
//! shaking or vibration tilts the measured vector and the angles follow it.
//! Rotation about the gravity vector is unobservable.

use crate::devices::mpu6050::AccelRange;
use crate::types::{CalibrationOffset, OrientationState, RawSample};
use serde::{Deserialize, Serialize};

/// What to do when `g_i / |g|` falls outside `[-1, 1]`
///
/// Truncated offsets and noise can push the ratio slightly past ±1, where
/// `acos` is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainPolicy {
    /// Clamp the ratio into `[-1, 1]`; angles are always in `[0, π]`
    #[default]
    Clamp,
    /// Pass the ratio through; out-of-domain input (or a zero vector)
    /// yields NaN angles
    Propagate,
}

/// Converts corrected accelerometer samples into axis-to-gravity angles
#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    offset: CalibrationOffset,
    scale: f64,
    policy: DomainPolicy,
}

impl OrientationEstimator {
    /// The scale divisor comes from `range`, the same value bring-up wrote
    /// to ACCEL_CONFIG.
    pub fn new(offset: CalibrationOffset, range: AccelRange, policy: DomainPolicy) -> Self {
        Self {
            offset,
            scale: range.lsb_per_g() as f64,
            policy,
        }
    }

    /// Corrected sample in g
    pub fn normalized(&self, sample: &RawSample) -> [f64; 3] {
        let corrected = sample.corrected(&self.offset);
        [
            corrected[0] as f64 / self.scale,
            corrected[1] as f64 / self.scale,
            corrected[2] as f64 / self.scale,
        ]
    }

    /// Estimate orientation for one sample
    pub fn estimate(&self, sample: &RawSample) -> OrientationState {
        let g = self.normalized(sample);
        angles_from_vector(g, self.policy)
    }
}

/// `acos(g_i / |g|)` for each axis
pub fn angles_from_vector(g: [f64; 3], policy: DomainPolicy) -> OrientationState {
    let magnitude = (g[0] * g[0] + g[1] * g[1] + g[2] * g[2]).sqrt();
    OrientationState::new(
        axis_angle(g[0] / magnitude, policy),
        axis_angle(g[1] / magnitude, policy),
        axis_angle(g[2] / magnitude, policy),
    )
}

/// `acos(ratio)` under the given domain policy
pub fn axis_angle(ratio: f64, policy: DomainPolicy) -> f64 {
    match policy {
        // NaN (zero vector) survives clamp(); map it to the horizon
        DomainPolicy::Clamp if ratio.is_nan() => std::f64::consts::FRAC_PI_2,
        DomainPolicy::Clamp => ratio.clamp(-1.0, 1.0).acos(),
        DomainPolicy::Propagate => ratio.acos(),
    }
}
