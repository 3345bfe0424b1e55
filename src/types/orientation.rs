//! Orientation angle types

/// Axis-to-gravity angles in radians
///
/// `alpha`, `beta` and `gamma` are the angles between gravity and the X, Y
/// and Z sensor axes. When the device lies flat they read (π/2, π/2, 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationState {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl OrientationState {
    pub const fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Angle to the X axis in whole degrees (truncated)
    pub fn x_rotation(&self) -> i32 {
        self.alpha.to_degrees() as i32
    }

    /// Angle to the Y axis in whole degrees (truncated)
    pub fn y_rotation(&self) -> i32 {
        self.beta.to_degrees() as i32
    }

    /// Angle to the Z axis in whole degrees (truncated)
    pub fn z_rotation(&self) -> i32 {
        self.gamma.to_degrees() as i32
    }

    /// True if any angle is NaN
    pub fn is_undefined(&self) -> bool {
        self.alpha.is_nan() || self.beta.is_nan() || self.gamma.is_nan()
    }
}

impl std::fmt::Display for OrientationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Roll: {:.2} | Pitch: {:.2} | Yaw: {:.2}",
            truncate_to_hundredths(self.alpha),
            truncate_to_hundredths(self.beta),
            truncate_to_hundredths(self.gamma)
        )
    }
}

/// Drop everything past the second decimal (toward zero, no rounding)
fn truncate_to_hundredths(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_degree_accessors_truncate() {
        let state = OrientationState::new(1.0, 3.0, 0.0174);
        assert_eq!(state.x_rotation(), 57);
        assert_eq!(state.y_rotation(), 171);
        // 0.0174 rad = 0.997 deg
        assert_eq!(state.z_rotation(), 0);
    }

    #[test]
    fn test_display_summary() {
        let state = OrientationState::new(FRAC_PI_2, FRAC_PI_2, 0.0);
        assert_eq!(state.to_string(), "Roll: 1.57 | Pitch: 1.57 | Yaw: 0.00");
    }

    #[test]
    fn test_display_truncates_instead_of_rounding() {
        let state = OrientationState::new(0.999, std::f64::consts::PI, 2.3456);
        assert_eq!(state.to_string(), "Roll: 0.99 | Pitch: 3.14 | Yaw: 2.34");
    }

    #[test]
    fn test_nan_degrees_are_zero() {
        let state = OrientationState::new(f64::NAN, 0.0, 0.0);
        assert!(state.is_undefined());
        assert_eq!(state.x_rotation(), 0);
    }
}
