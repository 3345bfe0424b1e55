//! Raw accelerometer data types

/// One poll's raw accelerometer readings, in device full-scale units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode one axis from its big-endian register pair (`high << 8 | low`)
    #[inline]
    pub fn axis_from_be(bytes: [u8; 2]) -> i16 {
        i16::from_be_bytes(bytes)
    }

    /// Apply a calibration offset, widening so the sum never overflows
    #[inline]
    pub fn corrected(&self, offset: &CalibrationOffset) -> [i32; 3] {
        [
            self.x as i32 + offset.x as i32,
            self.y as i32 + offset.y as i32,
            self.z as i32 + offset.z as i32,
        ]
    }
}

/// Per-axis correction that removes mounting and measurement bias
///
/// Computed once during calibration and frozen afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalibrationOffset {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl CalibrationOffset {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for CalibrationOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x={} y={} z={}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_decode() {
        assert_eq!(RawSample::axis_from_be([0x40, 0x00]), 16384);
        assert_eq!(RawSample::axis_from_be([0xFF, 0xFF]), -1);
        assert_eq!(RawSample::axis_from_be([0x80, 0x00]), i16::MIN);
    }

    #[test]
    fn test_corrected_does_not_overflow() {
        let sample = RawSample::new(i16::MAX, i16::MIN, 0);
        let offset = CalibrationOffset::new(i16::MAX, i16::MIN, -5);
        assert_eq!(sample.corrected(&offset), [65534, -65536, -5]);
    }
}
