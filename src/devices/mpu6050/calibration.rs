//! Mounting-bias calibration
//!
//! The device is assumed to be resting level while calibration runs, so the
//! expected reading is gravity on Z and nothing on X/Y. The offset is the
//! difference between that reference and the averaged readings.
//!
//! The average uses integer division that truncates toward zero. The residual
//! bias left by that truncation is part of the observable behavior, so it is
//! not replaced with float rounding.

use super::read_sample;
use super::registers::AccelRange;
use crate::bus::RegisterBus;
use crate::config::CalibrationConfig;
use crate::error::{Error, Result};
use crate::types::CalibrationOffset;
use std::thread;
use std::time::Duration;

/// Averages raw samples against the level-mounted reference vector
#[derive(Debug, Clone)]
pub struct CalibrationEngine {
    samples: usize,
    interval: Duration,
    range: AccelRange,
    /// Allowed relative deviation of the averaged magnitude from 1g; negative disables
    magnitude_tolerance: f64,
}

impl CalibrationEngine {
    pub fn new(samples: usize, interval: Duration, range: AccelRange) -> Self {
        Self {
            samples,
            interval,
            range,
            magnitude_tolerance: -1.0,
        }
    }

    pub fn from_config(config: &CalibrationConfig, range: AccelRange) -> Self {
        Self::new(
            config.samples,
            Duration::from_millis(config.interval_ms),
            range,
        )
        .with_magnitude_tolerance(config.magnitude_tolerance)
    }

    /// Reject calibration when the averaged vector is further than
    /// `tolerance` (relative) from 1g
    pub fn with_magnitude_tolerance(mut self, tolerance: f64) -> Self {
        self.magnitude_tolerance = tolerance;
        self
    }

    /// Expected raw reading when mounted level
    pub fn reference(&self) -> [i16; 3] {
        [0, 0, self.range.lsb_per_g()]
    }

    /// Sample the bus and compute the offset
    ///
    /// Blocks for `samples * interval` and cannot be cancelled. A bus error
    /// aborts calibration.
    pub fn run<B: RegisterBus + ?Sized>(&self, bus: &mut B) -> Result<CalibrationOffset> {
        if self.samples == 0 {
            return Err(Error::InvalidParameter(
                "calibration needs at least one sample".to_string(),
            ));
        }

        log::info!(
            "Calibrating sensor ({} samples, {} ms apart)...",
            self.samples,
            self.interval.as_millis()
        );

        let mut sum = [0i64; 3];
        for i in 0..self.samples {
            let sample = read_sample(bus)?;
            sum[0] += sample.x as i64;
            sum[1] += sample.y as i64;
            sum[2] += sample.z as i64;
            log::trace!("Calibration sample {}: {:?}", i + 1, sample);

            // Spread samples out so they don't all catch the same vibration
            thread::sleep(self.interval);
        }

        let n = self.samples as i64;
        let average = [sum[0] / n, sum[1] / n, sum[2] / n];
        self.check_magnitude(average)?;

        let offset = offset_from_average(average, self.reference());
        log::info!("Calibrated. Offsets: {}", offset);
        Ok(offset)
    }

    fn check_magnitude(&self, average: [i64; 3]) -> Result<()> {
        if self.magnitude_tolerance < 0.0 {
            return Ok(());
        }

        let magnitude = average
            .iter()
            .map(|&v| (v as f64) * (v as f64))
            .sum::<f64>()
            .sqrt();
        let expected = self.range.lsb_per_g() as f64;

        if ((magnitude - expected) / expected).abs() > self.magnitude_tolerance {
            log::error!(
                "Calibration rejected: averaged magnitude {:.0}, expected ~{:.0}",
                magnitude,
                expected
            );
            return Err(Error::CalibrationOutOfRange {
                magnitude,
                expected,
            });
        }
        Ok(())
    }
}

/// `reference - average`, narrowed to i16 with wrap-around
pub fn offset_from_average(average: [i64; 3], reference: [i16; 3]) -> CalibrationOffset {
    CalibrationOffset::new(
        (reference[0] as i64 - average[0]) as i16,
        (reference[1] as i64 - average[1]) as i16,
        (reference[2] as i64 - average[2]) as i16,
    )
}
