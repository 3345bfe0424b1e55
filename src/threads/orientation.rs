//! Orientation poll thread: calibration, then fixed-rate estimation.
//!
//! The thread first runs the blocking calibration pass, stores the offset
//! and raises `calibrated`. It then reads one sample per period, converts it
//! and publishes the angles. A failed read is logged and the tick skipped.

use std::sync::Arc;
use std::time::Duration;

use crate::bus::RegisterBus;
use crate::config::AppConfig;
use crate::devices::mpu6050::{CalibrationEngine, Mpu6050};
use crate::error::Result;
use crate::orientation::{DomainPolicy, OrientationEstimator};
use crate::shared::{SharedOrientation, StopSignal};

use super::Ticker;

/// Orientation thread state and logic.
pub struct OrientationThread<B> {
    device: Mpu6050<B>,
    calibration: CalibrationEngine,
    policy: DomainPolicy,
    period: Duration,
    shared: Arc<SharedOrientation>,
    stop: StopSignal,
}

impl<B: RegisterBus> OrientationThread<B> {
    /// `device` must already be through bring-up.
    pub fn new(
        device: Mpu6050<B>,
        config: &AppConfig,
        shared: Arc<SharedOrientation>,
        stop: StopSignal,
    ) -> Self {
        let calibration = CalibrationEngine::from_config(&config.calibration, device.range());
        Self {
            device,
            calibration,
            policy: config.sensor.domain_policy,
            period: config.sensor.poll_period(),
            shared,
            stop,
        }
    }

    /// Run calibration and then the poll loop until stopped.
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "Orientation thread started ({:.1} Hz)",
            1.0 / self.period.as_secs_f64()
        );

        let offset = self.device.calibrate(&self.calibration)?;
        self.shared.mark_calibrated(offset);

        let estimator = OrientationEstimator::new(offset, self.device.range(), self.policy);
        let mut ticker = Ticker::new(self.period);

        while !self.stop.is_stopped() {
            self.poll_once(&estimator);
            ticker.wait();
        }

        log::info!(
            "Orientation thread exiting after {} polls",
            self.shared.poll_count()
        );
        Ok(())
    }

    fn poll_once(&mut self, estimator: &OrientationEstimator) {
        match self.device.read_sample() {
            Ok(sample) => {
                let state = estimator.estimate(&sample);
                if state.is_undefined() {
                    log::trace!("Undefined orientation for sample {:?}", sample);
                }
                self.shared.publish(state);
            }
            Err(e) => {
                log::warn!("Accelerometer read failed, skipping sample: {}", e);
            }
        }
        self.shared.record_poll();
    }
}
