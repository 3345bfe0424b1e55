//! Tilt sensor handle
//!
//! [`TiltSensor::start`] brings the device up on the caller's thread, then
//! hands the bus to a background orientation thread that calibrates and
//! keeps the latest angles in a [`SharedOrientation`]. All accessors read
//! that shared state and never touch the bus.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::bus::RegisterBus;
use crate::config::AppConfig;
use crate::devices::mpu6050::Mpu6050;
use crate::error::{Error, Result};
use crate::shared::{SharedOrientation, StopSignal};
use crate::threads::spawn_orientation_thread;
use crate::types::{CalibrationOffset, OrientationState};

/// How often `wait_calibrated` re-checks the flag
const CALIBRATION_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Running accelerometer with background orientation polling
pub struct TiltSensor {
    shared: Arc<SharedOrientation>,
    stop: StopSignal,
    handle: Option<JoinHandle<Result<()>>>,
}

impl TiltSensor {
    /// Bring up the device and start the orientation thread.
    ///
    /// An invalid config or a bring-up failure is returned here and no
    /// thread is started. Calibration happens in the background; see
    /// [`TiltSensor::is_calibrated`].
    pub fn start<B: RegisterBus + 'static>(bus: B, config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let mut device = Mpu6050::new(bus, config.sensor.accel_range);
        device.initialize()?;
        log::info!("MPU6050 initialized");

        let shared = Arc::new(SharedOrientation::new());
        let stop = StopSignal::new();
        let handle =
            spawn_orientation_thread(device, config, Arc::clone(&shared), stop.clone())?;

        Ok(Self {
            shared,
            stop,
            handle: Some(handle),
        })
    }

    pub fn is_calibrated(&self) -> bool {
        self.shared.is_calibrated()
    }

    /// Block until calibration completes.
    ///
    /// Returns false if the orientation thread ended (calibration error or
    /// stop request) without calibrating.
    pub fn wait_calibrated(&self) -> bool {
        loop {
            if self.shared.is_calibrated() {
                return true;
            }
            if self.stop.is_stopped() || !self.is_running() {
                return self.shared.is_calibrated();
            }
            thread::sleep(CALIBRATION_POLL_INTERVAL);
        }
    }

    /// Whether the orientation thread is still alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Angle between the gravity vector and +X, radians
    pub fn alpha(&self) -> f64 {
        self.shared.alpha()
    }

    /// Angle between the gravity vector and +Y, radians
    pub fn beta(&self) -> f64 {
        self.shared.beta()
    }

    /// Angle between the gravity vector and +Z, radians
    pub fn gamma(&self) -> f64 {
        self.shared.gamma()
    }

    pub fn x_rotation(&self) -> i32 {
        self.orientation().x_rotation()
    }

    pub fn y_rotation(&self) -> i32 {
        self.orientation().y_rotation()
    }

    pub fn z_rotation(&self) -> i32 {
        self.orientation().z_rotation()
    }

    /// Latest angles (fields may come from different polls)
    pub fn orientation(&self) -> OrientationState {
        self.shared.load()
    }

    pub fn offset(&self) -> Option<CalibrationOffset> {
        self.shared.offset()
    }

    /// Completed poll iterations
    pub fn poll_count(&self) -> u64 {
        self.shared.poll_count()
    }

    /// Shared state, for driving a pointer thread
    pub fn shared(&self) -> Arc<SharedOrientation> {
        Arc::clone(&self.shared)
    }

    /// Token that stops this sensor (and anything else holding it)
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Ask the orientation thread to stop after its current iteration
    pub fn kill(&self) {
        log::debug!("Stopping orientation thread");
        self.stop.stop();
    }

    /// Wait for the orientation thread and return how it ended.
    ///
    /// Does not request a stop; call [`TiltSensor::kill`] first unless the
    /// thread is expected to exit on its own.
    pub fn join(mut self) -> Result<()> {
        self.join_inner()
    }

    fn join_inner(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| Error::ThreadPanic)?,
            None => Ok(()),
        }
    }
}

impl fmt::Display for TiltSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.orientation(), f)
    }
}

impl Drop for TiltSensor {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.kill();
            if let Err(e) = self.join_inner() {
                log::error!("Orientation thread ended with error: {}", e);
            }
        }
    }
}
