//! Two-rate control loop.
//!
//! - Orientation thread: calibration, then accelerometer polling at the
//!   configured refresh rate
//! - Pointer thread: 60 Hz pointer updates from the latest published angles
//!
//! The threads share only [`SharedOrientation`] and a [`StopSignal`].

mod orientation;
mod pointer;
mod ticker;

pub use orientation::OrientationThread;
pub use pointer::PointerThread;
pub use ticker::Ticker;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::bus::RegisterBus;
use crate::config::{AppConfig, PointerConfig};
use crate::devices::mpu6050::Mpu6050;
use crate::error::{Error, Result};
use crate::pointer::PositionActuator;
use crate::shared::{SharedOrientation, StopSignal};

/// Spawn the orientation thread for an initialized device.
///
/// The handle yields the calibration error if the thread never got past
/// calibration.
pub fn spawn_orientation_thread<B: RegisterBus + 'static>(
    device: Mpu6050<B>,
    config: &AppConfig,
    shared: Arc<SharedOrientation>,
    stop: StopSignal,
) -> Result<JoinHandle<Result<()>>> {
    let mut orientation = OrientationThread::new(device, config, shared, stop);

    thread::Builder::new()
        .name("orientation-poll".into())
        .spawn(move || {
            let result = orientation.run();
            if let Err(e) = &result {
                log::error!("Orientation thread error: {}", e);
            }
            result
        })
        .map_err(|e| Error::Other(format!("Failed to spawn orientation thread: {}", e)))
}

/// Spawn the pointer thread.
///
/// Normally started once `shared` reports calibrated; before that it would
/// steer by the zeroed startup angles.
pub fn spawn_pointer_thread<A: PositionActuator + 'static>(
    actuator: A,
    config: &PointerConfig,
    shared: Arc<SharedOrientation>,
    stop: StopSignal,
) -> Result<JoinHandle<()>> {
    if !shared.is_calibrated() {
        log::warn!("Pointer thread started before calibration completed");
    }

    let mut pointer = PointerThread::new(actuator, config, shared, stop);

    thread::Builder::new()
        .name("pointer-update".into())
        .spawn(move || pointer.run())
        .map_err(|e| Error::Other(format!("Failed to spawn pointer thread: {}", e)))
}
