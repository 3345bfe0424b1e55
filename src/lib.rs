//! KonaPointer - tilt-to-pointer control for MPU6050 accelerometers
//!
//! Brings an MPU6050 up over a register bus, calibrates out its mounting
//! bias, and turns the gravity vector into three axis angles. A 60 Hz
//! pointer loop converts those angles into relative pointer motion.
//!
//! ```no_run
//! use kona_pointer::{AppConfig, LogActuator, TiltSensor};
//! use kona_pointer::devices::sim::SimulatedMpu6050;
//! use kona_pointer::threads::spawn_pointer_thread;
//!
//! # fn main() -> kona_pointer::Result<()> {
//! let config = AppConfig::default();
//! let bus = SimulatedMpu6050::new(&config.simulation, config.sensor.address);
//! let sensor = TiltSensor::start(bus, &config)?;
//!
//! if sensor.wait_calibrated() {
//!     let pointer = spawn_pointer_thread(
//!         LogActuator::new(),
//!         &config.pointer,
//!         sensor.shared(),
//!         sensor.stop_signal(),
//!     )?;
//!     println!("{}", sensor);
//!     sensor.kill();
//!     let _ = pointer.join();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `mock` (default): simulated MPU6050 in [`devices::sim`]

pub mod bus;
pub mod config;
pub mod devices;
pub mod error;
pub mod orientation;
pub mod pointer;
pub mod sensor;
pub mod shared;
pub mod threads;
pub mod types;

// Re-export commonly used types
pub use bus::{I2cBus, MockBus, RegisterBus};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use orientation::{DomainPolicy, OrientationEstimator};
pub use pointer::{LogActuator, Pointer, PointerGain, PositionActuator, RecordingActuator};
pub use sensor::TiltSensor;
pub use shared::{SharedOrientation, StopSignal};
pub use types::{CalibrationOffset, OrientationState, PointerPosition, RawSample, ScreenBounds};
