//! Configuration for KonaPointer
//!
//! Loaded from a TOML file. Every section and field has a default, so an
//! empty file (or no file at all) gives a working setup on a level-mounted
//! MPU6050 at 0x68.
//!
//! ```toml
//! [sensor]
//! address = 0x68
//! refresh_rate_hz = 10.0
//! accel_range = "g2"
//! domain_policy = "clamp"
//!
//! [calibration]
//! samples = 20
//! interval_ms = 500
//! magnitude_tolerance = 0.25
//!
//! [pointer]
//! gain = 10.0
//! center_alpha = 1.57
//! center_beta = 1.57
//! screen = { width = 1920, height = 1080 }
//! start_x = 500
//! start_y = 500
//!
//! [logging]
//! level = "info"
//! ```

use crate::devices::mpu6050::{AccelRange, DEFAULT_ADDRESS};
use crate::error::{Error, Result};
use crate::orientation::DomainPolicy;
use crate::types::{PointerPosition, ScreenBounds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Pointer update rate. Fixed; not part of the configuration.
pub const POINTER_RATE_HZ: u32 = 60;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[cfg(feature = "mock")]
    #[serde(default)]
    pub simulation: crate::devices::sim::SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Accelerometer and polling settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorConfig {
    /// 7-bit device address (default: 0x68)
    #[serde(default = "default_address")]
    pub address: u8,

    /// Orientation poll rate in Hz (default: 10.0)
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_hz: f64,

    /// Accelerometer full-scale range (default: ±2g)
    #[serde(default)]
    pub accel_range: AccelRange,

    /// Handling of out-of-domain arccos input (default: clamp)
    #[serde(default)]
    pub domain_policy: DomainPolicy,
}

/// Calibration pass settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalibrationConfig {
    /// Number of samples to average (default: 20)
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Delay between samples in milliseconds (default: 500)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Max relative deviation of the averaged magnitude from 1g (default: 0.25).
    /// Negative disables the check.
    #[serde(default = "default_magnitude_tolerance")]
    pub magnitude_tolerance: f64,
}

/// Pointer control settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PointerConfig {
    /// Pixels per radian of tilt (default: 10.0)
    #[serde(default = "default_gain")]
    pub gain: f64,

    /// Alpha at which the pointer holds still horizontally (default: 1.57)
    #[serde(default = "default_center")]
    pub center_alpha: f64,

    /// Beta at which the pointer holds still vertically (default: 1.57)
    #[serde(default = "default_center")]
    pub center_beta: f64,

    /// Screen size (default: 1920x1080)
    #[serde(default = "default_screen")]
    pub screen: ScreenBounds,

    /// Initial absolute position (default: 500)
    #[serde(default = "default_start")]
    pub start_x: i32,

    /// Initial absolute position (default: 500)
    #[serde(default = "default_start")]
    pub start_y: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Seconds between orientation status lines, 0 disables (default: 1)
    #[serde(default = "default_status_interval")]
    pub status_interval_secs: u64,
}

fn default_address() -> u8 {
    DEFAULT_ADDRESS
}
fn default_refresh_rate() -> f64 {
    10.0
}
fn default_samples() -> usize {
    20
}
fn default_interval_ms() -> u64 {
    500
}
fn default_magnitude_tolerance() -> f64 {
    0.25
}
fn default_gain() -> f64 {
    10.0
}
fn default_center() -> f64 {
    1.57
}
fn default_screen() -> ScreenBounds {
    ScreenBounds::new(1920, 1080)
}
fn default_start() -> i32 {
    500
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_status_interval() -> u64 {
    1
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            refresh_rate_hz: default_refresh_rate(),
            accel_range: AccelRange::default(),
            domain_policy: DomainPolicy::default(),
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            interval_ms: default_interval_ms(),
            magnitude_tolerance: default_magnitude_tolerance(),
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            gain: default_gain(),
            center_alpha: default_center(),
            center_beta: default_center(),
            screen: default_screen(),
            start_x: default_start(),
            start_y: default_start(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            status_interval_secs: default_status_interval(),
        }
    }
}

impl SensorConfig {
    /// Orientation poll period, `1000 / refresh_rate_hz` ms
    pub fn poll_period(&self) -> Duration {
        Duration::from_nanos((1e9 / self.refresh_rate_hz) as u64)
    }
}

impl PointerConfig {
    /// Pointer update period, `1000 / 60` ms
    pub fn period(&self) -> Duration {
        Duration::from_micros(1_000_000 / POINTER_RATE_HZ as u64)
    }

    pub fn start_position(&self) -> PointerPosition {
        PointerPosition::new(self.start_x, self.start_y)
    }
}

impl AppConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the control loop cannot run with
    pub fn validate(&self) -> Result<()> {
        let rate = self.sensor.refresh_rate_hz;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(Error::Config(format!(
                "sensor.refresh_rate_hz must be positive, got {}",
                rate
            )));
        }
        if self.sensor.address > 0x7F {
            return Err(Error::Config(format!(
                "sensor.address {:#04x} is not a 7-bit address",
                self.sensor.address
            )));
        }
        if self.calibration.samples == 0 {
            return Err(Error::Config(
                "calibration.samples must be at least 1".to_string(),
            ));
        }
        if !self.pointer.gain.is_finite() {
            return Err(Error::Config("pointer.gain must be finite".to_string()));
        }
        if self.pointer.screen.width <= 0 || self.pointer.screen.height <= 0 {
            return Err(Error::Config(format!(
                "pointer.screen must be positive, got {}x{}",
                self.pointer.screen.width, self.pointer.screen.height
            )));
        }
        Ok(())
    }
}
