//! Shared helpers for integration tests

use kona_pointer::{AppConfig, RawSample};
use std::thread;
use std::time::{Duration, Instant};

/// Raw reading of a level device at ±2g
pub const LEVEL: RawSample = RawSample::new(0, 0, 16384);

/// Raw reading with gravity along +X at ±2g
pub const ON_EDGE: RawSample = RawSample::new(16384, 0, 0);

/// Config that calibrates instantly and polls fast
pub fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.sensor.refresh_rate_hz = 200.0;
    config.calibration.samples = 4;
    config.calibration.interval_ms = 0;
    config
}

/// Poll `condition` until it holds or `timeout` passes
pub fn wait_until<F: Fn() -> bool>(condition: F, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}
