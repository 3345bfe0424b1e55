//! End-to-end runs against the simulated MPU6050

use crate::harness::{fast_config, wait_until};
use approx::assert_abs_diff_eq;
use kona_pointer::devices::mpu6050::AccelRange;
use kona_pointer::devices::sim::{SimulatedMpu6050, SimulationConfig};
use kona_pointer::{AppConfig, CalibrationOffset, Error, TiltSensor};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn sim_config() -> AppConfig {
    let mut config = fast_config();
    config.simulation = SimulationConfig {
        bias: [120, -80, 200],
        noise_stddev: 0.0,
        seed: 3,
        ..SimulationConfig::default()
    };
    config
}

fn start(config: &AppConfig) -> kona_pointer::Result<TiltSensor> {
    let bus = SimulatedMpu6050::new(&config.simulation, config.sensor.address);
    TiltSensor::start(bus, config)
}

#[test]
fn test_calibration_removes_mounting_bias() {
    let config = sim_config();
    let sensor = start(&config).unwrap();

    assert!(sensor.wait_calibrated());
    assert_eq!(sensor.offset(), Some(CalibrationOffset::new(-120, 80, -200)));

    assert!(wait_until(|| sensor.poll_count() > 0, TIMEOUT));
    assert_abs_diff_eq!(sensor.gamma(), 0.0, epsilon = 1e-9);
}

#[test]
fn test_range_change_scales_readings() {
    let mut config = sim_config();
    config.sensor.accel_range = AccelRange::G4;
    config.simulation.bias = [0, 0, 0];

    let sensor = start(&config).unwrap();
    assert!(sensor.wait_calibrated());
    // Simulator output follows ACCEL_CONFIG, so nothing to correct
    assert_eq!(sensor.offset(), Some(CalibrationOffset::new(0, 0, 0)));
}

#[test]
fn test_noisy_tilt_is_tracked() {
    let mut config = sim_config();
    config.simulation.noise_stddev = 20.0;

    let sensor = start(&config).unwrap();
    assert!(sensor.wait_calibrated());
    assert!(wait_until(|| sensor.poll_count() >= 5, TIMEOUT));

    // Level within noise: a few degrees at most
    assert!(sensor.z_rotation() <= 3, "z={}", sensor.z_rotation());
    let alpha = sensor.alpha().to_degrees();
    assert!((alpha - 90.0).abs() < 3.0, "alpha={}", alpha);
}

#[test]
fn test_stuck_register_fails_start() {
    let mut config = sim_config();
    config.simulation.stuck_register = Some(0x1A);

    match start(&config) {
        Err(Error::Configuration {
            register, actual, ..
        }) => {
            assert_eq!(register, 0x1A);
            assert_eq!(actual, 0x00);
        }
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("bring-up should have failed"),
    }
}

#[test]
fn test_magnitude_check_rejects_bad_calibration() {
    let mut config = sim_config();
    // Close to 1g on X and Y as well as Z
    config.simulation.bias = [16000, 16000, 0];

    let sensor = start(&config).unwrap();
    assert!(!sensor.wait_calibrated());
    assert!(matches!(
        sensor.join(),
        Err(Error::CalibrationOutOfRange { .. })
    ));
}
