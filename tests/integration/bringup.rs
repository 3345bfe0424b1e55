//! Register bring-up through the public API

use crate::harness::fast_config;
use kona_pointer::devices::mpu6050::{self, AccelRange};
use kona_pointer::{Error, MockBus, TiltSensor};

#[test]
fn test_bringup_writes_exact_table() {
    let mut bus = MockBus::new();
    mpu6050::initialize(&mut bus, AccelRange::G2).unwrap();

    assert_eq!(
        bus.get_written(),
        vec![
            (0x6B, 0x00),
            (0x19, 0x00),
            (0x1A, 0x01),
            (0x1B, 0x18),
            (0x1C, 0x00),
            (0x38, 0x00),
            (0x6C, 0x00),
        ]
    );
}

#[test]
fn test_mismatch_stops_sequence_and_sensor() {
    let bus = MockBus::new();
    bus.override_readback(0x1C, 0x08);

    let err = TiltSensor::start(bus.clone(), &fast_config()).err();
    match err {
        Some(Error::Configuration {
            register,
            expected,
            actual,
        }) => {
            assert_eq!(register, 0x1C);
            assert_eq!(expected, 0x00);
            assert_eq!(actual, 0x08);
        }
        other => panic!("expected configuration error, got {:?}", other),
    }

    // Nothing after the failing register, and no sampling
    let written = bus.get_written();
    assert_eq!(written.len(), 5);
    assert_eq!(written.last(), Some(&(0x1C, 0x00)));
    assert_eq!(bus.sample_reads(), 0);
}

#[test]
fn test_range_selects_accel_config() {
    let mut config = fast_config();
    config.sensor.accel_range = AccelRange::G16;

    let bus = MockBus::new();
    bus.push_sample(kona_pointer::RawSample::new(0, 0, 2048));
    let sensor = TiltSensor::start(bus.clone(), &config).unwrap();

    assert_eq!(bus.peek(0x1C), 0x18);
    assert!(sensor.wait_calibrated());
    assert_eq!(
        sensor.offset(),
        Some(kona_pointer::CalibrationOffset::new(0, 0, 0))
    );
}
