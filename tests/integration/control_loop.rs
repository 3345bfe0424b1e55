//! Calibration, polling and pointer threads working together

use crate::harness::{fast_config, wait_until, LEVEL, ON_EDGE};
use approx::assert_relative_eq;
use kona_pointer::threads::spawn_pointer_thread;
use kona_pointer::{
    CalibrationOffset, MockBus, PointerPosition, RawSample, RecordingActuator, ScreenBounds,
    TiltSensor,
};
use std::f64::consts::FRAC_PI_2;
use std::thread;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_calibration_then_estimation() {
    let bus = MockBus::new();
    // Mounting bias of (+40, -12, +100), then one tilted reading
    bus.push_samples(RawSample::new(40, -12, 16484), 4);
    bus.push_sample(RawSample::new(16424, -12, 100));

    let sensor = TiltSensor::start(bus, &fast_config()).unwrap();
    assert!(sensor.wait_calibrated());
    assert_eq!(sensor.offset(), Some(CalibrationOffset::new(-40, 12, -100)));

    assert!(wait_until(|| sensor.poll_count() > 0, TIMEOUT));
    let state = sensor.orientation();
    assert_relative_eq!(state.alpha, 0.0);
    assert_relative_eq!(state.beta, FRAC_PI_2);
    assert_relative_eq!(state.gamma, FRAC_PI_2);
}

#[test]
fn test_kill_allows_at_most_one_more_poll() {
    let bus = MockBus::new();
    bus.push_sample(LEVEL);

    let sensor = TiltSensor::start(bus.clone(), &fast_config()).unwrap();
    assert!(sensor.wait_calibrated());
    assert!(wait_until(|| sensor.poll_count() >= 3, TIMEOUT));

    sensor.kill();
    let at_kill = sensor.poll_count();
    let shared = sensor.shared();
    sensor.join().unwrap();

    assert!(shared.poll_count() <= at_kill + 1);

    let reads = bus.sample_reads();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(bus.sample_reads(), reads);
}

#[test]
fn test_poll_errors_are_skipped() {
    let bus = MockBus::new();
    bus.push_sample(LEVEL);

    let sensor = TiltSensor::start(bus.clone(), &fast_config()).unwrap();
    assert!(sensor.wait_calibrated());

    bus.fail_next_reads(3);
    assert!(wait_until(|| sensor.poll_count() >= 10, TIMEOUT));
    assert!(sensor.is_running());
    assert_eq!(sensor.z_rotation(), 0);
}

#[test]
fn test_pointer_moves_after_calibration_and_stays_in_bounds() {
    let mut config = fast_config();
    config.pointer.screen = ScreenBounds::new(120, 80);
    config.pointer.start_x = 60;
    config.pointer.start_y = 40;

    let bus = MockBus::new();
    bus.push_samples(LEVEL, 4);
    bus.push_sample(ON_EDGE);

    let sensor = TiltSensor::start(bus, &config).unwrap();
    assert!(sensor.wait_calibrated());
    assert!(wait_until(|| sensor.poll_count() > 0, TIMEOUT));

    let actuator = RecordingActuator::new();
    let pointer = spawn_pointer_thread(
        actuator.clone(),
        &config.pointer,
        sensor.shared(),
        sensor.stop_signal(),
    )
    .unwrap();

    // 15 px/tick to the right at 60 Hz reaches the edge in 4 ticks
    let edge = PointerPosition::new(120, 40);
    assert!(wait_until(|| actuator.last() == Some(edge), TIMEOUT));

    sensor.kill();
    pointer.join().unwrap();

    let positions = actuator.positions();
    assert_eq!(positions[0], PointerPosition::new(60, 40));
    assert!(positions.iter().all(|p| config.pointer.screen.contains(*p)));
    assert!(positions.windows(2).all(|w| w[1].x >= w[0].x && w[1].y == 40));
}

#[test]
fn test_level_device_holds_pointer_still() {
    let bus = MockBus::new();
    bus.push_sample(LEVEL);

    let config = fast_config();
    let sensor = TiltSensor::start(bus, &config).unwrap();
    assert!(sensor.wait_calibrated());
    assert!(wait_until(|| sensor.poll_count() > 0, TIMEOUT));

    let actuator = RecordingActuator::new();
    let pointer = spawn_pointer_thread(
        actuator.clone(),
        &config.pointer,
        sensor.shared(),
        sensor.stop_signal(),
    )
    .unwrap();

    assert!(wait_until(|| actuator.len() >= 5, TIMEOUT));
    sensor.kill();
    pointer.join().unwrap();

    let start = config.pointer.start_position();
    assert!(actuator.positions().iter().all(|p| *p == start));
}
