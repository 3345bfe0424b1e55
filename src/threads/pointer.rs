//! Pointer update thread (60 Hz).
//!
//! Reads the latest angles without locking, turns them into a pixel delta
//! and moves the pointer. See [`crate::shared`] for why unsynchronized reads
//! are acceptable here.

use std::sync::Arc;
use std::time::Duration;

use crate::config::PointerConfig;
use crate::pointer::{Pointer, PointerGain, PositionActuator};
use crate::shared::{SharedOrientation, StopSignal};
use crate::types::PointerPosition;

use super::Ticker;

/// Pointer thread state and logic.
pub struct PointerThread<A> {
    pointer: Pointer<A>,
    gain: PointerGain,
    start: PointerPosition,
    period: Duration,
    shared: Arc<SharedOrientation>,
    stop: StopSignal,
}

impl<A: PositionActuator> PointerThread<A> {
    pub fn new(
        actuator: A,
        config: &PointerConfig,
        shared: Arc<SharedOrientation>,
        stop: StopSignal,
    ) -> Self {
        Self {
            pointer: Pointer::new(actuator, config.screen),
            gain: PointerGain::from_config(config),
            start: config.start_position(),
            period: config.period(),
            shared,
            stop,
        }
    }

    /// Place the pointer at its start position, then track tilt until stopped.
    pub fn run(&mut self) {
        log::info!(
            "Pointer thread started (gain {:.1} px/rad, screen {}x{})",
            self.gain.gain,
            self.pointer.bounds().width,
            self.pointer.bounds().height
        );

        match self.pointer.set(self.start) {
            Ok(pos) => log::info!("Pointer at ({}, {})", pos.x, pos.y),
            Err(e) => log::warn!("Initial pointer placement failed: {}", e),
        }

        let mut ticker = Ticker::new(self.period);
        while !self.stop.is_stopped() {
            self.tick();
            ticker.wait();
        }

        log::info!("Pointer thread exiting");
    }

    /// One update: read angles, offset, clamp, deliver.
    pub fn tick(&mut self) {
        let state = self.shared.load();
        let (dx, dy) = self.gain.delta(&state);
        if let Err(e) = self.pointer.offset(dx, dy) {
            log::warn!("Pointer update failed, skipping tick: {}", e);
        }
    }

    pub fn position(&self) -> PointerPosition {
        self.pointer.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::RecordingActuator;
    use crate::types::{OrientationState, ScreenBounds};

    fn config() -> PointerConfig {
        PointerConfig {
            screen: ScreenBounds::new(200, 100),
            start_x: 100,
            start_y: 50,
            ..PointerConfig::default()
        }
    }

    #[test]
    fn test_tick_moves_by_delta() {
        let shared = Arc::new(SharedOrientation::new());
        let actuator = RecordingActuator::new();
        let mut thread =
            PointerThread::new(actuator.clone(), &config(), Arc::clone(&shared), StopSignal::new());

        thread.pointer.set(thread.start).unwrap();
        shared.publish(OrientationState::new(1.0, 2.0, 0.0));
        thread.tick();
        thread.tick();

        assert_eq!(
            actuator.positions(),
            vec![
                PointerPosition::new(100, 50),
                PointerPosition::new(105, 54),
                PointerPosition::new(110, 58),
            ]
        );
    }

    #[test]
    fn test_tick_stays_in_bounds() {
        let shared = Arc::new(SharedOrientation::new());
        let actuator = RecordingActuator::new();
        let mut thread =
            PointerThread::new(actuator.clone(), &config(), Arc::clone(&shared), StopSignal::new());

        // Extreme tilt: +15 px/tick right, -15 px/tick up
        shared.publish(OrientationState::new(0.0, 0.0, 0.0));
        for _ in 0..50 {
            thread.tick();
        }
        assert_eq!(thread.position(), PointerPosition::new(200, 0));
        assert!(actuator
            .positions()
            .iter()
            .all(|p| ScreenBounds::new(200, 100).contains(*p)));
    }

    #[test]
    fn test_actuator_failure_is_skipped() {
        let shared = Arc::new(SharedOrientation::new());
        let actuator = RecordingActuator::new();
        let mut thread =
            PointerThread::new(actuator.clone(), &config(), Arc::clone(&shared), StopSignal::new());

        shared.publish(OrientationState::new(1.0, 2.0, 0.0));
        actuator.fail_next(1);
        thread.tick();
        // Rejected move leaves the pointer where it was
        assert_eq!(thread.position(), PointerPosition::new(0, 0));

        thread.tick();
        assert_eq!(actuator.positions(), vec![PointerPosition::new(5, 4)]);
        assert_eq!(thread.position(), PointerPosition::new(5, 4));
    }

    #[test]
    fn test_run_exits_when_stopped() {
        let shared = Arc::new(SharedOrientation::new());
        let stop = StopSignal::new();
        stop.stop();
        let actuator = RecordingActuator::new();
        let mut thread = PointerThread::new(actuator.clone(), &config(), shared, stop);

        thread.run();
        // Only the initial absolute placement
        assert_eq!(actuator.positions(), vec![PointerPosition::new(100, 50)]);
    }
}
