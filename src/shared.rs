//! State shared between the orientation-poll and pointer-update threads.
//!
//! # Torn reads
//!
//! [`SharedOrientation`] stores alpha, beta and gamma in three independent
//! atomics. Each angle is read and written whole, but the triple is not: a
//! reader racing the poll thread can see a new alpha next to an old beta.
//! The pointer loop tolerates this. Angles move slowly compared with its
//! 60 Hz sampling, and one mixed frame shifts the pointer by at most a pixel
//! or two. Callers that need a consistent triple must add their own
//! snapshotting on top.

use crate::types::{CalibrationOffset, OrientationState};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Atomic wrapper for f64 values.
/// Uses AtomicU64 with bit reinterpretation.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(val: f64) -> Self {
        Self(AtomicU64::new(val.to_bits()))
    }

    pub fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.0.load(order))
    }

    pub fn store(&self, val: f64, order: Ordering) {
        self.0.store(val.to_bits(), order);
    }
}

/// Latest orientation plus calibration status.
///
/// Single writer (the poll thread), any number of readers.
#[derive(Debug)]
pub struct SharedOrientation {
    alpha: AtomicF64,
    beta: AtomicF64,
    gamma: AtomicF64,

    /// Set exactly once, after the offset is stored
    calibrated: AtomicBool,

    /// Frozen after calibration
    offset: OnceLock<CalibrationOffset>,

    /// Completed poll iterations (for status reporting)
    poll_count: AtomicU64,
}

impl SharedOrientation {
    pub fn new() -> Self {
        Self {
            alpha: AtomicF64::new(0.0),
            beta: AtomicF64::new(0.0),
            gamma: AtomicF64::new(0.0),
            calibrated: AtomicBool::new(false),
            offset: OnceLock::new(),
            poll_count: AtomicU64::new(0),
        }
    }

    /// Publish a new estimate. The three stores are independent.
    pub fn publish(&self, state: OrientationState) {
        self.alpha.store(state.alpha, Ordering::Relaxed);
        self.beta.store(state.beta, Ordering::Relaxed);
        self.gamma.store(state.gamma, Ordering::Relaxed);
    }

    pub fn alpha(&self) -> f64 {
        self.alpha.load(Ordering::Relaxed)
    }

    pub fn beta(&self) -> f64 {
        self.beta.load(Ordering::Relaxed)
    }

    pub fn gamma(&self) -> f64 {
        self.gamma.load(Ordering::Relaxed)
    }

    /// Read all three angles (not atomic as a whole, see module docs)
    pub fn load(&self) -> OrientationState {
        OrientationState::new(self.alpha(), self.beta(), self.gamma())
    }

    /// Store the calibration offset and raise the `calibrated` flag.
    ///
    /// Returns false (and changes nothing) if an offset was already stored.
    pub fn mark_calibrated(&self, offset: CalibrationOffset) -> bool {
        if self.offset.set(offset).is_err() {
            log::warn!("Calibration offset already set, ignoring new value");
            return false;
        }
        self.calibrated.store(true, Ordering::Release);
        true
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated.load(Ordering::Acquire)
    }

    pub fn offset(&self) -> Option<CalibrationOffset> {
        self.offset.get().copied()
    }

    pub(crate) fn record_poll(&self) {
        self.poll_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn poll_count(&self) -> u64 {
        self.poll_count.load(Ordering::Relaxed)
    }
}

impl Default for SharedOrientation {
    fn default() -> Self {
        Self::new()
    }
}

/// Cooperative cancellation token.
///
/// Clones share one flag. Loops check it once per iteration, so a stop
/// request is honored within one period.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request every holder to stop
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
