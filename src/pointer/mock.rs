//! Recording actuator for testing

use super::PositionActuator;
use crate::error::{Error, Result};
use crate::types::PointerPosition;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Actuator that records every delivered position
///
/// Clones share the record, so a test can keep a handle after moving the
/// actuator into the pointer thread.
#[derive(Clone, Default)]
pub struct RecordingActuator {
    inner: Arc<Mutex<RecordingInner>>,
}

#[derive(Default)]
struct RecordingInner {
    positions: Vec<PointerPosition>,
    pending_failures: usize,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RecordingInner> {
        self.inner.lock()
    }

    /// All delivered positions, in order
    pub fn positions(&self) -> Vec<PointerPosition> {
        self.lock().positions.clone()
    }

    pub fn last(&self) -> Option<PointerPosition> {
        self.lock().positions.last().copied()
    }

    pub fn len(&self) -> usize {
        self.lock().positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject the next `count` moves
    pub fn fail_next(&self, count: usize) {
        self.lock().pending_failures = count;
    }
}

impl PositionActuator for RecordingActuator {
    fn move_to(&mut self, position: PointerPosition) -> Result<()> {
        let mut inner = self.lock();
        if inner.pending_failures > 0 {
            inner.pending_failures -= 1;
            return Err(Error::Other("injected actuator failure".to_string()));
        }
        inner.positions.push(position);
        Ok(())
    }
}
