//! Pointer position control
//!
//! Moving the OS cursor is an external collaborator. [`PositionActuator`] is
//! the seam; [`Pointer`] owns the position, applies relative offsets and
//! clamps to the screen before anything reaches the actuator.

mod mock;

pub use mock::RecordingActuator;

use crate::config::PointerConfig;
use crate::error::Result;
use crate::types::{OrientationState, PointerPosition, ScreenBounds};

/// Something that can place a pointer at an absolute screen position
pub trait PositionActuator: Send {
    /// Move to `position`. Always called with an in-bounds position.
    fn move_to(&mut self, position: PointerPosition) -> Result<()>;
}

impl<A: PositionActuator + ?Sized> PositionActuator for Box<A> {
    fn move_to(&mut self, position: PointerPosition) -> Result<()> {
        (**self).move_to(position)
    }
}

/// Actuator that only logs where the pointer would go
#[derive(Debug, Default)]
pub struct LogActuator {
    last: Option<PointerPosition>,
}

impl LogActuator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionActuator for LogActuator {
    fn move_to(&mut self, position: PointerPosition) -> Result<()> {
        if self.last != Some(position) {
            log::debug!("Pointer -> ({}, {})", position.x, position.y);
            self.last = Some(position);
        }
        Ok(())
    }
}

/// Pointer state bound to an actuator and screen bounds
pub struct Pointer<A> {
    actuator: A,
    bounds: ScreenBounds,
    position: PointerPosition,
}

impl<A: PositionActuator> Pointer<A> {
    pub fn new(actuator: A, bounds: ScreenBounds) -> Self {
        Self {
            actuator,
            bounds,
            position: PointerPosition::default(),
        }
    }

    /// Jump to an absolute position (clamped) and deliver it
    pub fn set(&mut self, position: PointerPosition) -> Result<PointerPosition> {
        self.deliver(position)
    }

    /// Move by a pixel delta (clamped) and deliver it
    pub fn offset(&mut self, dx: i32, dy: i32) -> Result<PointerPosition> {
        let mut target = self.position;
        target.offset(dx, dy);
        self.deliver(target)
    }

    /// Clamp and hand to the actuator. The stored position only changes
    /// once the actuator accepts it.
    fn deliver(&mut self, mut target: PointerPosition) -> Result<PointerPosition> {
        target.clamp_to(self.bounds);
        self.actuator.move_to(target)?;
        self.position = target;
        Ok(target)
    }

    pub fn position(&self) -> PointerPosition {
        self.position
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }
}

/// Tilt-to-pixel mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerGain {
    /// Pixels per radian
    pub gain: f64,
    pub center_alpha: f64,
    pub center_beta: f64,
}

impl PointerGain {
    pub fn from_config(config: &PointerConfig) -> Self {
        Self {
            gain: config.gain,
            center_alpha: config.center_alpha,
            center_beta: config.center_beta,
        }
    }

    /// Pixel delta for one tick
    ///
    /// `dx = gain * (center_alpha - alpha)`, `dy = gain * (beta - center_beta)`,
    /// truncated toward zero. Out-of-range values saturate and NaN maps to 0.
    pub fn delta(&self, state: &OrientationState) -> (i32, i32) {
        let dx = self.gain * (self.center_alpha - state.alpha);
        let dy = self.gain * (state.beta - self.center_beta);
        (dx as i32, dy as i32)
    }
}
