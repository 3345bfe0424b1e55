//! Pointer position types

use serde::{Deserialize, Serialize};

/// Screen size in pixels; the pointer may sit on either edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScreenBounds {
    pub width: i32,
    pub height: i32,
}

impl ScreenBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether `pos` lies inside `[0, width] x [0, height]`
    pub fn contains(&self, pos: PointerPosition) -> bool {
        (0..=self.width).contains(&pos.x) && (0..=self.height).contains(&pos.y)
    }
}

/// Absolute pointer position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move by a pixel delta, saturating at the i32 limits
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Clamp into `[0, width] x [0, height]`
    ///
    /// Total and idempotent. A negative width or height collapses that axis
    /// to 0.
    pub fn clamp_to(&mut self, bounds: ScreenBounds) {
        self.x = self.x.min(bounds.width).max(0);
        self.y = self.y.min(bounds.height).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_edges_inclusive() {
        let bounds = ScreenBounds::new(1920, 1080);
        let mut pos = PointerPosition::new(5000, -20);
        pos.clamp_to(bounds);
        assert_eq!(pos, PointerPosition::new(1920, 0));
        assert!(bounds.contains(pos));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let bounds = ScreenBounds::new(800, 600);
        for (x, y) in [(-1, -1), (0, 0), (400, 300), (801, 601), (i32::MAX, i32::MIN)] {
            let mut once = PointerPosition::new(x, y);
            once.clamp_to(bounds);
            let mut twice = once;
            twice.clamp_to(bounds);
            assert_eq!(once, twice);
            assert!(bounds.contains(once));
        }
    }

    #[test]
    fn test_offset_saturates() {
        let mut pos = PointerPosition::new(i32::MAX - 1, i32::MIN + 1);
        pos.offset(10, -10);
        assert_eq!(pos, PointerPosition::new(i32::MAX, i32::MIN));
    }
}
