//! 2D vector helpers and 4-way direction flags
//!
//! Positions and velocities are plain `glam::Vec2` values. glam already gives us
//! value semantics (every operation returns a new vector), component-wise
//! multiply/divide and equality, so this module only adds the two things the
//! engine needs on top of it:
//!
//! - Snapping a pixel position into the tilemap grid (`Vec2Ext`)
//! - A bundle of four booleans used both for collision results and for the
//!   editor's held-direction state (`DirectionFlags`)

pub use glam::{IVec2, Vec2};

/// Extra conversions the tilemap and renderer need on top of `glam::Vec2`.
pub trait Vec2Ext {
    /// Truncates both components toward zero (`3.7 -> 3`, `-3.7 -> -3`).
    fn trunc_i32(self) -> IVec2;

    /// Divides by `cell_size` and floors both components.
    ///
    /// This is the canonical pixel -> grid cell mapping. Flooring (instead of
    /// truncating) keeps negative coordinates in the correct cell:
    /// pixel `-1.0` lives in cell `-1`, not cell `0`.
    fn floor_div(self, cell_size: f32) -> IVec2;
}

impl Vec2Ext for Vec2 {
    fn trunc_i32(self) -> IVec2 {
        IVec2::new(self.x.trunc() as i32, self.y.trunc() as i32)
    }

    fn floor_div(self, cell_size: f32) -> IVec2 {
        IVec2::new(
            (self.x / cell_size).floor() as i32,
            (self.y / cell_size).floor() as i32,
        )
    }
}

/// Four independent direction flags.
///
/// The physics step uses this as its collision result: every flag is cleared at
/// the start of an update and set while resolving each axis. The editor reuses
/// the same type to remember which scroll keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Collision results reported by the physics step.
pub type CollisionFlags = DirectionFlags;

impl DirectionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_left(&mut self) {
        self.left = !self.left;
    }

    pub fn toggle_right(&mut self) {
        self.right = !self.right;
    }

    pub fn toggle_up(&mut self) {
        self.up = !self.up;
    }

    pub fn toggle_down(&mut self) {
        self.down = !self.down;
    }

    /// True when touching a wall on either side.
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    /// `right - left` and `down - up` as a unit-step vector.
    pub fn axis(&self) -> Vec2 {
        Vec2::new(
            self.right as i32 as f32 - self.left as i32 as f32,
            self.down as i32 as f32 - self.up as i32 as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div_positive() {
        assert_eq!(Vec2::new(34.0, 10.0).floor_div(16.0), IVec2::new(2, 0));
        assert_eq!(Vec2::new(16.0, 15.9).floor_div(16.0), IVec2::new(1, 0));
    }

    #[test]
    fn test_floor_div_negative_differs_from_truncation() {
        let p = Vec2::new(-1.0, -17.0);
        assert_eq!(p.floor_div(16.0), IVec2::new(-1, -2));
        // Plain truncation would put the point one cell too far right/down
        assert_eq!((p / 16.0).trunc_i32(), IVec2::new(0, -1));
    }

    #[test]
    fn test_reset_clears_all_flags() {
        let mut flags = DirectionFlags {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        flags.reset();
        assert_eq!(flags, DirectionFlags::new());
    }

    #[test]
    fn test_axis_from_held_keys() {
        let mut flags = DirectionFlags::new();
        flags.toggle_right();
        flags.toggle_up();
        assert_eq!(flags.axis(), Vec2::new(1.0, -1.0));

        flags.toggle_left();
        assert_eq!(flags.axis(), Vec2::new(0.0, -1.0));
    }
}
