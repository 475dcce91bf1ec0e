//! Transform Sink
//!
//! The movement engine mutates a caller-owned transform through the
//! [`Transformable`] trait. [`Transform`] is the bundled implementation:
//! a position plus a rotation that always wraps into `[0, 360)`.

use serde::{Serialize, Deserialize};

use super::math::wrap_degrees;
use super::vec2::Vec2;

/// Something with a position and a rotation that the engine can drive.
///
/// Implementations must keep `rotation()` in `[0, 360)`; the engine derives
/// its facing vector from that absolute value.
pub trait Transformable {
    /// Translate by a displacement.
    fn move_by(&mut self, offset: Vec2);

    /// Rotate by a relative angle in degrees (positive = counter-clockwise
    /// in a y-up frame).
    fn rotate(&mut self, degrees: f32);

    /// Absolute rotation in degrees, in `[0, 360)`.
    fn rotation(&self) -> f32;
}

/// Position + rotation of a controlled entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    position: Vec2,
    rotation: f32,
}

impl Transform {
    /// Create a transform at the origin facing 0°.
    pub const fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Create a transform at a position.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set the absolute position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Set the absolute rotation (wrapped into `[0, 360)`).
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = wrap_degrees(degrees);
    }
}

impl Transformable for Transform {
    #[inline]
    fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
    }

    #[inline]
    fn rotate(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }

    #[inline]
    fn rotation(&self) -> f32 {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_move() {
        let mut t = Transform::new();
        t.move_by(Vec2::new(1.0, 2.0));
        t.move_by(Vec2::new(-0.5, 1.0));
        assert_eq!(t.position(), Vec2::new(0.5, 3.0));
    }

    #[test]
    fn test_transform_rotation_wraps_downward() {
        let mut t = Transform::new();
        t.rotate(-1.0);
        assert_eq!(t.rotation(), 359.0);
        t.rotate(-2.0);
        assert_eq!(t.rotation(), 357.0);
    }

    #[test]
    fn test_transform_rotation_wraps_upward() {
        let mut t = Transform::new();
        t.rotate(350.0);
        t.rotate(20.0);
        assert_eq!(t.rotation(), 10.0);
    }

    #[test]
    fn test_set_rotation_wraps() {
        let mut t = Transform::at(Vec2::new(4.0, 4.0));
        t.set_rotation(-90.0);
        assert_eq!(t.rotation(), 270.0);
        assert_eq!(t.position(), Vec2::new(4.0, 4.0));
    }
}
