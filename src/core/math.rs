//! Orientation Math
//!
//! Angle conversion and the facing-vector model.
//!
//! Facing vectors feed into displacement every frame. Trigonometric noise
//! (e.g. `cos(90°) ≈ -4.4e-8`) would otherwise leak into axis-aligned motion
//! and accumulate as visible drift, so near-zero components are snapped to
//! exactly `0.0`.

use super::vec2::Vec2;

/// Degrees in a full turn.
pub const FULL_TURN_DEGREES: f32 = 360.0;

/// Magnitude at or below which a component is snapped to zero.
pub const SNAP_EPSILON: f32 = f32::EPSILON;

/// Convert degrees to radians (computed in `f64`).
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Convert radians to degrees (computed in `f64`).
#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / std::f64::consts::PI)
}

/// Snap a value within [`SNAP_EPSILON`] of zero to exactly `0.0`.
#[inline]
pub fn snap_to_zero(value: f32) -> f32 {
    if value.abs() <= SNAP_EPSILON {
        0.0
    } else {
        value
    }
}

/// Unit vector for an absolute rotation in degrees: `(cos θ, sin θ)`.
///
/// Near-zero components are snapped, so `rotate_vector(90.0)` is exactly
/// `(0, 1)`.
#[inline]
pub fn rotate_vector(degrees: f32) -> Vec2 {
    let radians = degrees_to_radians(f64::from(degrees)) as f32;
    Vec2::new(snap_to_zero(radians.cos()), snap_to_zero(radians.sin()))
}

/// Strafe-right axis for a facing vector: `(-v.y, v.x)`.
#[inline]
pub fn ortho(direction: Vec2) -> Vec2 {
    direction.perpendicular()
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees % FULL_TURN_DEGREES;
    let wrapped = if wrapped < 0.0 { wrapped + FULL_TURN_DEGREES } else { wrapped };
    // -tiny + 360 rounds to 360 in f32
    if wrapped >= FULL_TURN_DEGREES {
        0.0
    } else {
        wrapped
    }
}

// =============================================================================
// TESTS
// =============================================================================
