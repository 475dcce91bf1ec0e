//! Speed Providers
//!
//! The movement engine reads four magnitudes on every frame an action is
//! active: forward and backward in units/second, lateral in units/second,
//! rotation in degrees/second. Values are read live, so a provider may
//! change them between frames.

use serde::{Serialize, Deserialize};
use tracing::debug;

/// Per-frame source of movement magnitudes.
pub trait SpeedSource {
    /// Forward speed (units/second).
    fn frontal_movement(&self) -> f32;
    /// Backward speed (units/second).
    fn backward_movement(&self) -> f32;
    /// Strafe speed (units/second).
    fn lateral_movement(&self) -> f32;
    /// Rotation speed (degrees/second).
    fn rotational_movement(&self) -> f32;
}

impl<T: SpeedSource + ?Sized> SpeedSource for &T {
    fn frontal_movement(&self) -> f32 {
        (**self).frontal_movement()
    }
    fn backward_movement(&self) -> f32 {
        (**self).backward_movement()
    }
    fn lateral_movement(&self) -> f32 {
        (**self).lateral_movement()
    }
    fn rotational_movement(&self) -> f32 {
        (**self).rotational_movement()
    }
}

// =============================================================================
// FIXED SPEED
// =============================================================================

/// Constant speeds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedSpeed {
    /// Forward speed (units/second)
    pub frontal: f32,
    /// Backward speed (units/second)
    pub backward: f32,
    /// Strafe speed (units/second)
    pub lateral: f32,
    /// Rotation speed (degrees/second)
    pub rotational: f32,
}

impl FixedSpeed {
    /// Speeds used by the demo character.
    pub const DEFAULT: FixedSpeed = FixedSpeed::new(500.0, 500.0, 150.0, 250.0);

    /// Explicit speeds.
    pub const fn new(frontal: f32, backward: f32, lateral: f32, rotational: f32) -> Self {
        Self {
            frontal,
            backward,
            lateral,
            rotational,
        }
    }

    /// Same magnitude for every axis.
    pub const fn uniform(speed: f32) -> Self {
        Self::new(speed, speed, speed, speed)
    }

    /// Every component multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(
            self.frontal * factor,
            self.backward * factor,
            self.lateral * factor,
            self.rotational * factor,
        )
    }
}

impl Default for FixedSpeed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SpeedSource for FixedSpeed {
    fn frontal_movement(&self) -> f32 {
        self.frontal
    }
    fn backward_movement(&self) -> f32 {
        self.backward
    }
    fn lateral_movement(&self) -> f32 {
        self.lateral
    }
    fn rotational_movement(&self) -> f32 {
        self.rotational
    }
}

// =============================================================================
// TUNABLE SPEED
// =============================================================================

/// Base speeds plus a boost multiplier, adjustable at runtime.
///
/// Every reported speed is `base * boost`. A boost of 1.0 reports the base
/// speeds unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TunableSpeed {
    base: FixedSpeed,
    boost: f32,
}

impl TunableSpeed {
    /// Tunable speeds with no boost.
    pub fn new(base: FixedSpeed) -> Self {
        Self { base, boost: 1.0 }
    }

    /// Builder-style boost.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Base speeds (before boost).
    pub fn base(&self) -> FixedSpeed {
        self.base
    }

    /// Current boost multiplier.
    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Speeds as currently reported.
    pub fn effective(&self) -> FixedSpeed {
        self.base.scaled(self.boost)
    }

    /// Replace every base speed.
    pub fn set_base(&mut self, base: FixedSpeed) {
        self.base = base;
    }

    /// Set the boost multiplier.
    pub fn set_boost(&mut self, boost: f32) {
        debug!(from = self.boost, to = boost, "speed boost changed");
        self.boost = boost;
    }

    /// Set base forward speed.
    pub fn set_frontal(&mut self, speed: f32) {
        self.base.frontal = speed;
    }

    /// Set base backward speed.
    pub fn set_backward(&mut self, speed: f32) {
        self.base.backward = speed;
    }

    /// Set base strafe speed.
    pub fn set_lateral(&mut self, speed: f32) {
        self.base.lateral = speed;
    }

    /// Set base rotation speed.
    pub fn set_rotational(&mut self, speed: f32) {
        self.base.rotational = speed;
    }
}

impl Default for TunableSpeed {
    fn default() -> Self {
        Self::new(FixedSpeed::DEFAULT)
    }
}

impl From<FixedSpeed> for TunableSpeed {
    fn from(base: FixedSpeed) -> Self {
        Self::new(base)
    }
}

impl SpeedSource for TunableSpeed {
    fn frontal_movement(&self) -> f32 {
        self.base.frontal * self.boost
    }
    fn backward_movement(&self) -> f32 {
        self.base.backward * self.boost
    }
    fn lateral_movement(&self) -> f32 {
        self.base.lateral * self.boost
    }
    fn rotational_movement(&self) -> f32 {
        self.base.rotational * self.boost
    }
}
