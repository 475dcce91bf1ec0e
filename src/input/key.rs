//! Keys and Key Transition States
//!
//! A tracked key is not just "held" or "not held": it remembers whether the
//! edge happened this frame. The five positions are:
//!
//! ```text
//!  current                     held      free
//!  ──────────────────────────  ────────  ────────
//!  Unknown                     Pressed   Released
//!  Pressed                     Down      Released
//!  Down                        Down      Released
//!  Released                    Pressed   Up
//!  Up                          Pressed   Up
//! ```
//!
//! `Pressed` and `Released` last exactly one frame.

use std::fmt;
use serde::{Serialize, Deserialize};

// =============================================================================
// PHYSICAL KEYS
// =============================================================================

/// Physical keyboard key code.
///
/// Serialized by name (`"W"`, `"Left"`, `"Space"`) so config files stay
/// readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Left, Right, Up, Down,
    Space, Enter, Escape, Tab, Backspace,
    LShift, RShift, LControl, RControl, LAlt, RAlt,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// KEY POSITION
// =============================================================================

/// Transition classification of a tracked key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyPosition {
    /// Not sampled yet
    #[default]
    Unknown = 0,
    /// Went down this frame
    Pressed = 1,
    /// Held for more than one frame
    Down = 2,
    /// Went up this frame
    Released = 3,
    /// Not held for more than one frame
    Up = 4,
}

impl KeyPosition {
    /// Position after sampling the physical key.
    ///
    /// Returns the new position and whether this was a press/release edge.
    #[inline]
    pub fn next(self, held: bool) -> (KeyPosition, bool) {
        use KeyPosition::*;
        match (self, held) {
            (Pressed, true) => (Down, false),
            (Unknown | Released | Up, true) => (Pressed, true),
            (Down, true) => (Down, false),
            (Released, false) => (Up, false),
            (Unknown | Pressed | Down, false) => (Released, true),
            (Up, false) => (Up, false),
        }
    }
}

/// True for `Pressed` or `Down`.
#[inline]
pub fn is_down(position: KeyPosition) -> bool {
    matches!(position, KeyPosition::Pressed | KeyPosition::Down)
}

/// True for `Released` or `Up`.
#[inline]
pub fn is_up(position: KeyPosition) -> bool {
    matches!(position, KeyPosition::Released | KeyPosition::Up)
}

// =============================================================================
// KEY STATE
// =============================================================================

/// Snapshot of one tracked key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyState {
    /// Transition classification
    pub position: KeyPosition,
    /// Seconds since the last press or release edge
    pub seconds_in_current_position: f32,
}

impl KeyState {
    /// Fresh, unobserved state.
    pub const fn new() -> Self {
        Self {
            position: KeyPosition::Unknown,
            seconds_in_current_position: 0.0,
        }
    }

    /// State with an explicit position and zero dwell.
    pub const fn at(position: KeyPosition) -> Self {
        Self {
            position,
            seconds_in_current_position: 0.0,
        }
    }

    /// Advance by one frame.
    ///
    /// Dwell resets on an edge, otherwise accumulates `delta_seconds`.
    /// Returns true if this frame was an edge.
    pub fn advance(&mut self, held: bool, delta_seconds: f32) -> bool {
        let (position, edge) = self.position.next(held);
        self.position = position;
        if edge {
            self.seconds_in_current_position = 0.0;
        } else {
            self.seconds_in_current_position += delta_seconds;
        }
        edge
    }

    /// Key is held (`Pressed` or `Down`).
    #[inline]
    pub fn is_down(&self) -> bool {
        is_down(self.position)
    }

    /// Key is not held (`Released` or `Up`).
    #[inline]
    pub fn is_up(&self) -> bool {
        is_up(self.position)
    }

    /// Key went down this frame.
    #[inline]
    pub fn just_pressed(&self) -> bool {
        self.position == KeyPosition::Pressed
    }

    /// Key went up this frame.
    #[inline]
    pub fn just_released(&self) -> bool {
        self.position == KeyPosition::Released
    }
}
