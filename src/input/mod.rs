//! Input Module
//!
//! Turns raw "is this key held" samples into per-key transition state.
//!
//! ## Module Structure
//!
//! - `key`: physical key codes, transition positions, per-key state
//! - `keyboard`: the raw keyboard primitive and headless sources
//! - `tracker`: once-per-frame sampling and transition tracking

pub mod key;
pub mod keyboard;
pub mod tracker;

// Re-export key types
pub use key::{Key, KeyPosition, KeyState, is_down, is_up};
pub use keyboard::{KeyboardSource, HeldKeys, ScriptedKeyboard};
pub use tracker::{InputError, KeyStateSource, KeyTracker};
