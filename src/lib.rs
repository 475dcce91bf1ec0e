//! # RPG Motion
//!
//! Frame-stepped input-to-motion engine for 2D top-down characters.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        RPG MOTION                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── vec2.rs     - 2D float vector                           │
//! │  ├── math.rs     - rotate_vector, ortho, angle wrapping      │
//! │  ├── transform.rs- Transform sink (position + rotation)      │
//! │  └── guid.rs     - 16-byte ids and id sources                │
//! │                                                              │
//! │  input/          - Key sampling                              │
//! │  ├── key.rs      - Key codes and transition states           │
//! │  ├── keyboard.rs - Raw keyboard sources                      │
//! │  └── tracker.rs  - Once-per-frame transition tracker         │
//! │                                                              │
//! │  controllers/    - Motion                                    │
//! │  ├── action.rs   - Actions and action → key bindings         │
//! │  ├── speed.rs    - Speed providers                           │
//! │  └── movement.rs - Movement resolution engine                │
//! │                                                              │
//! │  schedule.rs     - Delayed one-shot actions                  │
//! │  config.rs       - JSON config (speeds, bindings)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Loop
//!
//! Each frame the caller advances the key tracker, then the controller:
//!
//! ```text
//! tracker.update(dt)      sample every tracked key once
//! controller.update(dt)   lateral → rotation → frontal
//! ```
//!
//! Everything is single-threaded and synchronous. Given the same key samples
//! and frame deltas, a session produces the same transforms.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod input;
pub mod controllers;
pub mod schedule;
pub mod config;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use crate::core::vec2::Vec2;
pub use crate::core::transform::{Transform, Transformable};
pub use crate::core::guid::{Guid, GuidSource};
pub use input::{Key, KeyPosition, KeyState, KeyStateSource, KeyTracker, InputError};
pub use controllers::{Action, MovementController, SpeedSource, FixedSpeed, TunableSpeed};
pub use schedule::{ScheduledAction, Scheduler};
pub use config::{MotionConfig, ConfigError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frame rate used by the demo session (Hz)
pub const FRAME_RATE: u32 = 60;
