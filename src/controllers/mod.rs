//! Controllers
//!
//! Everything that turns key state into motion.
//!
//! ## Module Structure
//!
//! - `action`: semantic actions and the action → key table
//! - `speed`: speed providers (fixed and runtime-tunable)
//! - `movement`: the per-frame movement resolution engine

pub mod action;
pub mod speed;
pub mod movement;

pub use action::{Action, ActionBindings};
pub use speed::{SpeedSource, FixedSpeed, TunableSpeed};
pub use movement::{MovementController, MovementSnapshot, Orientation};
