//! Core primitives.
//!
//! Vector math, the facing-vector model, the transform sink and ids.
//! Nothing in here knows about keys or actions.

pub mod vec2;
pub mod math;
pub mod transform;
pub mod guid;

// Re-export core types
pub use vec2::Vec2;
pub use math::{rotate_vector, snap_to_zero, ortho};
pub use transform::{Transform, Transformable};
pub use guid::{Guid, GuidSource, UuidGenerator, SequentialGuids};
