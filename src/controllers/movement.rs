//! Movement Resolution
//!
//! Turns active actions into displacement and rotation of an attached
//! transform, once per frame.
//!
//! ## Frame Order
//!
//! ```text
//! 1. lateral    MoveRight / MoveLeft    facing at frame start
//! 2. rotation   RotateRight / RotateLeft
//! 3. frontal    MoveForward / MoveBackward, facing after rotation,
//!               skipped entirely if a lateral action fired
//! ```
//!
//! Same-class actions sum: holding both strafe keys applies both
//! displacements. Speeds are read from the [`SpeedSource`] once per active
//! action per frame and never cached.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::math::{ortho, rotate_vector};
use crate::core::transform::Transformable;
use crate::core::vec2::Vec2;
use crate::input::key::Key;
use crate::input::tracker::{InputError, KeyStateSource};

use super::action::{Action, ActionBindings};
use super::speed::SpeedSource;

// =============================================================================
// ORIENTATION
// =============================================================================

/// Facing of the attached transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Orientation {
    /// Unit facing vector
    pub direction: Vec2,
    /// Absolute rotation the direction was derived from (degrees)
    pub rotation: f32,
}

impl Orientation {
    /// Facing +x at rotation 0.
    pub const DEFAULT: Orientation = Orientation {
        direction: Vec2::RIGHT,
        rotation: 0.0,
    };

    /// Orientation for an absolute rotation.
    pub fn from_rotation(degrees: f32) -> Self {
        Self {
            direction: rotate_vector(degrees),
            rotation: degrees,
        }
    }

    /// Right-strafe direction, `ortho(direction)`.
    #[inline]
    pub fn right(&self) -> Vec2 {
        ortho(self.direction)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read-only view of a controller, for debug overlays and logs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovementSnapshot {
    /// Whether a transform is attached
    pub attached: bool,
    /// Current facing
    pub orientation: Orientation,
    /// Bound keys by action
    pub bindings: BTreeMap<Action, String>,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Drives a borrowed transform from action state.
///
/// `I` provides key state, `S` provides speeds, `T` is the transform sink.
/// The transform is borrowed for `'t` while attached; [`detach`] hands the
/// borrow back.
///
/// [`detach`]: MovementController::detach
#[derive(Debug)]
pub struct MovementController<'t, I, S, T, K = Key> {
    input: I,
    speed: S,
    bindings: ActionBindings<K>,
    orientation: Orientation,
    transform: Option<&'t mut T>,
}

impl<'t, I, S, T, K> MovementController<'t, I, S, T, K>
where
    I: KeyStateSource<K>,
    S: SpeedSource,
    T: Transformable,
    K: Copy + Ord + Debug,
{
    /// Detached controller with no bindings.
    pub fn new(input: I, speed: S) -> Self {
        Self {
            input,
            speed,
            bindings: ActionBindings::new(),
            orientation: Orientation::DEFAULT,
            transform: None,
        }
    }

    /// Attach `transform` and reset the facing to `(1, 0)` at rotation 0.
    ///
    /// Returns the previously attached transform, if any.
    pub fn attach(&mut self, transform: &'t mut T) -> Option<&'t mut T> {
        self.orientation = Orientation::DEFAULT;
        let previous = self.transform.replace(transform);
        debug!(replaced = previous.is_some(), "transform attached");
        previous
    }

    /// Release the attached transform. Later updates do nothing.
    pub fn detach(&mut self) -> Option<&'t mut T> {
        let previous = self.transform.take();
        if previous.is_some() {
            debug!("transform detached");
        }
        previous
    }

    /// Whether a transform is attached.
    pub fn is_attached(&self) -> bool {
        self.transform.is_some()
    }

    /// The attached transform.
    pub fn transform(&self) -> Option<&T> {
        self.transform.as_deref()
    }

    /// The attached transform, mutably.
    pub fn transform_mut(&mut self) -> Option<&mut T> {
        self.transform.as_deref_mut()
    }

    /// Bind `action` to `key`. See [`ActionBindings::map_action`].
    pub fn map_action(&mut self, action: Action, key: K) -> Option<K> {
        self.bindings.map_action(&mut self.input, action, key)
    }

    /// Unbind `action`. See [`ActionBindings::clear_action`].
    pub fn clear_action(&mut self, action: Action) -> Option<K> {
        self.bindings.clear_action(&mut self.input, action)
    }

    /// Whether `action`'s key is held. Unbound actions are inactive.
    pub fn is_action_active(&self, action: Action) -> Result<bool, InputError> {
        self.bindings.is_action_active(&self.input, action)
    }

    /// Current bindings.
    pub fn bindings(&self) -> &ActionBindings<K> {
        &self.bindings
    }

    /// Key state source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Key state source, mutably (advance the tracker each frame).
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Speed source.
    pub fn speed(&self) -> &S {
        &self.speed
    }

    /// Speed source, mutably.
    pub fn speed_mut(&mut self) -> &mut S {
        &mut self.speed
    }

    /// Current facing.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Capture the controller's observable state.
    pub fn snapshot(&self) -> MovementSnapshot {
        MovementSnapshot {
            attached: self.is_attached(),
            orientation: self.orientation,
            bindings: self
                .bindings
                .iter()
                .map(|(action, key)| (action, format!("{key:?}")))
                .collect(),
        }
    }

    /// Resolve one frame of movement.
    ///
    /// Does nothing while detached. Fails only if a bound key is no longer
    /// tracked by the input source; actions resolved before the failing
    /// lookup keep their effect.
    pub fn update(&mut self, delta_seconds: f32) -> Result<(), InputError> {
        let Some(transform) = self.transform.as_deref_mut() else {
            return Ok(());
        };
        let bindings = &self.bindings;
        let input = &self.input;
        let speed = &self.speed;
        let active = |action| bindings.is_action_active(input, action);

        // Lateral
        let right = self.orientation.right();
        let mut lateral_performed = false;
        if active(Action::MoveRight)? {
            transform.move_by(right * (speed.lateral_movement() * delta_seconds));
            lateral_performed = true;
        }
        if active(Action::MoveLeft)? {
            transform.move_by(-right * (speed.lateral_movement() * delta_seconds));
            lateral_performed = true;
        }

        // Rotation
        if active(Action::RotateRight)? {
            transform.rotate(speed.rotational_movement() * delta_seconds);
            self.orientation = Orientation::from_rotation(transform.rotation());
        }
        if active(Action::RotateLeft)? {
            transform.rotate(-speed.rotational_movement() * delta_seconds);
            self.orientation = Orientation::from_rotation(transform.rotation());
        }

        // Frontal
        if !lateral_performed {
            let direction = self.orientation.direction;
            if active(Action::MoveForward)? {
                transform.move_by(direction * (speed.frontal_movement() * delta_seconds));
            }
            if active(Action::MoveBackward)? {
                transform.move_by(-direction * (speed.backward_movement() * delta_seconds));
            }
        }

        if cfg!(feature = "debug-tracing") {
            trace!(
                lateral_performed,
                rotation = self.orientation.rotation,
                direction = %self.orientation.direction,
                "movement resolved"
            );
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
