//! Actions and Action Bindings
//!
//! Movement is driven by semantic actions, not physical keys. The binding
//! table maps each action to at most one key and keeps the key tracker's
//! subscriptions in step with the bindings.

use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::input::key::{is_down, Key};
use crate::input::tracker::{InputError, KeyStateSource};

// =============================================================================
// ACTION
// =============================================================================

/// Semantic movement command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Action {
    /// Move along the facing vector
    MoveForward = 0,
    /// Move against the facing vector
    MoveBackward = 1,
    /// Strafe along `-ortho(facing)`
    MoveLeft = 2,
    /// Strafe along `+ortho(facing)`
    MoveRight = 3,
    /// Rotate by a negative angle
    RotateLeft = 4,
    /// Rotate by a positive angle
    RotateRight = 5,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 6] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::MoveLeft,
        Action::MoveRight,
        Action::RotateLeft,
        Action::RotateRight,
    ];

    /// Config-file name of this action.
    pub fn name(self) -> &'static str {
        match self {
            Action::MoveForward => "move_forward",
            Action::MoveBackward => "move_backward",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::RotateLeft => "rotate_left",
            Action::RotateRight => "rotate_right",
        }
    }

    /// Look up an action by its config-file name.
    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Strafe actions.
    #[inline]
    pub fn is_lateral(self) -> bool {
        matches!(self, Action::MoveLeft | Action::MoveRight)
    }

    /// Rotation actions.
    #[inline]
    pub fn is_rotation(self) -> bool {
        matches!(self, Action::RotateLeft | Action::RotateRight)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// BINDINGS
// =============================================================================

/// Action → key table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionBindings<K = Key> {
    bindings: BTreeMap<Action, K>,
}

impl<K> Default for ActionBindings<K> {
    fn default() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }
}

impl<K: Copy + Ord + Debug> ActionBindings<K> {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `key`, subscribing the key if it is not tracked yet.
    ///
    /// Replaces any previous binding and returns the previous key. The
    /// previous key stays subscribed.
    pub fn map_action<S>(&mut self, source: &mut S, action: Action, key: K) -> Option<K>
    where
        S: KeyStateSource<K> + ?Sized,
    {
        if !source.is_subscribed(key) {
            source.subscribe(key);
        }
        let previous = self.bindings.insert(action, key);
        debug!(%action, ?key, ?previous, "mapped action");
        previous
    }

    /// Remove the binding for `action` and unsubscribe its key.
    ///
    /// The key stays subscribed while another action is still bound to it.
    pub fn clear_action<S>(&mut self, source: &mut S, action: Action) -> Option<K>
    where
        S: KeyStateSource<K> + ?Sized,
    {
        let key = self.bindings.remove(&action)?;
        let shared = self.bindings.values().any(|bound| *bound == key);
        if !shared {
            source.unsubscribe(key);
        }
        debug!(%action, ?key, shared, "cleared action");
        Some(key)
    }

    /// Key bound to `action`.
    #[inline]
    pub fn key_for(&self, action: Action) -> Option<K> {
        self.bindings.get(&action).copied()
    }

    /// Whether `action`'s key is held.
    ///
    /// An unbound action is inactive. A bound key that is no longer tracked
    /// is a wiring error and surfaces as [`InputError::NotFound`].
    pub fn is_action_active<S>(&self, source: &S, action: Action) -> Result<bool, InputError>
    where
        S: KeyStateSource<K> + ?Sized,
    {
        match self.key_for(action) {
            Some(key) => Ok(is_down(source.key_state(key)?.position)),
            None => Ok(false),
        }
    }

    /// Iterate bindings in action order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, K)> + '_ {
        self.bindings.iter().map(|(action, key)| (*action, *key))
    }

    /// Number of bound actions.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
