//! Key Transition Tracker
//!
//! Samples every subscribed key once per frame and advances its
//! [`KeyState`]. Sampling once per frame (instead of polling the keyboard
//! wherever a key is needed) is what makes `Pressed` ("went down this
//! frame") distinguishable from `Down` ("has been held").
//!
//! Tracked keys live in a `BTreeMap`, so iteration order is the key order
//! and identical input produces identical updates.

use std::collections::BTreeMap;
use std::fmt::Debug;

use tracing::{debug, trace};

use super::key::{Key, KeyState};
use super::keyboard::KeyboardSource;

/// Input lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The key is not subscribed with the tracker.
    #[error("key {key} is not tracked")]
    NotFound {
        /// Debug rendering of the key
        key: String,
    },
}

impl InputError {
    /// Build a `NotFound` for any debuggable key.
    pub fn not_found<K: Debug>(key: K) -> Self {
        Self::NotFound {
            key: format!("{key:?}"),
        }
    }
}

/// Per-key transition state, as seen by the movement engine.
///
/// [`KeyTracker`] is the production implementation; tests substitute
/// scripted sources.
pub trait KeyStateSource<K = Key> {
    /// Begin tracking `key`. A key that is already tracked keeps its state.
    fn subscribe(&mut self, key: K);

    /// Stop tracking `key`.
    fn unsubscribe(&mut self, key: K);

    /// Whether `key` is tracked.
    fn is_subscribed(&self, key: K) -> bool;

    /// Current snapshot for `key`.
    fn key_state(&self, key: K) -> Result<KeyState, InputError>;
}

/// Tracks transition state for a set of keys.
#[derive(Clone, Debug)]
pub struct KeyTracker<I, K = Key> {
    /// Physical key source
    keyboard: I,
    /// Tracked keys and their state
    key_states: BTreeMap<K, KeyState>,
}

impl<I, K> KeyTracker<I, K>
where
    I: KeyboardSource<K>,
    K: Copy + Ord + Debug,
{
    /// Create a tracker with no subscribed keys.
    pub fn new(keyboard: I) -> Self {
        Self {
            keyboard,
            key_states: BTreeMap::new(),
        }
    }

    /// Create a tracker subscribed to `keys`.
    pub fn with_keys(keyboard: I, keys: impl IntoIterator<Item = K>) -> Self {
        let mut tracker = Self::new(keyboard);
        for key in keys {
            tracker.subscribe(key);
        }
        tracker
    }

    /// Sample every tracked key once and advance its state.
    pub fn update(&mut self, delta_seconds: f32) {
        for (key, state) in self.key_states.iter_mut() {
            let held = self.keyboard.is_key_pressed(*key);
            let edge = state.advance(held, delta_seconds);
            if edge && cfg!(feature = "debug-tracing") {
                trace!(?key, position = ?state.position, "key transition");
            }
        }
    }

    /// The physical key source.
    pub fn keyboard(&self) -> &I {
        &self.keyboard
    }

    /// Mutable access to the physical key source (feed events, advance
    /// scripts).
    pub fn keyboard_mut(&mut self) -> &mut I {
        &mut self.keyboard
    }

    /// Tracked keys in order.
    pub fn tracked_keys(&self) -> impl Iterator<Item = K> + '_ {
        self.key_states.keys().copied()
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.key_states.len()
    }

    /// True if no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.key_states.is_empty()
    }
}

impl<I, K> KeyStateSource<K> for KeyTracker<I, K>
where
    I: KeyboardSource<K>,
    K: Copy + Ord + Debug,
{
    fn subscribe(&mut self, key: K) {
        if !self.key_states.contains_key(&key) {
            debug!(?key, "subscribed key");
            self.key_states.insert(key, KeyState::new());
        }
    }

    fn unsubscribe(&mut self, key: K) {
        if self.key_states.remove(&key).is_some() {
            debug!(?key, "unsubscribed key");
        }
    }

    fn is_subscribed(&self, key: K) -> bool {
        self.key_states.contains_key(&key)
    }

    fn key_state(&self, key: K) -> Result<KeyState, InputError> {
        self.key_states
            .get(&key)
            .copied()
            .ok_or_else(|| InputError::not_found(key))
    }
}

// =============================================================================
// TESTS
// =============================================================================
