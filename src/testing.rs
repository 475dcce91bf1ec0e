//! Test doubles for the engine's collaborators.
//!
//! The doubles count how often they are used so tests can check which
//! lookups the engine performs, not just what it produces.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::controllers::speed::SpeedSource;
use crate::core::guid::{Guid, GuidSource};
use crate::input::key::{Key, KeyPosition, KeyState};
use crate::input::tracker::{InputError, KeyStateSource};

// =============================================================================
// KEY STATES
// =============================================================================

/// Key state source whose positions are set directly by the test.
#[derive(Debug, Default)]
pub struct ScriptedKeyStates {
    subscribed: BTreeSet<Key>,
    current: RefCell<BTreeMap<Key, KeyState>>,
    queued: RefCell<BTreeMap<Key, VecDeque<KeyState>>>,
    lookups: RefCell<BTreeMap<Key, usize>>,
    subscribes: BTreeMap<Key, usize>,
    unsubscribes: BTreeMap<Key, usize>,
}

impl ScriptedKeyStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `key` at `position` until changed.
    pub fn set(&mut self, key: Key, position: KeyPosition) {
        self.queued.get_mut().remove(&key);
        self.current.get_mut().insert(key, KeyState::at(position));
    }

    /// Report `positions` on successive lookups, then stay on the last one.
    pub fn script(&mut self, key: Key, positions: impl IntoIterator<Item = KeyPosition>) {
        let queue = positions.into_iter().map(KeyState::at).collect();
        self.queued.get_mut().insert(key, queue);
    }

    pub fn lookup_count(&self, key: Key) -> usize {
        self.lookups.borrow().get(&key).copied().unwrap_or(0)
    }

    pub fn total_lookups(&self) -> usize {
        self.lookups.borrow().values().sum()
    }

    pub fn subscribe_count(&self, key: Key) -> usize {
        self.subscribes.get(&key).copied().unwrap_or(0)
    }

    pub fn unsubscribe_count(&self, key: Key) -> usize {
        self.unsubscribes.get(&key).copied().unwrap_or(0)
    }
}

impl KeyStateSource<Key> for ScriptedKeyStates {
    fn subscribe(&mut self, key: Key) {
        *self.subscribes.entry(key).or_default() += 1;
        self.subscribed.insert(key);
    }

    fn unsubscribe(&mut self, key: Key) {
        *self.unsubscribes.entry(key).or_default() += 1;
        self.subscribed.remove(&key);
    }

    fn is_subscribed(&self, key: Key) -> bool {
        self.subscribed.contains(&key)
    }

    fn key_state(&self, key: Key) -> Result<KeyState, InputError> {
        *self.lookups.borrow_mut().entry(key).or_default() += 1;
        if !self.subscribed.contains(&key) {
            return Err(InputError::not_found(key));
        }
        if let Some(next) = self.queued.borrow_mut().get_mut(&key).and_then(VecDeque::pop_front) {
            self.current.borrow_mut().insert(key, next);
        }
        Ok(self.current.borrow().get(&key).copied().unwrap_or_default())
    }
}

// =============================================================================
// SPEEDS
// =============================================================================

/// One of the four speed accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Frontal,
    Backward,
    Lateral,
    Rotational,
}

#[derive(Debug, Default)]
struct Channel {
    queued: RefCell<VecDeque<f32>>,
    last: Cell<f32>,
    reads: Cell<usize>,
}

impl Channel {
    fn read(&self) -> f32 {
        self.reads.set(self.reads.get() + 1);
        if let Some(next) = self.queued.borrow_mut().pop_front() {
            self.last.set(next);
        }
        self.last.get()
    }
}

/// Speed source that replays scripted values and counts reads.
#[derive(Debug, Default)]
pub struct ScriptedSpeed {
    channels: [Channel; 4],
}

impl ScriptedSpeed {
    /// Every axis reports `speed`.
    pub fn uniform(speed: f32) -> Self {
        let scripted = Self::default();
        for channel in &scripted.channels {
            channel.last.set(speed);
        }
        scripted
    }

    /// Report `values` on successive reads of `axis`, then stay on the last.
    pub fn script(self, axis: Axis, values: &[f32]) -> Self {
        self.channel(axis).queued.borrow_mut().extend(values.iter().copied());
        self
    }

    pub fn reads(&self, axis: Axis) -> usize {
        self.channel(axis).reads.get()
    }

    pub fn total_reads(&self) -> usize {
        self.channels.iter().map(|channel| channel.reads.get()).sum()
    }

    fn channel(&self, axis: Axis) -> &Channel {
        &self.channels[axis as usize]
    }
}

impl SpeedSource for ScriptedSpeed {
    fn frontal_movement(&self) -> f32 {
        self.channel(Axis::Frontal).read()
    }
    fn backward_movement(&self) -> f32 {
        self.channel(Axis::Backward).read()
    }
    fn lateral_movement(&self) -> f32 {
        self.channel(Axis::Lateral).read()
    }
    fn rotational_movement(&self) -> f32 {
        self.channel(Axis::Rotational).read()
    }
}

// =============================================================================
// GUIDS
// =============================================================================

/// Hands out a fixed list of ids, then the nil id, counting calls.
#[derive(Debug, Default)]
pub struct ScriptedGuids {
    queued: VecDeque<Guid>,
    generated: usize,
}

impl ScriptedGuids {
    pub fn new(guids: impl IntoIterator<Item = Guid>) -> Self {
        Self {
            queued: guids.into_iter().collect(),
            generated: 0,
        }
    }

    pub fn generated(&self) -> usize {
        self.generated
    }
}

impl GuidSource for ScriptedGuids {
    fn generate(&mut self) -> Guid {
        self.generated += 1;
        self.queued.pop_front().unwrap_or_default()
    }
}
