//! Keyboard Input Sources
//!
//! The tracker samples "is this key physically held" through
//! [`KeyboardSource`]. Windowing backends implement it on top of their own
//! key polling; two headless sources ship here:
//!
//! - [`HeldKeys`]: platform code feeds press/release events, the tracker
//!   reads the resulting set each frame.
//! - [`ScriptedKeyboard`]: a fixed per-frame script, for demos and replays.

use std::collections::BTreeSet;

use super::key::Key;

/// Raw "is this key held right now" primitive.
pub trait KeyboardSource<K = Key> {
    /// Whether `key` is physically held.
    fn is_key_pressed(&self, key: K) -> bool;
}

impl<K, T: KeyboardSource<K> + ?Sized> KeyboardSource<K> for &T {
    fn is_key_pressed(&self, key: K) -> bool {
        (**self).is_key_pressed(key)
    }
}

// =============================================================================
// HELD KEYS
// =============================================================================

/// Set of currently held keys, updated from platform events.
#[derive(Clone, Debug)]
pub struct HeldKeys<K = Key> {
    held: BTreeSet<K>,
}

impl<K> Default for HeldKeys<K> {
    fn default() -> Self {
        Self { held: BTreeSet::new() }
    }
}

impl<K: Ord + Copy> HeldKeys<K> {
    /// Nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event.
    pub fn press(&mut self, key: K) {
        self.held.insert(key);
    }

    /// Record a key-up event.
    pub fn release(&mut self, key: K) {
        self.held.remove(&key);
    }

    /// Release everything (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Number of held keys.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// True if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl<K: Ord + Copy> KeyboardSource<K> for HeldKeys<K> {
    fn is_key_pressed(&self, key: K) -> bool {
        self.held.contains(&key)
    }
}

// =============================================================================
// SCRIPTED KEYBOARD
// =============================================================================

/// Replays a list of frames, each naming the keys held during that frame.
///
/// Starts on the first frame; [`ScriptedKeyboard::advance`] moves to the
/// next one. Past the end, no key is held.
#[derive(Clone, Debug)]
pub struct ScriptedKeyboard<K = Key> {
    frames: Vec<BTreeSet<K>>,
    cursor: usize,
}

impl<K> Default for ScriptedKeyboard<K> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            cursor: 0,
        }
    }
}

impl<K: Ord + Copy> ScriptedKeyboard<K> {
    /// Build from per-frame held-key lists.
    pub fn from_frames<F, I>(frames: F) -> Self
    where
        F: IntoIterator<Item = I>,
        I: IntoIterator<Item = K>,
    {
        Self {
            frames: frames
                .into_iter()
                .map(|frame| frame.into_iter().collect())
                .collect(),
            cursor: 0,
        }
    }

    /// Append `count` frames holding `keys`.
    pub fn hold_for(mut self, keys: &[K], count: usize) -> Self {
        let frame: BTreeSet<K> = keys.iter().copied().collect();
        self.frames.extend(std::iter::repeat(frame).take(count));
        self
    }

    /// Move to the next frame. Returns false once the script is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.frames.len() {
            self.cursor += 1;
        }
        !self.is_finished()
    }

    /// Index of the current frame.
    pub fn frame_index(&self) -> usize {
        self.cursor
    }

    /// Total number of scripted frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True once every frame has been consumed.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl<K: Ord + Copy> KeyboardSource<K> for ScriptedKeyboard<K> {
    fn is_key_pressed(&self, key: K) -> bool {
        self.frames
            .get(self.cursor)
            .is_some_and(|frame| frame.contains(&key))
    }
}
