//! Input management system
//!
//! Tracks which keys are currently held. There is no debouncing or repeat
//! handling: consumers sample the level state once per frame.

use std::collections::HashSet;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// Q key
    Q,
    /// S key
    S,
    /// W key
    W,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Left shift
    ShiftLeft,
    /// Right shift
    ShiftRight,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Level state of held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<KeyCode>,
}

impl KeyState {
    /// Create a key state with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Whether a key is currently held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Iterate over the held keys
    pub fn held(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.held.iter().copied()
    }

    /// Release every key (focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
