use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for a single window.
///
/// The frame loop polls this once per frame, the same way a windowing
/// library's `get_key` query would be used.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Keys released while unfocused never reach us.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn key_state(&self, key: Key) -> KeyState {
        if self.key_down(key) {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }
}
