use crate::input::{FillMode, KeyState, WireframeToggle};

/// State that persists across frames and is read by both input processing
/// and rendering.
#[derive(Debug, Clone, Default)]
pub struct LoopState {
    wireframe: WireframeToggle,
    close_requested: bool,
}

/// What one `poll_input` call changed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct InputOutcome {
    /// Close was requested on this poll (reported once per loop).
    pub close_requested: bool,
    /// Fill mode flipped on this poll.
    pub wireframe_toggled: bool,
}

impl LoopState {
    pub fn fill_mode(&self) -> FillMode {
        self.wireframe.mode()
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Marks the loop as closing. Returns `true` only the first time.
    pub fn request_close(&mut self) -> bool {
        !std::mem::replace(&mut self.close_requested, true)
    }

    /// Feeds the wireframe key state for this frame.
    pub fn observe_wireframe_key(&mut self, state: KeyState) -> bool {
        self.wireframe.update(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_is_requested_once() {
        let mut s = LoopState::default();
        assert!(s.request_close());
        assert!(!s.request_close());
        assert!(s.close_requested());
    }

    #[test]
    fn initial_fill_mode_is_filled() {
        assert_eq!(LoopState::default().fill_mode(), FillMode::Filled);
    }
}
