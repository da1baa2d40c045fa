use super::types::KeyState;

/// Rasterization fill mode selected by the wireframe toggle.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FillMode {
    #[default]
    Filled,
    Wireframe,
}

impl FillMode {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            FillMode::Filled => FillMode::Wireframe,
            FillMode::Wireframe => FillMode::Filled,
        }
    }
}

/// Detects released -> pressed transitions of a polled key.
///
/// The first observation has no predecessor, so a key already held on the
/// first poll counts as a press-edge.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct EdgeTrigger {
    last: Option<KeyState>,
}

impl EdgeTrigger {
    /// Records `state` and returns `true` if it is a press-edge.
    pub fn observe(&mut self, state: KeyState) -> bool {
        let edge = state.is_pressed() && self.last != Some(KeyState::Pressed);
        self.last = Some(state);
        edge
    }
}

/// Wireframe on/off state flipped once per press-edge of its key.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WireframeToggle {
    mode: FillMode,
    trigger: EdgeTrigger,
}

impl WireframeToggle {
    /// Feeds one frame's key state. Returns `true` when the mode flipped.
    pub fn update(&mut self, state: KeyState) -> bool {
        if self.trigger.observe(state) {
            self.mode = self.mode.flipped();
            return true;
        }
        false
    }

    pub fn mode(&self) -> FillMode {
        self.mode
    }
}
