//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform` translates winit events into `InputEvent`s.

pub(crate) mod platform;
mod state;
mod toggle;
mod types;

pub use state::InputState;
pub use toggle::{EdgeTrigger, FillMode, WireframeToggle};
pub use types::{InputEvent, Key, KeyState};
