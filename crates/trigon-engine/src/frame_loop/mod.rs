//! The per-frame render/input loop.
//!
//! [`FrameLoop`] owns the graphics capability, every handle created from a
//! [`Scene`], and the [`LoopState`] shared by input processing and rendering.
//! The window runtime drives it once per redraw:
//! `poll_input` -> `render_frame` -> `present`.

mod runner;
mod scene;
mod state;

pub use runner::{program_index, FrameLoop};
pub use scene::Scene;
pub use state::{InputOutcome, LoopState};
