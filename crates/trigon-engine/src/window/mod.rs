//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and drives a `FrameLoop` on them.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
