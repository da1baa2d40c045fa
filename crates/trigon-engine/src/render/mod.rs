//! wgpu implementation of the graphics capability.
//!
//! Draw calls are recorded per frame and replayed into a single render pass
//! at present time. The recorded clear becomes the pass load op.

mod commands;
mod pipeline;
mod resources;
mod wgpu_graphics;

pub use wgpu_graphics::WgpuGraphics;
