//! Trigon engine crate.
//!
//! Window runtime, wgpu backend, and the frame loop that draws a static set
//! of triangles with an edge-triggered wireframe toggle.

pub mod device;
pub mod frame_loop;
pub mod geometry;
pub mod gfx;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod window;
