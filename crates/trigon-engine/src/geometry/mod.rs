//! Geometry types shared by the frame loop and the render backend.
//!
//! Canonical space:
//! - Vertices are normalized device coordinates (x, y in [-1, 1], +Y up)
//! - Viewports are physical pixels measured from the framebuffer origin

mod vertex;
mod viewport;

pub use vertex::{Triangle, Vertex};
pub use viewport::Viewport;
