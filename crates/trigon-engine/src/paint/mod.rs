//! Color model shared by scenes and the render backend.

pub mod color;

pub use color::Color;
