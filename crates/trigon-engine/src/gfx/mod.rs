//! Graphics capability seam.
//!
//! The frame loop talks to the graphics API only through [`Graphics`].
//! `render::WgpuGraphics` is the production implementation; tests drive the
//! loop against a recording implementation.

mod handle;
mod program;
pub mod shaders;

pub use handle::{GeometryId, ProgramId};
pub use program::{CompileLog, CompiledProgram, Diagnostic, ProgramSource, ShaderStage};

use anyhow::Result;

use crate::geometry::{Triangle, Viewport};
use crate::input::FillMode;
use crate::paint::Color;

/// Operations the frame loop needs from a graphics API.
///
/// Draw-related calls record state for the current frame; `present` ends the
/// frame and makes it visible.
pub trait Graphics {
    /// Compiles and links a program.
    ///
    /// Never fails: problems are reported through the returned log and the
    /// handle stays usable (draws with a broken program render nothing).
    fn compile_program(&mut self, source: &ProgramSource) -> CompiledProgram;

    /// Uploads one triangle into a new vertex buffer.
    fn upload_triangle(&mut self, triangle: &Triangle) -> Result<GeometryId>;

    /// Sets the rasterization fill mode for subsequent draws.
    fn set_fill_mode(&mut self, mode: FillMode);

    /// Sets the viewport used by subsequent frames.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears the color buffer of the current frame.
    fn clear(&mut self, color: Color);

    /// Draws `vertex_count` vertices of `geometry` as triangles with `program`.
    fn draw(&mut self, geometry: GeometryId, program: ProgramId, vertex_count: u32);

    /// Presents the current frame.
    ///
    /// Returns an error only when the surface cannot recover.
    fn present(&mut self) -> Result<()>;

    fn release_geometry(&mut self, geometry: GeometryId);

    fn release_program(&mut self, program: ProgramId);
}
