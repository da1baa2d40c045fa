use crate::gfx::{GeometryId, ProgramId};
use crate::input::FillMode;
use crate::paint::Color;

#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct DrawCmd {
    pub geometry: GeometryId,
    pub program: ProgramId,
    pub mode: FillMode,
    pub vertex_count: u32,
}

/// Commands recorded for the frame being built.
#[derive(Debug, Default)]
pub(super) struct FrameCommands {
    fill_mode: FillMode,
    clear: Option<Color>,
    draws: Vec<DrawCmd>,
}

impl FrameCommands {
    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.fill_mode = mode;
    }

    /// A clear discards everything drawn before it this frame.
    pub fn clear(&mut self, color: Color) {
        self.clear = Some(color);
        self.draws.clear();
    }

    /// Records a draw in the current fill mode.
    pub fn draw(&mut self, geometry: GeometryId, program: ProgramId, vertex_count: u32) {
        self.draws.push(DrawCmd {
            geometry,
            program,
            mode: self.fill_mode,
            vertex_count,
        });
    }

    pub fn load_op(&self) -> wgpu::LoadOp<wgpu::Color> {
        match self.clear {
            Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
            None => wgpu::LoadOp::Load,
        }
    }

    pub fn draws(&self) -> &[DrawCmd] {
        &self.draws
    }

    /// Drops the recorded clear and draws. The fill mode carries over.
    pub fn reset(&mut self) {
        self.clear = None;
        self.draws.clear();
    }
}
