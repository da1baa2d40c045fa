use std::collections::HashMap;

use anyhow::Result;
use wgpu::util::DeviceExt;

use crate::geometry::Triangle;
use crate::gfx::{CompileLog, CompiledProgram, GeometryId, ProgramId, ProgramSource, ShaderStage};
use crate::input::FillMode;

use super::commands::DrawCmd;
use super::pipeline::{build_pipeline, compile_stage};

/// Pipelines of one program. `None` when the program failed to compile or link.
struct ProgramEntry {
    label: String,
    filled: Option<wgpu::RenderPipeline>,
    wireframe: Option<wgpu::RenderPipeline>,
}

impl ProgramEntry {
    fn pipeline(&self, mode: FillMode) -> Option<&wgpu::RenderPipeline> {
        match mode {
            FillMode::Filled => self.filled.as_ref(),
            // Without line rasterization the filled pipeline stands in.
            FillMode::Wireframe => self.wireframe.as_ref().or(self.filled.as_ref()),
        }
    }
}

/// GPU objects behind program and geometry handles.
pub(super) struct Resources {
    line_mode: bool,
    next_id: u32,
    programs: HashMap<ProgramId, ProgramEntry>,
    geometry: HashMap<GeometryId, wgpu::Buffer>,
}

impl Resources {
    /// `line_mode`: the device has `POLYGON_MODE_LINE` enabled.
    pub fn new(line_mode: bool) -> Self {
        Self {
            line_mode,
            next_id: 0,
            programs: HashMap::new(),
            geometry: HashMap::new(),
        }
    }

    pub fn line_mode(&self) -> bool {
        self.line_mode
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Compiles both stages and links them into one pipeline per fill mode.
    ///
    /// Always yields a handle; failures are in the returned log and the
    /// handle has no pipeline.
    pub fn compile(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        source: &ProgramSource,
    ) -> CompiledProgram {
        let id = ProgramId::from_raw(self.alloc_id());
        let label = source.label.to_string();
        let mut compile_log = CompileLog::default();

        let vs = compile_stage(
            device,
            &format!("{label} vertex"),
            ShaderStage::Vertex,
            &source.vertex,
            &mut compile_log,
        );
        let fs = compile_stage(
            device,
            &format!("{label} fragment"),
            ShaderStage::Fragment,
            &source.fragment,
            &mut compile_log,
        );

        let mut entry = ProgramEntry {
            label,
            filled: None,
            wireframe: None,
        };

        match (&vs, &fs) {
            (Some(vs), Some(fs)) => {
                entry.filled = build_pipeline(
                    device,
                    &format!("{} filled", entry.label),
                    format,
                    (vs, fs),
                    wgpu::PolygonMode::Fill,
                    &mut compile_log,
                );
                if self.line_mode && entry.filled.is_some() {
                    entry.wireframe = build_pipeline(
                        device,
                        &format!("{} wireframe", entry.label),
                        format,
                        (vs, fs),
                        wgpu::PolygonMode::Line,
                        &mut compile_log,
                    );
                }
            }
            _ => compile_log.push(ShaderStage::Link, "program not linked: a stage failed to compile"),
        }

        self.programs.insert(id, entry);
        CompiledProgram {
            id,
            log: compile_log,
        }
    }

    pub fn upload(&mut self, device: &wgpu::Device, triangle: &Triangle) -> Result<GeometryId> {
        anyhow::ensure!(triangle.is_finite(), "triangle has non-finite coordinates");

        let id = GeometryId::from_raw(self.alloc_id());
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trigon triangle vbo"),
            contents: triangle.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        self.geometry.insert(id, vbo);
        Ok(id)
    }

    /// Returns `false` when the handle was unknown or already released.
    pub fn release_geometry(&mut self, geometry: GeometryId) -> bool {
        match self.geometry.remove(&geometry) {
            Some(vbo) => {
                vbo.destroy();
                true
            }
            None => false,
        }
    }

    /// Returns `false` when the handle was unknown or already released.
    pub fn release_program(&mut self, program: ProgramId) -> bool {
        match self.programs.remove(&program) {
            Some(entry) => {
                log::debug!("released {program} ({})", entry.label);
                true
            }
            None => false,
        }
    }

    /// Pipeline and vertex buffer for a recorded draw.
    ///
    /// `None` when either handle is gone or the program has no pipeline.
    pub fn resolve(&self, cmd: &DrawCmd) -> Option<(&wgpu::RenderPipeline, &wgpu::Buffer)> {
        let vbo = self.geometry.get(&cmd.geometry)?;
        let pipeline = self.programs.get(&cmd.program)?.pipeline(cmd.mode)?;
        Some((pipeline, vbo))
    }
}
