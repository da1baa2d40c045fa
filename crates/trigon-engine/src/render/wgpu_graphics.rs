use anyhow::Result;
use winit::dpi::PhysicalSize;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::geometry::{Triangle, Viewport};
use crate::gfx::{CompiledProgram, GeometryId, Graphics, ProgramId, ProgramSource};
use crate::input::FillMode;
use crate::paint::Color;

use super::commands::FrameCommands;
use super::resources::Resources;

/// [`Graphics`] over a window-bound [`Gpu`].
pub struct WgpuGraphics<'w> {
    gpu: Gpu<'w>,
    resources: Resources,
    warned_no_line_mode: bool,

    viewport: Option<Viewport>,
    frame: FrameCommands,
}

impl<'w> WgpuGraphics<'w> {
    pub fn new(gpu: Gpu<'w>) -> Self {
        let line_mode = gpu.features().contains(wgpu::Features::POLYGON_MODE_LINE);
        if !line_mode {
            log::warn!("POLYGON_MODE_LINE unavailable; wireframe will render filled");
        }

        Self {
            gpu,
            resources: Resources::new(line_mode),
            warned_no_line_mode: false,
            viewport: None,
            frame: FrameCommands::default(),
        }
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    /// Reconfigures the surface for a new drawable size.
    pub fn resize_surface(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
    }

    fn record_pass(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let load = self.frame.load_op();

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trigon frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let size = self.gpu.size();
        if let Some(v) = self.viewport {
            let Some(v) = v.clamped_to(size.width, size.height) else {
                return;
            };
            rpass.set_viewport(
                v.x as f32,
                v.y as f32,
                v.width as f32,
                v.height as f32,
                0.0,
                1.0,
            );
        }

        for cmd in self.frame.draws() {
            let Some((pipeline, vbo)) = self.resources.resolve(cmd) else {
                log::trace!("draw skipped: {} with {}", cmd.geometry, cmd.program);
                continue;
            };

            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..cmd.vertex_count, 0..1);
        }
    }
}

impl Graphics for WgpuGraphics<'_> {
    fn compile_program(&mut self, source: &ProgramSource) -> CompiledProgram {
        let format = self.gpu.surface_format();
        self.resources.compile(self.gpu.device(), format, source)
    }

    fn upload_triangle(&mut self, triangle: &Triangle) -> Result<GeometryId> {
        self.resources.upload(self.gpu.device(), triangle)
    }

    fn set_fill_mode(&mut self, mode: FillMode) {
        if mode == FillMode::Wireframe && !self.resources.line_mode() && !self.warned_no_line_mode {
            log::warn!("wireframe requested but line rasterization is unsupported");
            self.warned_no_line_mode = true;
        }
        self.frame.set_fill_mode(mode);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn clear(&mut self, color: Color) {
        self.frame.clear(color);
    }

    fn draw(&mut self, geometry: GeometryId, program: ProgramId, vertex_count: u32) {
        self.frame.draw(geometry, program, vertex_count);
    }

    fn present(&mut self) -> Result<()> {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                self.frame.reset();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        anyhow::bail!("failed to acquire frame: surface error is unrecoverable")
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
                };
            }
        };

        self.record_pass(&mut frame.encoder, &frame.view);
        self.gpu.submit(frame);
        self.frame.reset();
        Ok(())
    }

    fn release_geometry(&mut self, geometry: GeometryId) {
        if !self.resources.release_geometry(geometry) {
            log::warn!("release of unknown {geometry}");
        }
    }

    fn release_program(&mut self, program: ProgramId) {
        if !self.resources.release_program(program) {
            log::warn!("release of unknown {program}");
        }
    }
}
