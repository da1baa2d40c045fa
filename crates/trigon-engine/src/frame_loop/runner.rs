use anyhow::{Context, Result};

use crate::geometry::{Triangle, Viewport};
use crate::gfx::{GeometryId, Graphics, ProgramId};
use crate::input::{FillMode, InputState, Key};
use crate::paint::Color;

use super::scene::Scene;
use super::state::{InputOutcome, LoopState};

/// Index of the program used by triangle `triangle`.
///
/// Cycles through the programs when there are more triangles than programs.
/// Returns `None` when there are no programs.
#[inline]
pub fn program_index(triangle: usize, program_count: usize) -> Option<usize> {
    triangle.checked_rem(program_count)
}

/// Drives the render/input cycle of one window.
///
/// Handles are released by [`FrameLoop::shutdown`], or on drop if shutdown
/// was never called.
pub struct FrameLoop<G: Graphics> {
    graphics: G,
    clear_color: Color,
    close_key: Key,
    wireframe_key: Option<Key>,

    programs: Vec<ProgramId>,
    geometry: Vec<GeometryId>,
    failed_programs: Vec<ProgramId>,

    state: LoopState,
    viewport: Option<Viewport>,
    frames: u64,
}

impl<G: Graphics> FrameLoop<G> {
    /// Compiles every program and uploads every triangle of `scene`.
    ///
    /// Compile and link failures are logged and the loop proceeds with the
    /// affected program. Upload failures are fatal; handles created before
    /// the failure are released.
    pub fn initialize(scene: &Scene, graphics: G) -> Result<Self> {
        anyhow::ensure!(
            scene.triangles.is_empty() || !scene.programs.is_empty(),
            "scene has {} triangle(s) but no shader programs",
            scene.triangles.len()
        );

        let mut this = Self {
            graphics,
            clear_color: scene.clear_color,
            close_key: scene.close_key,
            wireframe_key: scene.wireframe_key,
            programs: Vec::with_capacity(scene.programs.len()),
            geometry: Vec::with_capacity(scene.triangles.len()),
            failed_programs: Vec::new(),
            state: LoopState::default(),
            viewport: None,
            frames: 0,
        };

        for source in &scene.programs {
            let compiled = this.graphics.compile_program(source);
            for d in &compiled.log.diagnostics {
                log::error!(
                    "shader program '{}': {} stage failed\n{}",
                    source.label,
                    d.stage,
                    d.message
                );
            }
            if !compiled.log.is_clean() {
                this.failed_programs.push(compiled.id);
            }
            this.programs.push(compiled.id);
        }

        for (i, triangle) in scene.triangles.iter().enumerate() {
            let id = this
                .graphics
                .upload_triangle(triangle)
                .with_context(|| format!("failed to upload triangle {i}"))?;
            this.geometry.push(id);
        }

        log::info!(
            "frame loop initialized: {} program(s), {} triangle(s)",
            this.programs.len(),
            this.geometry.len()
        );

        Ok(this)
    }

    /// Reads the current key state and updates the loop state.
    ///
    /// The close key wins: while it is held the wireframe key is not read.
    pub fn poll_input(&mut self, input: &InputState) -> InputOutcome {
        let mut outcome = InputOutcome::default();

        if input.key_down(self.close_key) {
            if self.state.request_close() {
                log::info!("close requested");
                outcome.close_requested = true;
            }
            return outcome;
        }

        if let Some(key) = self.wireframe_key {
            if self.state.observe_wireframe_key(input.key_state(key)) {
                log::debug!("fill mode -> {:?}", self.state.fill_mode());
                outcome.wireframe_toggled = true;
            }
        }

        outcome
    }

    /// Records one frame: fill mode, clear, then one draw per triangle.
    pub fn render_frame(&mut self) {
        self.graphics.set_fill_mode(self.state.fill_mode());
        self.graphics.clear(self.clear_color);

        for (i, geometry) in self.geometry.iter().enumerate() {
            let Some(p) = program_index(i, self.programs.len()) else {
                break;
            };
            self.graphics
                .draw(*geometry, self.programs[p], Triangle::VERTEX_COUNT);
        }
    }

    /// Presents the recorded frame.
    pub fn present(&mut self) -> Result<()> {
        self.graphics.present()?;
        self.frames += 1;
        Ok(())
    }

    /// Framebuffer resize notification: the viewport follows the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::full(width, height);
        log::debug!("viewport -> {width}x{height}");
        self.graphics.set_viewport(viewport);
        self.viewport = Some(viewport);
    }

    /// Releases every program and geometry handle.
    ///
    /// Returns how many handles were released; a second call releases none.
    pub fn shutdown(&mut self) -> usize {
        let geometry = std::mem::take(&mut self.geometry);
        let programs = std::mem::take(&mut self.programs);
        let released = geometry.len() + programs.len();

        for id in geometry {
            self.graphics.release_geometry(id);
        }
        for id in programs {
            self.graphics.release_program(id);
        }

        if released > 0 {
            log::info!(
                "frame loop shut down after {} frame(s), released {released} handle(s)",
                self.frames
            );
        }
        released
    }

    pub fn should_close(&self) -> bool {
        self.state.close_requested()
    }

    pub fn fill_mode(&self) -> FillMode {
        self.state.fill_mode()
    }

    /// Viewport set by the most recent resize, if any.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn programs(&self) -> &[ProgramId] {
        &self.programs
    }

    pub fn geometry(&self) -> &[GeometryId] {
        &self.geometry
    }

    /// Programs whose compile log reported errors during initialization.
    pub fn failed_programs(&self) -> &[ProgramId] {
        &self.failed_programs
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut G {
        &mut self.graphics
    }
}

impl<G: Graphics> Drop for FrameLoop<G> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
