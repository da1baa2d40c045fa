use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::frame_loop::{FrameLoop, Scene};
use crate::input::platform::translate_window_event;
use crate::input::InputState;
use crate::render::WgpuGraphics;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
        }
    }
}

impl RuntimeConfig {
    pub fn new(title: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            title: title.into(),
            initial_size: LogicalSize::new(width, height),
            ..Self::default()
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs `scene` in it until close is requested.
    ///
    /// Returns an error when the window or the GPU context cannot be created,
    /// or when presentation fails unrecoverably. Returns `Ok` on a normal
    /// close (close key or window close button).
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, scene: Scene) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    frame_loop: FrameLoop<WgpuGraphics<'this>>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    scene: Scene,

    window: Option<WindowEntry>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scene: Scene) -> Self {
        Self {
            config,
            gpu_init,
            scene,
            window: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal.get_or_insert(err);
        self.request_exit(event_loop);
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let scene = &self.scene;

        WindowEntryTryBuilder {
            input: InputState::default(),
            window,
            frame_loop_builder: |w| {
                let gpu = pollster::block_on(Gpu::new(w, gpu_init))
                    .context("failed to create GPU context")?;
                FrameLoop::initialize(scene, WgpuGraphics::new(gpu))
            },
        }
        .try_build()
    }

    /// Runs one iteration: poll input, record, present.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        let result = entry.with_mut(|fields| -> Result<bool> {
            let frame_loop = fields.frame_loop;
            frame_loop.poll_input(fields.input);
            if frame_loop.should_close() {
                return Ok(true);
            }

            frame_loop.render_frame();
            fields.window.pre_present_notify();
            frame_loop.present()?;
            Ok(false)
        });

        match result {
            Ok(true) => self.request_exit(event_loop),
            Ok(false) => {}
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn shutdown(&mut self) {
        if let Some(mut entry) = self.window.take() {
            entry.with_frame_loop_mut(|f| f.shutdown());
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; FIFO presentation paces the loop.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(&event) {
            entry.with_input_mut(|input| input.apply_event(&ev));
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_frame_loop_mut(|f| {
                    f.graphics_mut().resize_surface(*new_size);
                    f.resize(new_size.width, new_size.height);
                });
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_frame_loop_mut(|f| {
                    f.graphics_mut().resize_surface(new_size);
                    f.resize(new_size.width, new_size.height);
                });
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
